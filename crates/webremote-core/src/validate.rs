//! Field-set validation for remote configuration and parameter maps.

use crate::error::ValidationError;
use crate::value::Properties;

/// Check that every `required` field is present and every present field is
/// either required or `optional`.
///
/// Missing fields are reported before unexpected ones, each in order.
pub fn validate_fields(
    properties: &Properties,
    required: &[&str],
    optional: &[&str],
) -> Result<(), ValidationError> {
    if let Some(field) = required.iter().find(|f| !properties.contains_key(**f)) {
        return Err(ValidationError::MissingField {
            field: field.to_string(),
        });
    }

    if let Some(field) = properties
        .keys()
        .find(|k| !required.contains(&k.as_str()) && !optional.contains(&k.as_str()))
    {
        return Err(ValidationError::UnexpectedField {
            field: field.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::properties;

    #[test]
    fn required_present() {
        let props = properties([("location", "http://host")]);
        assert!(validate_fields(&props, &["location"], &[]).is_ok());
    }

    #[test]
    fn required_missing() {
        let err = validate_fields(&Properties::new(), &["location"], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "location".to_string()
            }
        );
    }

    #[test]
    fn unexpected_field() {
        let props = properties([("location", "url"), ("foo", "bar")]);
        let err = validate_fields(&props, &["location"], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnexpectedField {
                field: "foo".to_string()
            }
        );
    }

    #[test]
    fn optional_accepted() {
        let props = properties([("location", "url"), ("region", "eu")]);
        assert!(validate_fields(&props, &["location"], &["region"]).is_ok());
        assert!(validate_fields(&properties([("location", "url")]), &["location"], &["region"]).is_ok());
    }

    #[test]
    fn empty_field_set() {
        assert!(validate_fields(&Properties::new(), &[], &[]).is_ok());
        assert!(validate_fields(&properties([("foo", "bar")]), &[], &[]).is_err());
    }
}
