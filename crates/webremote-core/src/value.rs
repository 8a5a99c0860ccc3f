//! Structured property values.
//!
//! Remote configuration, per-call parameters, and commit metadata are all
//! string-keyed maps of JSON-compatible values. `serde_json::Value` is the
//! tagged union over string, number, boolean, null, list and map, so access
//! is checked with pattern matching instead of casts.

use crate::error::ValidationError;

pub use serde_json::Value;

/// A string-keyed map of structured values.
pub type Properties = serde_json::Map<String, Value>;

/// Look up a required string field.
pub fn required_str<'a>(properties: &'a Properties, field: &str) -> Result<&'a str, ValidationError> {
    match properties.get(field) {
        None => Err(ValidationError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::WrongType {
            field: field.to_string(),
            expected: "string",
        }),
    }
}

/// Build a property map from `(key, value)` pairs.
pub fn properties<K, V, I>(entries: I) -> Properties
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_str_present() {
        let props = properties([("location", "http://host/path")]);
        assert_eq!(required_str(&props, "location").unwrap(), "http://host/path");
    }

    #[test]
    fn required_str_missing() {
        let props = Properties::new();
        assert_eq!(
            required_str(&props, "location").unwrap_err(),
            ValidationError::MissingField {
                field: "location".to_string()
            }
        );
    }

    #[test]
    fn required_str_wrong_type() {
        let props = properties([("location", 42)]);
        assert!(matches!(
            required_str(&props, "location"),
            Err(ValidationError::WrongType { expected: "string", .. })
        ));
    }
}
