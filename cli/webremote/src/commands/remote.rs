//! `webremote from-url`, `to-url`, `validate`, `remotes` — configuration-time commands.

use anyhow::{bail, Context, Result};
use webremote_core::{Options, Properties, RemoteRegistry};

use crate::config::{RemotesConfig, CONFIG_FILE};

/// Parse a `key=value` option.
pub fn parse_option(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("invalid option '{s}', expected key=value"),
    }
}

/// Run `webremote from-url <identifier> [-o key=value]...`.
///
/// Prints the remote properties as JSON.
pub fn from_url(registry: &RemoteRegistry, identifier: &str, options: &[(String, String)]) -> Result<()> {
    let Some((scheme, _)) = identifier.split_once("://") else {
        bail!("'{identifier}' is not a <type>://... identifier");
    };
    let remote = registry.require(scheme)?;
    let options: Options = options.iter().cloned().collect();
    let properties = remote
        .from_url(identifier, &options)
        .with_context(|| format!("translating '{identifier}'"))?;
    println!("{}", serde_json::to_string_pretty(&properties)?);
    Ok(())
}

/// Run `webremote to-url <location>`.
///
/// Only s3web remotes are described by a bare location; other types need
/// their full properties and go through `remotes.toml`.
pub fn to_url(registry: &RemoteRegistry, location: &str) -> Result<()> {
    let remote = registry.require(webremote_s3web::SCHEME)?;
    let (identifier, options) = remote.to_url(&location_properties(location))?;
    println!("{}", format_identifier(&identifier, &options));
    Ok(())
}

fn location_properties(location: &str) -> Properties {
    let mut properties = Properties::new();
    properties.insert(webremote_s3web::LOCATION_FIELD.to_string(), location.into());
    properties
}

fn format_identifier(identifier: &str, options: &Options) -> String {
    let mut out = identifier.to_string();
    for (key, value) in options {
        out.push_str(&format!(" -o {key}={value}"));
    }
    out
}

/// Run `webremote validate <remote>`.
pub fn validate(registry: &RemoteRegistry, config: &RemotesConfig, arg: &str) -> Result<()> {
    let (remote, properties) = crate::config::resolve_remote(arg, config, registry)?;
    remote.validate_remote(&properties)?;
    let parameters = remote.get_parameters(&properties)?;
    remote.validate_parameters(&parameters)?;
    let (identifier, _) = remote.to_url(&properties)?;
    println!("Remote '{arg}' is valid ({identifier})");
    Ok(())
}

/// Run `webremote remotes`.
pub fn list(registry: &RemoteRegistry, config: &RemotesConfig) -> Result<()> {
    println!("Remote types:");
    for name in registry.types() {
        println!("  {name}");
    }
    println!();

    if config.remotes.is_empty() {
        println!("No remotes configured in {CONFIG_FILE}.");
        return Ok(());
    }

    println!("Configured remotes:");
    for (name, entry) in &config.remotes {
        let identifier = registry
            .get(&entry.remote_type)
            .and_then(|remote| {
                let properties = entry.properties().ok()?;
                remote.to_url(&properties).ok()
            })
            .map(|(identifier, _)| identifier)
            .unwrap_or_else(|| format!("<invalid {} remote>", entry.remote_type));
        println!("  {name:<20} {identifier}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_value_option() {
        assert_eq!(
            parse_option("a=b").unwrap(),
            ("a".to_string(), "b".to_string())
        );
        assert_eq!(
            parse_option("a=").unwrap(),
            ("a".to_string(), String::new())
        );
        assert!(parse_option("a").is_err());
        assert!(parse_option("=b").is_err());
    }

    #[test]
    fn location_translates_back_to_s3web() {
        let mut registry = RemoteRegistry::new();
        webremote_s3web::register(&mut registry);
        let remote = registry.require(webremote_s3web::SCHEME).unwrap();
        let (identifier, options) = remote
            .to_url(&location_properties("http://host:8080/a/../b"))
            .unwrap();
        assert_eq!(identifier, "s3web://host:8080/a/../b");
        assert!(options.is_empty());
    }

    #[test]
    fn identifier_with_options() {
        let options = Options::from([("a".to_string(), "b".to_string())]);
        assert_eq!(
            format_identifier("s3web://host", &options),
            "s3web://host -o a=b"
        );
        assert_eq!(format_identifier("s3web://host", &Options::new()), "s3web://host");
    }
}
