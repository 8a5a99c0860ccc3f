//! `remotes.toml` parsing and remote lookup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use webremote_core::{Options, Properties, Remote, RemoteRegistry};

/// File name searched for in the current directory and its ancestors.
pub const CONFIG_FILE: &str = "remotes.toml";

/// The set of named remotes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemotesConfig {
    #[serde(default)]
    pub remotes: BTreeMap<String, RemoteEntry>,
}

/// A single named remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Registered remote type (e.g. "s3web").
    #[serde(rename = "type")]
    pub remote_type: String,
    /// Remote properties passed to the adapter as-is.
    #[serde(flatten)]
    pub properties: toml::Table,
}

impl RemoteEntry {
    /// Convert the TOML properties into the adapter's property map.
    pub fn properties(&self) -> Result<Properties> {
        match serde_json::to_value(&self.properties)? {
            serde_json::Value::Object(map) => Ok(map),
            other => bail!("remote properties must be a table, got {other}"),
        }
    }
}

impl RemotesConfig {
    /// Search upward from `start_dir` for `remotes.toml`, parse and return it
    /// along with the path it was read from.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a specific config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse config from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Resolve a command-line remote argument to an adapter and its properties.
///
/// An argument containing `://` is an identifier and is translated by the
/// adapter registered for its scheme. Anything else names an entry in the
/// config file.
pub fn resolve_remote<'r>(
    arg: &str,
    config: &RemotesConfig,
    registry: &'r RemoteRegistry,
) -> Result<(&'r dyn Remote, Properties)> {
    if let Some((scheme, _)) = arg.split_once("://") {
        let remote = registry.require(scheme)?;
        let properties = remote
            .from_url(arg, &Options::new())
            .with_context(|| format!("translating '{arg}'"))?;
        return Ok((remote, properties));
    }

    let Some(entry) = config.remotes.get(arg) else {
        bail!("no remote named '{arg}' (expected a name from {CONFIG_FILE} or a <type>://... identifier)");
    };
    let remote = registry.require(&entry.remote_type)?;
    let properties = entry.properties()?;
    remote
        .validate_remote(&properties)
        .with_context(|| format!("remote '{arg}' in {CONFIG_FILE}"))?;
    Ok((remote, properties))
}
