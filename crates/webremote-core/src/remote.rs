//! The remote adapter trait.
//!
//! A `Remote` translates between a short identifier (`<scheme>://...`) and the
//! properties map stored in configuration, validates configuration and
//! per-call parameters, and answers commit queries. Implementations keep no
//! state between calls.

use std::collections::BTreeMap;

use crate::commit::{Commit, Tag};
use crate::error::Result;
use crate::value::Properties;

/// Extra `key=value` options supplied alongside an identifier.
pub type Options = BTreeMap<String, String>;

/// Abstract remote adapter.
pub trait Remote: Send + Sync {
    /// The type name this remote registers under.
    fn remote_type(&self) -> &str;

    /// Translate an identifier and extra options into remote properties.
    fn from_url(&self, identifier: &str, options: &Options) -> Result<Properties>;

    /// Translate remote properties back into an identifier and options.
    fn to_url(&self, properties: &Properties) -> Result<(String, Options)>;

    /// Derive the per-call parameters for a remote.
    fn get_parameters(&self, properties: &Properties) -> Result<Properties>;

    /// Check the remote properties against the accepted field set.
    fn validate_remote(&self, properties: &Properties) -> Result<()>;

    /// Check per-call parameters against the accepted field set.
    fn validate_parameters(&self, parameters: &Properties) -> Result<()>;

    /// List commits matching every tag, newest first.
    fn list_commits(
        &self,
        properties: &Properties,
        parameters: &Properties,
        tags: &[Tag],
    ) -> Result<Vec<Commit>>;

    /// Look up a single commit. `Ok(None)` when no commit has that id.
    fn get_commit(
        &self,
        properties: &Properties,
        parameters: &Properties,
        commit_id: &str,
    ) -> Result<Option<Commit>>;
}
