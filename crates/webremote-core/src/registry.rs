//! Registry of remote adapters keyed by type name.
//!
//! The registry is an ordinary value built at startup; adapters are added
//! with [`RemoteRegistry::register`] and looked up by the type name they
//! report.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RemoteError, Result};
use crate::remote::Remote;

#[derive(Default)]
pub struct RemoteRegistry {
    remotes: BTreeMap<String, Box<dyn Remote>>,
}

impl RemoteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        RemoteRegistry::default()
    }

    /// Add a remote under its own type name.
    ///
    /// Returns the remote previously registered under that name, if any.
    pub fn register<R: Remote + 'static>(&mut self, remote: R) -> Option<Box<dyn Remote>> {
        let name = remote.remote_type().to_string();
        tracing::debug!(remote_type = %name, "registering remote");
        self.remotes.insert(name, Box::new(remote))
    }

    /// Look up a remote by type name.
    pub fn get(&self, name: &str) -> Option<&dyn Remote> {
        self.remotes.get(name).map(|r| r.as_ref())
    }

    /// Look up a remote by type name, failing when it is not registered.
    pub fn require(&self, name: &str) -> Result<&dyn Remote> {
        self.get(name).ok_or_else(|| RemoteError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Registered type names in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.remotes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

impl fmt::Debug for RemoteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRegistry")
            .field("types", &self.remotes.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::{Commit, Tag};
    use crate::remote::Options;
    use crate::value::Properties;

    struct Fixed(&'static str);

    impl Remote for Fixed {
        fn remote_type(&self) -> &str {
            self.0
        }

        fn from_url(&self, _identifier: &str, _options: &Options) -> Result<Properties> {
            Ok(Properties::new())
        }

        fn to_url(&self, _properties: &Properties) -> Result<(String, Options)> {
            Ok((format!("{}://x", self.0), Options::new()))
        }

        fn get_parameters(&self, _properties: &Properties) -> Result<Properties> {
            Ok(Properties::new())
        }

        fn validate_remote(&self, _properties: &Properties) -> Result<()> {
            Ok(())
        }

        fn validate_parameters(&self, _parameters: &Properties) -> Result<()> {
            Ok(())
        }

        fn list_commits(
            &self,
            _properties: &Properties,
            _parameters: &Properties,
            _tags: &[Tag],
        ) -> Result<Vec<Commit>> {
            Ok(Vec::new())
        }

        fn get_commit(
            &self,
            _properties: &Properties,
            _parameters: &Properties,
            _commit_id: &str,
        ) -> Result<Option<Commit>> {
            Ok(None)
        }
    }

    #[test]
    fn register_and_get() {
        let mut registry = RemoteRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register(Fixed("one")).is_none());
        registry.register(Fixed("two"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("one").unwrap().remote_type(), "one");
        assert_eq!(registry.types().collect::<Vec<_>>(), ["one", "two"]);
    }

    #[test]
    fn register_replaces_same_type() {
        let mut registry = RemoteRegistry::new();
        registry.register(Fixed("one"));
        let previous = registry.register(Fixed("one"));
        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_type() {
        let registry = RemoteRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(matches!(
            registry.require("nope"),
            Err(RemoteError::UnknownType { name }) if name == "nope"
        ));
    }
}
