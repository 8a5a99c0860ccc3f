//! The `s3web` remote adapter.

use webremote_core::value::{self, Properties};
use webremote_core::{validate_fields, Commit, Options, Remote, RemoteRegistry, Result, Tag};

use crate::fetch::{Fetcher, HttpTransport, ReqwestTransport};
use crate::location::{self, Location, SCHEME};
use crate::resolve;

/// Configuration field holding the HTTP location.
pub const LOCATION_FIELD: &str = "location";

/// Remote backed by a static HTTP object tree.
#[derive(Debug, Clone, Default)]
pub struct S3WebRemote<T = ReqwestTransport> {
    fetcher: Fetcher<T>,
}

impl S3WebRemote {
    pub fn new() -> Self {
        S3WebRemote::with_transport(ReqwestTransport)
    }
}

impl<T: HttpTransport> S3WebRemote<T> {
    /// Use a custom transport for metadata fetches.
    pub fn with_transport(transport: T) -> Self {
        S3WebRemote {
            fetcher: Fetcher::new(transport),
        }
    }
}

/// Read the location out of remote properties.
pub fn location_of(properties: &Properties) -> Result<Location> {
    value::required_str(properties, LOCATION_FIELD)?.parse()
}

impl<T: HttpTransport> Remote for S3WebRemote<T> {
    fn remote_type(&self) -> &str {
        SCHEME
    }

    fn from_url(&self, identifier: &str, options: &Options) -> Result<Properties> {
        let location = location::to_location(identifier, options)?;
        Ok(value::properties([(LOCATION_FIELD, location.to_string())]))
    }

    fn to_url(&self, properties: &Properties) -> Result<(String, Options)> {
        let location = location_of(properties)?;
        Ok((location::from_location(&location), Options::new()))
    }

    fn get_parameters(&self, _properties: &Properties) -> Result<Properties> {
        Ok(Properties::new())
    }

    fn validate_remote(&self, properties: &Properties) -> Result<()> {
        validate_fields(properties, &[LOCATION_FIELD], &[])?;
        Ok(())
    }

    fn validate_parameters(&self, parameters: &Properties) -> Result<()> {
        validate_fields(parameters, &[], &[])?;
        Ok(())
    }

    fn list_commits(
        &self,
        properties: &Properties,
        _parameters: &Properties,
        tags: &[Tag],
    ) -> Result<Vec<Commit>> {
        let location = location_of(properties)?;
        resolve::list_commits(&self.fetcher, &location, tags)
    }

    fn get_commit(
        &self,
        properties: &Properties,
        _parameters: &Properties,
        commit_id: &str,
    ) -> Result<Option<Commit>> {
        let location = location_of(properties)?;
        resolve::get_commit(&self.fetcher, &location, commit_id)
    }
}

/// Add the `s3web` remote to a registry.
pub fn register(registry: &mut RemoteRegistry) {
    registry.register(S3WebRemote::new());
}
