//! `s3web` remote adapter.
//!
//! Addresses a read-only object tree served over plain HTTP as a remote.
//! The remote publishes its commits in a line-delimited JSON document at
//! `<location>/titan`; this crate translates `s3web://` identifiers to HTTP
//! locations, fetches that document, and filters, orders, and looks up the
//! commits it lists.
//!
//! # Components
//!
//! - [`location`] — identifier ↔ location translation
//! - [`fetch`] — a single GET of the metadata document
//! - [`resolve`] — tolerant line parsing, tag filtering, ordering, lookup
//! - [`remote`] — the [`Remote`](webremote_core::Remote) implementation

pub mod fetch;
pub mod location;
pub mod remote;
pub mod resolve;

// Re-exports for convenience.
pub use fetch::{
    FetchOutcome, Fetcher, HttpResponse, HttpTransport, ReqwestTransport, METADATA_FILE,
};
pub use location::{from_location, to_location, Location, SCHEME};
pub use remote::{location_of, register, S3WebRemote, LOCATION_FIELD};
pub use resolve::{get_commit, list_commits, parse_document};
