//! Remote adapter contract for webremote.
//!
//! A remote is a read-only location holding a sequence of immutable commits,
//! each stamped with arbitrary metadata. This crate defines what every
//! adapter shares:
//!
//! - **Commit model** — [`Commit`], [`Tag`] predicates, and newest-first ordering
//! - **Remote trait** — identifier translation, validation, and commit queries
//! - **Registry** — an explicit map from type name to adapter
//!
//! Adapters live in their own crates and are added to a [`RemoteRegistry`]
//! at startup.

pub mod commit;
pub mod error;
pub mod registry;
pub mod remote;
pub mod validate;
pub mod value;

// Re-exports for convenience.
pub use commit::{match_tags, sort_commits, Commit, ParseTagError, Tag};
pub use error::{RemoteError, Result, ValidationError};
pub use registry::RemoteRegistry;
pub use remote::{Options, Remote};
pub use validate::validate_fields;
pub use value::{Properties, Value};
