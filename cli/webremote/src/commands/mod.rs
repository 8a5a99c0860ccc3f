//! CLI command implementations.

pub mod commits;
pub mod remote;
