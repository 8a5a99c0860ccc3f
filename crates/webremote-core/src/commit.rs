//! Commit records, tag predicates, and commit ordering.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::value::{Properties, Value};

/// Property key holding the commit's RFC 3339 timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Property key holding the commit's tag map.
pub const TAGS_KEY: &str = "tags";

/// A single commit as published by a remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit identifier, unique within a remote.
    pub id: String,
    /// Arbitrary metadata, including `timestamp` and `tags`.
    pub properties: Properties,
}

impl Commit {
    pub fn new(id: impl Into<String>, properties: Properties) -> Self {
        Commit {
            id: id.into(),
            properties,
        }
    }

    /// The commit timestamp, if present and a valid RFC 3339 string.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self.properties.get(TIMESTAMP_KEY) {
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s).ok(),
            _ => None,
        }
    }

    /// The commit's tag map, if present.
    pub fn tags(&self) -> Option<&Properties> {
        match self.properties.get(TAGS_KEY) {
            Some(Value::Object(tags)) => Some(tags),
            _ => None,
        }
    }

    /// Whether this commit satisfies every tag in `tags`.
    pub fn matches(&self, tags: &[Tag]) -> bool {
        match_tags(&self.properties, tags)
    }
}

/// A tag predicate: the key must be present, and when a value is given
/// the tag entry must be a string equal to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    /// A tag that only requires the key to be present.
    pub fn key(key: impl Into<String>) -> Self {
        Tag {
            key: key.into(),
            value: None,
        }
    }

    /// A tag that requires an exact value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    fn matches(&self, tags: &Properties) -> bool {
        match (tags.get(&self.key), &self.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(Value::String(actual)), Some(expected)) => actual == expected,
            (Some(_), Some(_)) => false,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Error returned when a `key[=value]` tag expression has an empty key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tag '{0}': key must not be empty")]
pub struct ParseTagError(String);

impl FromStr for Tag {
    type Err = ParseTagError;

    /// Parse `key` or `key=value`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = match s.split_once('=') {
            Some((key, value)) => (key, Some(value.to_string())),
            None => (s, None),
        };
        if key.is_empty() {
            return Err(ParseTagError(s.to_string()));
        }
        Ok(Tag {
            key: key.to_string(),
            value,
        })
    }
}

/// Check a commit's properties against a tag set.
///
/// An empty tag set matches everything. Otherwise `properties.tags` must be
/// a map satisfying every tag.
pub fn match_tags(properties: &Properties, tags: &[Tag]) -> bool {
    if tags.is_empty() {
        return true;
    }
    match properties.get(TAGS_KEY) {
        Some(Value::Object(commit_tags)) => tags.iter().all(|t| t.matches(commit_tags)),
        _ => false,
    }
}

/// Sort commits newest first.
///
/// Commits without a parseable timestamp go after those with one. Ties and
/// missing timestamps keep their input order, so the result is the same on
/// every call for the same input.
pub fn sort_commits(commits: &mut Vec<Commit>) {
    let mut keyed: Vec<_> = commits
        .drain(..)
        .enumerate()
        .map(|(position, commit)| {
            let ts = commit.timestamp();
            ((ts.is_none(), Reverse(ts), position), commit)
        })
        .collect();
    keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    commits.extend(keyed.into_iter().map(|(_, commit)| commit));
}
