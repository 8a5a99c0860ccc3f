//! Commit resolution over the metadata document.
//!
//! The document is line-delimited JSON, one `{"id": ..., "properties": {...}}`
//! record per line. Each line decodes on its own; a blank separator or a
//! corrupted line is skipped without affecting the rest.

use serde::Deserialize;
use webremote_core::{sort_commits, Commit, Properties, Result, Tag};

use crate::fetch::{FetchOutcome, Fetcher, HttpTransport};
use crate::location::Location;

/// Why a single metadata line was skipped.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("line is not a metadata record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record has no id")]
    MissingId,

    #[error("record has no properties")]
    MissingProperties,
}

#[derive(Deserialize)]
struct RawRecord {
    id: Option<String>,
    properties: Option<Properties>,
}

/// Decode one non-blank line into a commit.
pub fn decode_line(line: &[u8]) -> std::result::Result<Commit, LineError> {
    let text = std::str::from_utf8(line)?.trim();
    let record: RawRecord = serde_json::from_str(text)?;
    let id = record
        .id
        .filter(|id| !id.is_empty())
        .ok_or(LineError::MissingId)?;
    let properties = record.properties.ok_or(LineError::MissingProperties)?;
    Ok(Commit::new(id, properties))
}

/// Decode every well-formed record in document order.
pub fn parse_document(body: &[u8]) -> Vec<Commit> {
    body.split(|&b| b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .filter_map(|(index, line)| match decode_line(line) {
            Ok(commit) => {
                tracing::trace!(line = index + 1, id = %commit.id, "decoded metadata record");
                Some(commit)
            }
            Err(e) => {
                tracing::debug!(line = index + 1, error = %e, "skipping metadata line");
                None
            }
        })
        .collect()
}

/// List the commits at `location` that match every tag, newest first.
///
/// A missing metadata document yields an empty list.
pub fn list_commits<T: HttpTransport>(
    fetcher: &Fetcher<T>,
    location: &Location,
    tags: &[Tag],
) -> Result<Vec<Commit>> {
    let body = match fetcher.fetch(location)? {
        FetchOutcome::NotFound => return Ok(Vec::new()),
        FetchOutcome::Found(body) => body,
    };

    let mut commits: Vec<Commit> = parse_document(&body)
        .into_iter()
        .filter(|c| c.matches(tags))
        .collect();
    sort_commits(&mut commits);

    tracing::debug!(%location, count = commits.len(), "resolved commits");
    Ok(commits)
}

/// Find the commit with `id`, or `None` when the document has no such commit.
pub fn get_commit<T: HttpTransport>(
    fetcher: &Fetcher<T>,
    location: &Location,
    id: &str,
) -> Result<Option<Commit>> {
    let commits = list_commits(fetcher, location, &[])?;
    Ok(commits.into_iter().find(|c| c.id == id))
}
