//! `webremote list` and `webremote get` — commit queries.

use anyhow::{Context, Result};
use webremote_core::{Commit, Properties, RemoteRegistry, Tag, Value};

use crate::config::{resolve_remote, RemotesConfig};

/// Run `webremote list <remote> [--tag key[=value]]... [--json]`.
pub fn list(
    registry: &RemoteRegistry,
    config: &RemotesConfig,
    arg: &str,
    tags: &[Tag],
    json: bool,
) -> Result<()> {
    let (remote, properties) = resolve_remote(arg, config, registry)?;
    let parameters = remote.get_parameters(&properties)?;
    let commits = remote
        .list_commits(&properties, &parameters, tags)
        .with_context(|| format!("listing commits of '{arg}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&commits)?);
        return Ok(());
    }

    if commits.is_empty() {
        println!("No commits.");
        return Ok(());
    }
    for commit in &commits {
        println!("{}", format_summary(commit));
    }
    Ok(())
}

/// Run `webremote get <remote> <commit-id> [--json]`.
pub fn get(
    registry: &RemoteRegistry,
    config: &RemotesConfig,
    arg: &str,
    commit_id: &str,
    json: bool,
) -> Result<()> {
    let (remote, properties) = resolve_remote(arg, config, registry)?;
    let parameters = remote.get_parameters(&properties)?;
    let commit = remote
        .get_commit(&properties, &parameters, commit_id)
        .with_context(|| format!("reading commit '{commit_id}' of '{arg}'"))?;

    match commit {
        Some(commit) if json => println!("{}", serde_json::to_string_pretty(&commit)?),
        Some(commit) => print!("{}", format_detail(&commit)?),
        None => println!("Commit '{commit_id}' not found."),
    }
    Ok(())
}

/// One line per commit: id, timestamp, tags.
fn format_summary(commit: &Commit) -> String {
    let timestamp = match commit.properties.get("timestamp") {
        Some(Value::String(s)) => s.as_str(),
        _ => "-",
    };
    let tags = commit.tags().map(format_tags).unwrap_or_default();
    format!("{:<36} {:<25} {}", commit.id, timestamp, tags)
        .trim_end()
        .to_string()
}

fn format_tags(tags: &Properties) -> String {
    tags.iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}={s}"),
            Value::Null => key.clone(),
            other => format!("{key}={other}"),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn format_detail(commit: &Commit) -> Result<String> {
    Ok(format!(
        "commit {}\n{}\n",
        commit.id,
        serde_json::to_string_pretty(&commit.properties)?
    ))
}
