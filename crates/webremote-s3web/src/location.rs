//! Translation between `s3web://` identifiers and HTTP locations.
//!
//! An identifier `s3web://host[:port][/path]` names the same object tree as
//! the location `http://host[:port][/path]`. Host, port and path are carried
//! over exactly as written, including an empty path; query and fragment are
//! dropped.

use std::fmt;
use std::str::FromStr;

use url::Url;
use webremote_core::{Options, RemoteError, Result};

/// Reserved identifier scheme token.
pub const SCHEME: &str = "s3web";

/// Scheme used for every fetch against the location.
pub const TRANSFER_SCHEME: &str = "http";

/// Root of a remote object tree, reachable over plain HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    host: String,
    port: Option<u16>,
    path: String,
}

impl Location {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Path below the host, empty or starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Address of a file directly below the location root.
    pub fn join(&self, name: &str) -> String {
        format!("{self}/{name}")
    }

    fn fmt_with_scheme(&self, scheme: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{scheme}://{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_scheme(TRANSFER_SCHEME, f)
    }
}

impl FromStr for Location {
    type Err = RemoteError;

    /// Parse a stored `http://` location.
    fn from_str(s: &str) -> Result<Self> {
        let (scheme, rest) = s.split_once("://").ok_or_else(|| RemoteError::InvalidFormat {
            identifier: s.to_string(),
            detail: "missing scheme".to_string(),
        })?;
        if scheme != TRANSFER_SCHEME {
            return Err(RemoteError::InvalidScheme {
                expected: TRANSFER_SCHEME.to_string(),
                found: scheme.to_string(),
            });
        }
        // Re-parse under the reserved scheme: `http` is a special scheme and the
        // URL parser would turn an empty path into `/`.
        parse(&format!("{SCHEME}://{rest}"))
    }
}

/// Translate an identifier into a location.
///
/// Checks run in a fixed order and the first failure wins: URI syntax,
/// scheme, credentials, host, then extra options (this remote defines none).
pub fn to_location(identifier: &str, options: &Options) -> Result<Location> {
    let location = parse(identifier)?;

    if let Some(key) = options.keys().next() {
        return Err(RemoteError::UnsupportedOption { key: key.clone() });
    }

    Ok(location)
}

/// Translate a location back into its identifier.
pub fn from_location(location: &Location) -> String {
    Identifier(location).to_string()
}

struct Identifier<'a>(&'a Location);

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_with_scheme(SCHEME, f)
    }
}

/// Scheme, authority and path exactly as written.
///
/// The URL parser validates the identifier, but it normalizes dot segments
/// and drops an empty user-info part, so those are read from the raw text.
struct RawParts<'a> {
    scheme: &'a str,
    authority: &'a str,
    path: &'a str,
}

impl<'a> RawParts<'a> {
    fn split(identifier: &'a str) -> Self {
        let (scheme, rest) = identifier.split_once("://").unwrap_or(("", ""));
        let rest = &rest[..rest.find(|c| c == '?' || c == '#').unwrap_or(rest.len())];
        let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
        RawParts {
            scheme,
            authority,
            path,
        }
    }

    fn has_user_info(&self) -> bool {
        self.authority.contains('@')
    }
}

/// Run the identifier checks in order: URI syntax, scheme, credentials, host.
fn parse(identifier: &str) -> Result<Location> {
    // The URL parser silently strips tabs and newlines; treat any control
    // character as malformed instead.
    if identifier.chars().any(|c| c.is_ascii_control()) {
        return Err(invalid_format(identifier, "contains control characters"));
    }

    let raw = RawParts::split(identifier);
    let url = match Url::parse(identifier) {
        Ok(url) => url,
        // `user@/path` is rejected for its empty host before the parser
        // gets to the credentials.
        Err(url::ParseError::EmptyHost) if raw.has_user_info() => {
            if !raw.scheme.eq_ignore_ascii_case(SCHEME) {
                return Err(invalid_scheme(raw.scheme));
            }
            return Err(RemoteError::CredentialsNotAllowed);
        }
        Err(e) => return Err(invalid_format(identifier, &e.to_string())),
    };

    if url.scheme() != SCHEME {
        return Err(invalid_scheme(url.scheme()));
    }

    if raw.has_user_info() || !url.username().is_empty() || url.password().is_some() {
        return Err(RemoteError::CredentialsNotAllowed);
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(RemoteError::MissingHost)?;

    Ok(Location {
        host: host.to_string(),
        port: url.port(),
        path: raw.path.to_string(),
    })
}

fn invalid_format(identifier: &str, detail: &str) -> RemoteError {
    RemoteError::InvalidFormat {
        identifier: identifier.to_string(),
        detail: detail.to_string(),
    }
}

fn invalid_scheme(found: &str) -> RemoteError {
    RemoteError::InvalidScheme {
        expected: SCHEME.to_string(),
        found: found.to_string(),
    }
}
