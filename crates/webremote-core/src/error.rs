//! Remote error types.

/// A problem with a configuration or parameter map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A field that the remote does not recognize.
    #[error("invalid field '{field}'")]
    UnexpectedField { field: String },

    /// A recognized field holding a value of the wrong shape.
    #[error("field '{field}' must be a {expected}")]
    WrongType { field: String, expected: &'static str },
}

/// Errors that can occur during remote operations.
///
/// The first group is raised locally while translating or validating
/// configuration; the second group comes from the network and is surfaced
/// to the caller verbatim. A missing metadata document or an unknown commit
/// id are not errors.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The identifier is not a syntactically valid URI.
    #[error("invalid remote identifier '{identifier}': {detail}")]
    InvalidFormat { identifier: String, detail: String },

    /// The identifier uses a scheme other than the remote's reserved one.
    #[error("invalid remote scheme '{found}', expected '{expected}'")]
    InvalidScheme { expected: String, found: String },

    /// The identifier embeds a username or password.
    #[error("remote username and password cannot be specified")]
    CredentialsNotAllowed,

    /// The identifier has an empty host component.
    #[error("missing remote host name")]
    MissingHost,

    /// An extra option was supplied that the remote does not define.
    #[error("invalid property '{key}'")]
    UnsupportedOption { key: String },

    /// Configuration or parameters failed the field-set check.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No remote is registered under the requested type name.
    #[error("unknown remote type '{name}'")]
    UnknownType { name: String },

    /// The request never produced a complete response.
    #[error("failed to get '{address}': {detail}")]
    TransportFailure { address: String, detail: String },

    /// The server answered with a non-success status.
    #[error("failed to get '{address}': {status}: {body}")]
    Remote {
        address: String,
        status: u16,
        body: String,
    },
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
