//! Error types for asf-rest.
//!
//! Error messages are sanitized so that session tokens never end up in logs.

use crate::cache::CacheError;

/// Result type alias for asf-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for asf-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The HTTP status carried by a describe failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::DetailInfo { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Transport failure (connection, TLS, timeout).
    #[error("{0}")]
    Client(String),

    /// The describe endpoint answered with a non-200 status.
    #[error("HTTP code {status}: {message}")]
    DetailInfo { status: u16, message: String },

    /// Type name that cannot be used as a path segment.
    #[error("Invalid sobject type name: {0}")]
    InvalidSObject(String),

    /// Missing or unusable adapter configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// External cache failure.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl From<asf_client::Error> for Error {
    fn from(err: asf_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<CacheError> for Error {
    fn from(err: CacheError) -> Self {
        Error::with_source(ErrorKind::Cache(err.to_string()), err)
    }
}
