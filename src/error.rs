//! Error types for pai-apps.
//!
//! Parsing itself only fails on payloads that do not have the expected
//! shape. Everything else (empty markup, missing labels, odd titles) is
//! absorbed into an empty or partial result plus diagnostics.

use std::path::PathBuf;

/// Error type for parsing, persistence, and crawl operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The article payload is missing a required field or has the wrong shape.
    #[error("malformed article payload: {0}")]
    MalformedPayload(String),

    /// JSON could not be read or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The remote API answered with a non-zero error code.
    #[error("API returned error code {code}: {message}")]
    Api {
        /// Error code from the response envelope.
        code: i64,
        /// Endpoint or message describing the failure.
        message: String,
    },

    /// The requested crawl window cannot be computed.
    #[error("invalid run range: {0}")]
    InvalidRange(String),

    /// A crawl setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for pai-apps operations.
pub type Result<T> = std::result::Result<T, Error>;
