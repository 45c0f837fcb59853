//! Error types for the extraction client.

use thiserror::Error;

/// Result type for extraction client operations.
pub type Result<T> = std::result::Result<T, DoxError>;

/// Extraction client errors.
#[derive(Debug, Error)]
pub enum DoxError {
    /// Requested document type has no schema mapping
    #[error("document type: {0} is not supported")]
    UnsupportedDocumentType(String),

    /// Configuration error (missing credentials, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the upload failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Token endpoint rejected the client credentials
    #[error("authentication failed (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    /// Access token expired and was not renewed
    #[error("access token expired")]
    TokenExpired,

    /// Response status above the endpoint's success threshold
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The service finished the job with status FAILED
    #[error("extraction failed (document id: {document_id})")]
    ExtractionFailed { document_id: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DoxError {
    fn from(err: serde_json::Error) -> Self {
        DoxError::Parse(err.to_string())
    }
}

impl DoxError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            DoxError::Http { status, .. } | DoxError::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }
}
