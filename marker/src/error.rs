//! Marker Error Types
//!
//! [`MarkerError`] covers everything that can go wrong while grading a sheet:
//! missing configuration, transport failures talking to the model, responses that
//! do not match the expected schema, and edits that do not fit the record.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerError {
    /// Required configuration (API key, model name) is missing.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request to grading service failed: {0}")]
    Request(String),
    /// The grading service answered with a non-success status.
    #[error("grading service returned {status}: {body}")]
    Api { status: u16, body: String },
    /// The response did not have the expected shape.
    #[error("invalid response from grading service: {0}")]
    InvalidResponse(String),
    /// An edit referenced a question that does not exist.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),
    /// An uploaded document was rejected before being sent anywhere.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

impl MarkerError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarkerError::Request(_) => true,
            MarkerError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for MarkerError {
    fn from(e: reqwest::Error) -> Self {
        MarkerError::Request(e.to_string())
    }
}
