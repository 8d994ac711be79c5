//! Errors surfaced by command requests.
//!
//! A failed command only ever reaches the caller that issued it; the store is
//! never touched by command results.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request failed to send or the connection dropped
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// Session cookie missing or not allowed to perform the command
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Server returned a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    /// Request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}
