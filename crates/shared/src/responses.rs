//! Response bodies of the command API.

use serde::{Deserialize, Serialize};

/// Body the server returns alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: u16,
}

impl ErrorResponse {
    /// Best-effort parse of an error body; falls back to the raw text.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) if !parsed.message.is_empty() => Self {
                message: parsed.message,
                status,
            },
            _ => Self {
                message: body.trim().to_string(),
                status,
            },
        }
    }
}
