//! Error payload returned by both endpoints on 4xx.

use serde::{Deserialize, Serialize};

/// Error body with a machine-readable code and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl ErrorBody {
    /// Field names every error body exposes.
    pub const FIELDS: [&'static str; 2] = ["code", "message"];

    /// Creates a new error body.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
