//! Application error types

use authprobe_domain::{DomainError, ResponseSpec};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation or hard assertion error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No HTTP response could be obtained.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// A service call returned a non-2xx response.
    #[error("{operation} failed: {status} - {status_text}")]
    RequestFailed {
        /// Operation name, e.g. "Login process".
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// HTTP status text.
        status_text: String,
        /// The rejected response, kept for inspection.
        response: Box<ResponseSpec>,
    },

    /// A value required for validation was absent.
    #[error("{0} is null or undefined")]
    MissingResponse(&'static str),
}

impl ApplicationError {
    /// HTTP status carried by a [`Self::RequestFailed`] error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Recovers the rejected response from a [`Self::RequestFailed`] error.
    #[must_use]
    pub fn into_response(self) -> Option<ResponseSpec> {
        match self {
            Self::RequestFailed { response, .. } => Some(*response),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
