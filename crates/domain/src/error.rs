//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name is invalid.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// A header value is invalid.
    #[error("invalid header value for '{0}'")]
    InvalidHeaderValue(String),

    /// The request or response body is not usable as JSON.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A required payload field is missing.
    #[error("field {0} is required")]
    MissingField(&'static str),

    /// A required payload field is present but empty.
    #[error("field {0} must not be empty")]
    EmptyField(&'static str),

    /// A payload field exceeds its length bound.
    #[error("field {field} must be shorter than {max} characters")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Exclusive upper bound.
        max: usize,
    },

    /// A payload field is below its minimum length.
    #[error("field {field} must be at least {min} characters")]
    FieldTooShort {
        /// Field name.
        field: &'static str,
        /// Inclusive lower bound.
        min: usize,
    },

    /// A payload field contains characters outside its allowed set.
    #[error("field {0} contains unsupported characters")]
    UnsupportedCharacters(&'static str),

    /// A hard assertion failed.
    #[error("assertion failed: {assertion}: {message}")]
    AssertionFailed {
        /// Description of the assertion.
        assertion: String,
        /// Failure detail.
        message: String,
    },

    /// One or more soft assertions failed in a scoped unit.
    #[error("{failed} of {total} soft assertions failed in '{suite}':\n{details}")]
    SoftAssertionsFailed {
        /// Name of the scoped unit.
        suite: String,
        /// Number of failed assertions.
        failed: usize,
        /// Number of assertions run.
        total: usize,
        /// One line per failure.
        details: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
