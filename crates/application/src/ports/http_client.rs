//! HTTP transport port.
//!
//! The transport performs the network exchange and nothing else: any status
//! the server returns, 4xx and 5xx included, comes back as `Ok`. Only
//! failures to obtain a response at all are errors.

use std::future::Future;
use std::pin::Pin;

use authprobe_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Errors raised when no HTTP response could be obtained.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header could not be encoded.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The host name did not resolve.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport gave up waiting.
    #[error("request timed out")]
    Timeout,

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_>;
}
