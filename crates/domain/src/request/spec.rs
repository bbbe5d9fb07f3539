//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};

/// A fully described HTTP request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: String,
    /// Headers sent with the request.
    #[serde(default)]
    pub headers: Headers,
    /// JSON body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    /// Creates a GET request without headers.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Creates a POST request carrying a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Headers::new(),
            body: Some(body),
        }
    }

    /// Replaces the header set.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Checks the URL is absolute http(s) and the headers are well formed.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] or a header error.
    pub fn validate(&self) -> DomainResult<()> {
        let parsed =
            Url::parse(&self.url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {}",
                parsed.scheme(),
                self.url
            )));
        }
        self.headers.validate()
    }
}
