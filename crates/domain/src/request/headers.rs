//! Request headers and the header-set builder.
//!
//! Services start from a base set (usually [`Headers::json`]) and apply
//! optional credential overlays; the finished set is handed to the transport
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// Session identifier header name.
pub const SESSION_ID: &str = "X-Session-ID";
/// JSON media type.
pub const APPLICATION_JSON: &str = "application/json";

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name as sent on the wire.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Ordered header set with case-insensitive names.
///
/// Setting a header that already exists replaces its value in place, so a
/// name appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    /// Creates an empty header set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a header set carrying `Content-Type: application/json`.
    #[must_use]
    pub fn json() -> Self {
        Self::new().with(CONTENT_TYPE, APPLICATION_JSON)
    }

    /// Sets a header (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a header only when a non-empty value is supplied.
    #[must_use]
    pub fn with_optional(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value.map(Into::into) {
            Some(value) if !value.is_empty() => self.with(name, value),
            _ => self,
        }
    }

    /// Adds `Authorization: Bearer <token>` when a token is supplied.
    #[must_use]
    pub fn bearer(self, token: Option<&str>) -> Self {
        let value = token
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"));
        self.with_optional(AUTHORIZATION, value)
    }

    /// Adds the session header when a session id is supplied.
    #[must_use]
    pub fn session_id(self, session_id: Option<&str>) -> Self {
        self.with_optional(SESSION_ID, session_id)
    }

    /// Sets a header, replacing any existing header with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|h| h.name.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.value = value,
            None => self.entries.push(Header { name, value }),
        }
    }

    /// Returns the value of a header (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if the header is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over the headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no header is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that every name is an HTTP token and no value contains line breaks.
    ///
    /// # Errors
    ///
    /// Returns the first offending header.
    pub fn validate(&self) -> DomainResult<()> {
        for header in &self.entries {
            if header.name.is_empty() || !header.name.bytes().all(is_token_byte) {
                return Err(DomainError::InvalidHeaderName(header.name.clone()));
            }
            if header.value.bytes().any(|b| b == b'\r' || b == b'\n' || b == 0) {
                return Err(DomainError::InvalidHeaderValue(header.name.clone()));
            }
        }
        Ok(())
    }
}

const fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
