//! Login process payloads.

use serde::{Deserialize, Serialize};

/// Login request body.
///
/// `user_id`, `auth_token` and `session_id` are always sent; `id` and `title`
/// are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Numeric user id.
    pub user_id: i64,
    /// Optional record id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Bearer token, also sent in the `Authorization` header.
    pub auth_token: String,
    /// Session id, also sent in the session header.
    pub session_id: String,
}

impl LoginRequest {
    /// Creates a request with only the required fields.
    #[must_use]
    pub fn new(user_id: i64, auth_token: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            id: None,
            title: None,
            auth_token: auth_token.into(),
            session_id: session_id.into(),
        }
    }

    /// Sets the optional record id.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the optional title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The username the server is expected to report for this request.
    #[must_use]
    pub fn expected_username(&self) -> String {
        self.user_id.to_string()
    }
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// String form of the request's user id.
    pub username: String,
    /// Password.
    pub password: String,
    /// Echo of the request token.
    pub auth_token: String,
    /// Echo of the request session id.
    pub session_id: String,
    /// Device id.
    pub device_id: String,
    /// Member number.
    pub member_number: String,
}

impl LoginResponse {
    /// Exact set of JSON fields in a login response.
    pub const FIELDS: [&'static str; 6] = [
        "username",
        "password",
        "authToken",
        "sessionId",
        "deviceId",
        "memberNumber",
    ];
}
