//! Login process endpoint.

use authprobe_domain::request::{AUTHORIZATION, SESSION_ID};
use authprobe_domain::{Assertion, Headers, LoginRequest, ResponseSpec, assert_hard};
use serde_json::Value;
use tracing::debug;

use super::ensure_ok;
use crate::client::BaseClient;
use crate::error::{ApplicationError, ApplicationResult};

/// Adapter for the login process endpoint.
#[derive(Debug, Clone)]
pub struct LoginService {
    client: BaseClient,
    url: String,
}

impl LoginService {
    /// Operation name used in failure messages.
    pub const OPERATION: &'static str = "Login process";

    /// Creates a service posting to `url`.
    #[must_use]
    pub fn new(client: BaseClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts `payload` with its token as bearer credential and its session id
    /// in the session header.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::RequestFailed`] for a non-2xx response and
    /// propagates transport errors.
    pub async fn login_process_post(&self, payload: &LoginRequest) -> ApplicationResult<ResponseSpec> {
        let headers = Headers::json()
            .with(AUTHORIZATION, format!("Bearer {}", payload.auth_token))
            .with(SESSION_ID, payload.session_id.as_str());

        debug!(url = %self.url, user_id = payload.user_id, "posting login process");
        let response = self.client.post(&self.url, payload, Some(&headers)).await?;
        ensure_ok(Self::OPERATION, response)
    }

    /// Checks a login response body against the request that produced it.
    ///
    /// Every check is hard: the first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingResponse`] when `body` is absent and
    /// a domain assertion error for the first failed check.
    pub fn validate_login_process_response(
        body: Option<&Value>,
        expected: &LoginRequest,
    ) -> ApplicationResult<()> {
        let body = body.ok_or(ApplicationError::MissingResponse("Response"))?;

        let checks = [
            Assertion::field_equals("username", expected.expected_username()),
            Assertion::field_present("password"),
            Assertion::field_equals("authToken", expected.auth_token.as_str()),
            Assertion::field_equals("sessionId", expected.session_id.as_str()),
            Assertion::field_present("deviceId"),
            Assertion::field_present("memberNumber"),
        ];
        for check in &checks {
            assert_hard(check, body)?;
        }
        Ok(())
    }
}
