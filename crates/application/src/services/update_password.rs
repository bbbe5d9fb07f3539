//! Password update endpoint.

use authprobe_domain::{
    Assertion, ErrorBody, Headers, ResponseSpec, SoftAssertions, UpdatePasswordResponse,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::ensure_ok;
use crate::client::BaseClient;
use crate::error::{ApplicationError, ApplicationResult};

/// Path of the password update endpoint below the base URL.
pub const UPDATE_PASSWORD_PATH: &str = "/api/updatepassword";

/// Substrings an error body must never contain.
const SENSITIVE_MARKERS: [&str; 2] = ["password", "token"];

/// Adapter for the password update endpoint.
#[derive(Debug, Clone)]
pub struct UpdatePasswordService {
    client: BaseClient,
    url: String,
}

impl UpdatePasswordService {
    /// Operation name used in failure messages.
    pub const OPERATION: &'static str = "Update password";

    /// Creates a service for `<base_url>/api/updatepassword`.
    #[must_use]
    pub fn new(client: BaseClient, base_url: &str) -> Self {
        Self::with_url(
            client,
            format!("{}{UPDATE_PASSWORD_PATH}", base_url.trim_end_matches('/')),
        )
    }

    /// Creates a service posting to an explicit URL.
    #[must_use]
    pub fn with_url(client: BaseClient, url: impl Into<String>) -> Self {
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

    /// Posts `payload`. The bearer and session headers are only sent when the
    /// corresponding credential is supplied.
    ///
    /// `payload` is usually an [`authprobe_domain::UpdatePasswordRequest`];
    /// any serializable value is accepted so malformed bodies can be sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::RequestFailed`] for a non-2xx response and
    /// propagates transport errors.
    pub async fn update_password<T>(
        &self,
        payload: &T,
        auth_token: Option<&str>,
        session_id: Option<&str>,
    ) -> ApplicationResult<ResponseSpec>
    where
        T: Serialize + ?Sized,
    {
        let headers = Headers::json().bearer(auth_token).session_id(session_id);

        debug!(
            url = %self.url,
            with_auth_token = auth_token.is_some(),
            with_session_id = session_id.is_some(),
            "posting password update"
        );
        let response = self.client.post(&self.url, payload, Some(&headers)).await?;
        ensure_ok(Self::OPERATION, response)
    }

    /// Records presence and non-emptiness of every response field.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingResponse`] when `body` is absent.
    pub fn validate_update_password_response(
        soft: &mut SoftAssertions,
        body: Option<&Value>,
    ) -> ApplicationResult<()> {
        let body = body.ok_or(ApplicationError::MissingResponse("Response"))?;

        for field in UpdatePasswordResponse::FIELDS {
            soft.check(Assertion::field_present(field), body);
        }
        for field in UpdatePasswordResponse::FIELDS {
            soft.check(Assertion::non_empty_string(field), body);
        }
        Ok(())
    }

    /// Records the error body shape and that it leaks no credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingResponse`] when `body` is absent.
    pub fn validate_error_body(soft: &mut SoftAssertions, body: Option<&Value>) -> ApplicationResult<()> {
        let body = body.ok_or(ApplicationError::MissingResponse("Error response"))?;

        for field in ErrorBody::FIELDS {
            soft.check(Assertion::field_present(field), body);
        }
        for marker in SENSITIVE_MARKERS {
            soft.check(Assertion::body_not_contains(marker), body);
        }
        Ok(())
    }
}
