//! Password update scenarios.

use authprobe_application::validation::{
    validate_auth_error_response, validate_error_response, validate_successful_response,
};
use authprobe_application::{ApplicationResult, UpdatePasswordService};
use authprobe_domain::models::MAX_FIELD_LEN;
use authprobe_domain::{
    Assertion, ResponseSpec, SoftAssertions, UpdatePasswordResponse,
};
use serde_json::{Value, json};
use tracing::info;

use super::{ScenarioGroup, decoded, expect_rejection};
use crate::fixtures::{
    self, INVALID_AUTH_TOKEN, INVALID_SESSION_ID, VALID_AUTH_TOKEN, VALID_SESSION_ID,
};

/// Upper bound for the response time check.
pub const MAX_RESPONSE_TIME_MS: u64 = 2000;

/// Password update endpoint scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdatePasswordScenario {
    /// Valid payload and credentials.
    ValidCredentials,
    /// Shortest accepted payload.
    MinimalData,
    /// Payload with every field.
    CompleteData,
    /// Every response field is a non-empty string.
    ResponseTypes,
    /// JSON content type.
    ResponseHeaders,
    /// Status 200.
    StatusCode,
    /// Answers within [`MAX_RESPONSE_TIME_MS`].
    CompletesWithinTimeLimit,
    /// `UserName` is echoed.
    UserNameEcho,
    /// No field beyond the documented four.
    NoUnexpectedFields,
    /// Body without `UserName`.
    MissingUserName,
    /// Body without `Password`.
    MissingPassword,
    /// Empty `UserName`.
    EmptyUserName,
    /// Empty `Password`.
    EmptyPassword,
    /// `Password` below the minimum length.
    TooShortPassword,
    /// `Password` with non-ASCII characters.
    NonAsciiPassword,
    /// Empty JSON object.
    EmptyBody,
    /// `UserName` at the length bound.
    MaxLengthUserName,
    /// `Password` at the length bound.
    MaxLengthPassword,
    /// No bearer token and no session.
    MissingAuthToken,
    /// Wrong bearer token.
    InvalidAuthToken,
    /// Wrong session id.
    InvalidSessionId,
    /// No session header.
    MissingSessionId,
    /// Success body leaks no token or key.
    NoSensitiveDataInResponse,
    /// `Cache-Control: no-store`.
    NoCaching,
    /// No `Server` or `X-Powered-By` header.
    NoServerInfoHeaders,
    /// Error body carries `code` and `message`.
    ConsistentErrorFormat,
    /// Error body leaks no password or token.
    NoSensitiveDataInErrors,
}

impl UpdatePasswordScenario {
    /// Every password update scenario, grouped.
    pub const ALL: [Self; 27] = [
        Self::ValidCredentials,
        Self::MinimalData,
        Self::CompleteData,
        Self::ResponseTypes,
        Self::ResponseHeaders,
        Self::StatusCode,
        Self::CompletesWithinTimeLimit,
        Self::UserNameEcho,
        Self::NoUnexpectedFields,
        Self::MissingUserName,
        Self::MissingPassword,
        Self::EmptyUserName,
        Self::EmptyPassword,
        Self::TooShortPassword,
        Self::NonAsciiPassword,
        Self::EmptyBody,
        Self::MaxLengthUserName,
        Self::MaxLengthPassword,
        Self::MissingAuthToken,
        Self::InvalidAuthToken,
        Self::InvalidSessionId,
        Self::MissingSessionId,
        Self::NoSensitiveDataInResponse,
        Self::NoCaching,
        Self::NoServerInfoHeaders,
        Self::ConsistentErrorFormat,
        Self::NoSensitiveDataInErrors,
    ];

    /// Short identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ValidCredentials => "valid-credentials",
            Self::MinimalData => "minimal-data",
            Self::CompleteData => "complete-data",
            Self::ResponseTypes => "response-types",
            Self::ResponseHeaders => "response-headers",
            Self::StatusCode => "status-code",
            Self::CompletesWithinTimeLimit => "time-limit",
            Self::UserNameEcho => "user-name-echo",
            Self::NoUnexpectedFields => "no-unexpected-fields",
            Self::MissingUserName => "missing-user-name",
            Self::MissingPassword => "missing-password",
            Self::EmptyUserName => "empty-user-name",
            Self::EmptyPassword => "empty-password",
            Self::TooShortPassword => "too-short-password",
            Self::NonAsciiPassword => "non-ascii-password",
            Self::EmptyBody => "empty-body",
            Self::MaxLengthUserName => "max-length-user-name",
            Self::MaxLengthPassword => "max-length-password",
            Self::MissingAuthToken => "missing-auth-token",
            Self::InvalidAuthToken => "invalid-auth-token",
            Self::InvalidSessionId => "invalid-session-id",
            Self::MissingSessionId => "missing-session-id",
            Self::NoSensitiveDataInResponse => "no-sensitive-data",
            Self::NoCaching => "no-caching",
            Self::NoServerInfoHeaders => "no-server-info",
            Self::ConsistentErrorFormat => "consistent-error-format",
            Self::NoSensitiveDataInErrors => "no-sensitive-data-in-errors",
        }
    }

    /// What the scenario asserts.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ValidCredentials => "should update password successfully with valid credentials",
            Self::MinimalData => "should update password with minimal required data",
            Self::CompleteData => "should update password with complete data set",
            Self::ResponseTypes => "should return correct data types and formats in response",
            Self::ResponseHeaders => "should return correct response headers",
            Self::StatusCode => "should return status code 200",
            Self::CompletesWithinTimeLimit => "should complete request within acceptable time limit",
            Self::UserNameEcho => "should return same UserName from request in response",
            Self::NoUnexpectedFields => "should not contain unexpected fields in response",
            Self::MissingUserName => "should fail with missing UserName field",
            Self::MissingPassword => "should fail with missing Password field",
            Self::EmptyUserName => "should fail with empty UserName",
            Self::EmptyPassword => "should fail with empty Password",
            Self::TooShortPassword => "should fail with invalid password format",
            Self::NonAsciiPassword => "should fail with special characters in password",
            Self::EmptyBody => "should fail with empty request body",
            Self::MaxLengthUserName => "should fail with max length UserName",
            Self::MaxLengthPassword => "should fail with max length Password",
            Self::MissingAuthToken => "should fail with missing auth token",
            Self::InvalidAuthToken => "should fail with invalid auth token",
            Self::InvalidSessionId => "should fail with invalid session ID",
            Self::MissingSessionId => "should fail with missing session ID",
            Self::NoSensitiveDataInResponse => "should not expose sensitive data in response",
            Self::NoCaching => "should not cache sensitive endpoints",
            Self::NoServerInfoHeaders => "should not expose server information in headers",
            Self::ConsistentErrorFormat => "should return consistent error format",
            Self::NoSensitiveDataInErrors => "should not expose sensitive data in error messages",
        }
    }

    /// Group the scenario belongs to.
    #[must_use]
    pub const fn group(self) -> ScenarioGroup {
        match self {
            Self::ValidCredentials
            | Self::MinimalData
            | Self::CompleteData
            | Self::ResponseTypes
            | Self::ResponseHeaders
            | Self::StatusCode
            | Self::CompletesWithinTimeLimit
            | Self::UserNameEcho
            | Self::NoUnexpectedFields => ScenarioGroup::Positive,
            Self::MissingUserName
            | Self::MissingPassword
            | Self::EmptyUserName
            | Self::EmptyPassword
            | Self::TooShortPassword
            | Self::NonAsciiPassword
            | Self::EmptyBody
            | Self::MaxLengthUserName
            | Self::MaxLengthPassword => ScenarioGroup::Negative,
            Self::MissingAuthToken
            | Self::InvalidAuthToken
            | Self::InvalidSessionId
            | Self::MissingSessionId => ScenarioGroup::Authentication,
            Self::NoSensitiveDataInResponse | Self::NoCaching | Self::NoServerInfoHeaders => {
                ScenarioGroup::Security
            }
            Self::ConsistentErrorFormat | Self::NoSensitiveDataInErrors => {
                ScenarioGroup::ErrorHandling
            }
        }
    }

    /// Payload the scenario sends. Negative scenarios send raw JSON so that
    /// fields can be left out entirely.
    #[must_use]
    pub fn payload(self) -> Value {
        let base = fixtures::base_update_password();
        let request = match self {
            Self::MinimalData => fixtures::minimal_update_password(),
            Self::CompleteData => fixtures::complete_update_password(),
            Self::MissingUserName => return json!({"Password": "NewPassword123"}),
            Self::MissingPassword => return json!({"UserName": base.user_name}),
            Self::EmptyBody => return json!({}),
            Self::EmptyUserName | Self::ConsistentErrorFormat => base.with_user_name(""),
            Self::EmptyPassword | Self::NoSensitiveDataInErrors => base.with_password(""),
            Self::TooShortPassword => base.with_password("123"),
            Self::NonAsciiPassword => base.with_password("NewPassword123ščćžđ"),
            Self::MaxLengthUserName => base.with_user_name("a".repeat(MAX_FIELD_LEN)),
            Self::MaxLengthPassword => base.with_password("a".repeat(MAX_FIELD_LEN)),
            _ => fixtures::valid_update_password(),
        };
        json!(request)
    }

    /// Bearer token and session id the scenario sends.
    #[must_use]
    pub const fn credentials(self) -> (Option<&'static str>, Option<&'static str>) {
        match self {
            Self::MissingAuthToken => (None, None),
            Self::InvalidAuthToken => (Some(INVALID_AUTH_TOKEN), Some(VALID_SESSION_ID)),
            Self::InvalidSessionId => (Some(VALID_AUTH_TOKEN), Some(INVALID_SESSION_ID)),
            Self::MissingSessionId => (Some(VALID_AUTH_TOKEN), None),
            _ => (Some(VALID_AUTH_TOKEN), Some(VALID_SESSION_ID)),
        }
    }

    /// Runs the scenario against `service`.
    ///
    /// # Errors
    ///
    /// Returns the first hard failure: a rejection where success was
    /// expected, a transport error, or a missing body.
    pub async fn run(
        self,
        service: &UpdatePasswordService,
        soft: &mut SoftAssertions,
    ) -> ApplicationResult<()> {
        info!(scenario = self.name(), group = %self.group(), "running password update scenario");
        let payload = self.payload();
        let (auth_token, session_id) = self.credentials();
        let call = service.update_password(&payload, auth_token, session_id);

        match self.group() {
            ScenarioGroup::Positive | ScenarioGroup::Security => {
                let response = call.await?;
                validate_successful_response(soft, &response);
                self.check_success(soft, &response, &payload)
            }
            ScenarioGroup::Negative | ScenarioGroup::ErrorHandling => {
                let response = expect_rejection(call.await)?;
                validate_error_response(soft, &response);
                UpdatePasswordService::validate_error_body(soft, decoded(&response).as_ref())
            }
            ScenarioGroup::Authentication => {
                let response = expect_rejection(call.await)?;
                validate_auth_error_response(soft, &response);
                Ok(())
            }
        }
    }

    fn check_success(
        self,
        soft: &mut SoftAssertions,
        response: &ResponseSpec,
        payload: &Value,
    ) -> ApplicationResult<()> {
        let body = decoded(response);
        match self {
            Self::ValidCredentials | Self::MinimalData | Self::CompleteData => {
                UpdatePasswordService::validate_update_password_response(soft, body.as_ref())?;
            }
            Self::ResponseTypes => {
                soft.check(Assertion::IsJson, response);
                // every field must decode as a string
                response.json::<UpdatePasswordResponse>()?;
                for field in UpdatePasswordResponse::FIELDS {
                    soft.check(Assertion::non_empty_string(field), response);
                }
            }
            Self::ResponseHeaders => {
                soft.check(
                    Assertion::HeaderContains {
                        name: "content-type".to_string(),
                        text: "application/json".to_string(),
                    },
                    response,
                );
            }
            Self::CompletesWithinTimeLimit => {
                soft.check(
                    Assertion::ResponseTime {
                        max_ms: MAX_RESPONSE_TIME_MS,
                    },
                    response,
                );
            }
            Self::UserNameEcho => {
                let expected = payload.get("UserName").cloned().unwrap_or(Value::Null);
                soft.check(Assertion::field_equals("UserName", expected), response);
            }
            Self::NoUnexpectedFields => {
                soft.check(Assertion::exact_fields(&UpdatePasswordResponse::FIELDS), response);
            }
            Self::NoSensitiveDataInResponse => {
                soft.check(Assertion::body_not_contains("token"), response);
                soft.check(Assertion::body_not_contains("key"), response);
            }
            Self::NoCaching => {
                soft.check(
                    Assertion::HeaderExists {
                        name: "cache-control".to_string(),
                        value: Some("no-store".to_string()),
                    },
                    response,
                );
            }
            Self::NoServerInfoHeaders => {
                for name in ["x-powered-by", "server"] {
                    soft.check(
                        Assertion::HeaderAbsent {
                            name: name.to_string(),
                        },
                        response,
                    );
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authprobe_domain::UpdatePasswordRequest;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_partition_the_catalog() {
        let count = |group| {
            UpdatePasswordScenario::ALL
                .iter()
                .filter(|s| s.group() == group)
                .count()
        };
        assert_eq!(count(ScenarioGroup::Positive), 9);
        assert_eq!(count(ScenarioGroup::Negative), 9);
        assert_eq!(count(ScenarioGroup::Authentication), 4);
        assert_eq!(count(ScenarioGroup::Security), 3);
        assert_eq!(count(ScenarioGroup::ErrorHandling), 2);
    }

    #[test]
    fn test_negative_payloads_break_the_rules() {
        for scenario in UpdatePasswordScenario::ALL
            .into_iter()
            .filter(|s| matches!(s.group(), ScenarioGroup::Negative | ScenarioGroup::ErrorHandling))
        {
            assert!(
                UpdatePasswordRequest::from_value(&scenario.payload()).is_err(),
                "{scenario:?}"
            );
        }
    }

    #[test]
    fn test_positive_payloads_are_valid() {
        for scenario in UpdatePasswordScenario::ALL
            .into_iter()
            .filter(|s| matches!(s.group(), ScenarioGroup::Positive | ScenarioGroup::Security))
        {
            assert!(
                UpdatePasswordRequest::from_value(&scenario.payload()).is_ok(),
                "{scenario:?}"
            );
        }
    }

    #[test]
    fn test_payload_uses_wire_field_names() {
        assert_eq!(
            UpdatePasswordScenario::ValidCredentials.payload(),
            json!({"UserName": "testuser123", "Password": "NewSecurePassword123!"})
        );
        assert_eq!(
            UpdatePasswordScenario::TooShortPassword.payload(),
            json!({"UserName": "testuser123", "Password": "123"})
        );
    }

    #[test]
    fn test_missing_user_name_payload() {
        assert_eq!(
            UpdatePasswordScenario::MissingUserName.payload(),
            json!({"Password": "NewPassword123"})
        );
    }

    #[test]
    fn test_credentials() {
        assert_eq!(UpdatePasswordScenario::MissingAuthToken.credentials(), (None, None));
        assert_eq!(
            UpdatePasswordScenario::MissingSessionId.credentials(),
            (Some(VALID_AUTH_TOKEN), None)
        );
        assert_eq!(
            UpdatePasswordScenario::StatusCode.credentials(),
            (Some(VALID_AUTH_TOKEN), Some(VALID_SESSION_ID))
        );
    }
}
