//! Login process scenarios.

use authprobe_application::{ApplicationResult, LoginService};
use authprobe_domain::{Assertion, LoginRequest, LoginResponse, SoftAssertions};
use tracing::info;

use super::{ScenarioGroup, decoded, expect_rejection};
use crate::fixtures;

/// Login endpoint scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginScenario {
    /// Required fields only.
    MinimumData,
    /// Every optional field set.
    CompleteData,
    /// Every response field is a non-empty string.
    ResponseTypes,
    /// JSON content type.
    ResponseHeaders,
    /// Status 200.
    StatusCode,
    /// Token, session and user id are echoed.
    RequestEcho,
    /// A wrong token is rejected with 401.
    InvalidToken,
    /// No field beyond the documented six.
    NoUnexpectedFields,
}

impl LoginScenario {
    /// Every login scenario.
    pub const ALL: [Self; 8] = [
        Self::MinimumData,
        Self::CompleteData,
        Self::ResponseTypes,
        Self::ResponseHeaders,
        Self::StatusCode,
        Self::RequestEcho,
        Self::InvalidToken,
        Self::NoUnexpectedFields,
    ];

    /// Short identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinimumData => "minimum-data",
            Self::CompleteData => "complete-data",
            Self::ResponseTypes => "response-types",
            Self::ResponseHeaders => "response-headers",
            Self::StatusCode => "status-code",
            Self::RequestEcho => "request-echo",
            Self::InvalidToken => "invalid-token",
            Self::NoUnexpectedFields => "no-unexpected-fields",
        }
    }

    /// What the scenario asserts.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MinimumData => "should successfully login with minimum required data",
            Self::CompleteData => "should successfully login with complete data",
            Self::ResponseTypes => "should return correct data types and formats in response",
            Self::ResponseHeaders => "should return correct response headers",
            Self::StatusCode => "should return correct status code",
            Self::RequestEcho => "should return same data values from request in response",
            Self::InvalidToken => "should fail with invalid auth token",
            Self::NoUnexpectedFields => "should not contain unexpected fields in response",
        }
    }

    /// Group the scenario belongs to.
    #[must_use]
    pub const fn group(self) -> ScenarioGroup {
        match self {
            Self::InvalidToken => ScenarioGroup::Authentication,
            _ => ScenarioGroup::Positive,
        }
    }

    /// Runs the scenario against `service`.
    ///
    /// # Errors
    ///
    /// Returns the first hard failure: a rejected login where success was
    /// expected, a missing body, or a failed response contract check.
    pub async fn run(self, service: &LoginService, soft: &mut SoftAssertions) -> ApplicationResult<()> {
        info!(scenario = self.name(), "running login scenario");
        match self {
            Self::MinimumData => login_and_validate(service, soft, &fixtures::minimum_login_request()).await,
            Self::CompleteData => login_and_validate(service, soft, &fixtures::complete_login_request()).await,
            Self::ResponseTypes => {
                let response = service.login_process_post(&fixtures::complete_login_request()).await?;
                soft.check(Assertion::Ok { expected: true }, &response);
                soft.check(Assertion::IsJson, &response);
                response.json::<LoginResponse>()?;
                for field in LoginResponse::FIELDS {
                    soft.check(Assertion::non_empty_string(field), &response);
                }
                Ok(())
            }
            Self::ResponseHeaders => {
                let response = service.login_process_post(&fixtures::complete_login_request()).await?;
                soft.check(Assertion::Ok { expected: true }, &response);
                soft.check(
                    Assertion::HeaderContains {
                        name: "content-type".to_string(),
                        text: "application/json".to_string(),
                    },
                    &response,
                );
                Ok(())
            }
            Self::StatusCode => {
                let response = service.login_process_post(&fixtures::complete_login_request()).await?;
                soft.check(Assertion::status(200), &response);
                soft.check(Assertion::Ok { expected: true }, &response);
                Ok(())
            }
            Self::RequestEcho => {
                let request = fixtures::complete_login_request();
                let response = service.login_process_post(&request).await?;
                let body = response.json_value()?;
                soft.check(Assertion::Ok { expected: true }, &response);
                soft.check(Assertion::field_equals("authToken", request.auth_token.as_str()), &body);
                soft.check(Assertion::field_equals("sessionId", request.session_id.as_str()), &body);
                soft.check(Assertion::field_equals("username", request.expected_username()), &body);
                Ok(())
            }
            Self::InvalidToken => {
                let request = LoginRequest {
                    auth_token: fixtures::INVALID_LOGIN_TOKEN.to_string(),
                    ..fixtures::complete_login_request()
                };
                let response = expect_rejection(service.login_process_post(&request).await)?;
                soft.check(Assertion::Ok { expected: false }, &response);
                soft.check(Assertion::status(401), &response);
                soft.check(
                    Assertion::BodyContains {
                        text: "unauthorized".to_string(),
                        ignore_case: false,
                    },
                    &response,
                );
                Ok(())
            }
            Self::NoUnexpectedFields => {
                let response = service.login_process_post(&fixtures::complete_login_request()).await?;
                soft.check(Assertion::Ok { expected: true }, &response);
                soft.check(Assertion::exact_fields(&LoginResponse::FIELDS), &response);
                Ok(())
            }
        }
    }
}

async fn login_and_validate(
    service: &LoginService,
    soft: &mut SoftAssertions,
    request: &LoginRequest,
) -> ApplicationResult<()> {
    let response = service.login_process_post(request).await?;
    soft.check(Assertion::Ok { expected: true }, &response);
    LoginService::validate_login_process_response(decoded(&response).as_ref(), request)
}
