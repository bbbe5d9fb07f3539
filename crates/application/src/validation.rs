//! Generic response checks shared by every endpoint.
//!
//! All of these record into a [`SoftAssertions`] unit and never abort.

use authprobe_domain::{Assertion, ResponseSpec, SoftAssertions};

/// Status expected by [`validate_error_response`].
pub const DEFAULT_ERROR_STATUS: u16 = 400;

/// Status 200 and ok.
pub fn validate_successful_response(soft: &mut SoftAssertions, response: &ResponseSpec) {
    soft.check(Assertion::status(200), response);
    soft.check(Assertion::Ok { expected: true }, response);
}

/// Status [`DEFAULT_ERROR_STATUS`] and not ok.
pub fn validate_error_response(soft: &mut SoftAssertions, response: &ResponseSpec) {
    validate_error_status(soft, response, DEFAULT_ERROR_STATUS);
}

/// Status `expected_status` and not ok.
pub fn validate_error_status(soft: &mut SoftAssertions, response: &ResponseSpec, expected_status: u16) {
    soft.check(Assertion::status(expected_status), response);
    soft.check(Assertion::Ok { expected: false }, response);
}

/// Status 401 and not ok.
pub fn validate_auth_error_response(soft: &mut SoftAssertions, response: &ResponseSpec) {
    validate_error_status(soft, response, 401);
}

/// Status 403 and not ok.
pub fn validate_forbidden_response(soft: &mut SoftAssertions, response: &ResponseSpec) {
    validate_error_status(soft, response, 403);
}
