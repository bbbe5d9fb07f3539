//! Literal payloads and credentials used by the scenarios.

use authprobe_domain::{LoginRequest, UpdatePasswordRequest};

/// User id sent in every login payload.
pub const LOGIN_USER_ID: i64 = 111;
/// Optional record id of the complete login payload.
pub const LOGIN_RECORD_ID: i64 = 1234;
/// Optional title of the complete login payload.
pub const LOGIN_TITLE: &str = "some title";
/// Token the login endpoint accepts.
pub const LOGIN_AUTH_TOKEN: &str = "1234wer";
/// Session id sent with every login payload.
pub const LOGIN_SESSION_ID: &str = "1234erd";
/// Token the login endpoint rejects.
pub const INVALID_LOGIN_TOKEN: &str = "invalid_token_xyz";

/// Bearer token accepted by the password update endpoint.
pub const VALID_AUTH_TOKEN: &str = "valid_auth_token_123";
/// Bearer token rejected by the password update endpoint.
pub const INVALID_AUTH_TOKEN: &str = "invalid_token_xyz";
/// Session id accepted by the password update endpoint.
pub const VALID_SESSION_ID: &str = "valid_session_id_456";
/// Session id rejected by the password update endpoint.
pub const INVALID_SESSION_ID: &str = "invalid_session_xyz";

/// Login payload with only the required fields.
#[must_use]
pub fn minimum_login_request() -> LoginRequest {
    LoginRequest::new(LOGIN_USER_ID, LOGIN_AUTH_TOKEN, LOGIN_SESSION_ID)
}

/// Login payload with every optional field set.
#[must_use]
pub fn complete_login_request() -> LoginRequest {
    minimum_login_request()
        .with_id(LOGIN_RECORD_ID)
        .with_title(LOGIN_TITLE)
}

/// Starting point for every password update payload.
#[must_use]
pub fn base_update_password() -> UpdatePasswordRequest {
    UpdatePasswordRequest::new("testuser123", "NewSecurePassword123!")
}

/// A valid password update payload.
#[must_use]
pub fn valid_update_password() -> UpdatePasswordRequest {
    base_update_password()
}

/// Valid payload with the shortest password the suite uses.
#[must_use]
pub fn minimal_update_password() -> UpdatePasswordRequest {
    base_update_password().with_password("NewPassword123")
}

/// Valid payload carrying every field.
#[must_use]
pub fn complete_update_password() -> UpdatePasswordRequest {
    base_update_password()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_login_payloads() {
        assert_eq!(
            serde_json::to_value(minimum_login_request()).unwrap(),
            json!({"userId": 111, "authToken": "1234wer", "sessionId": "1234erd"})
        );
        assert_eq!(
            serde_json::to_value(complete_login_request()).unwrap(),
            json!({
                "userId": 111,
                "id": 1234,
                "title": "some title",
                "authToken": "1234wer",
                "sessionId": "1234erd"
            })
        );
    }

    #[test]
    fn test_update_password_payloads_are_valid() {
        for payload in [
            valid_update_password(),
            minimal_update_password(),
            complete_update_password(),
        ] {
            assert!(payload.validate().is_ok(), "{payload:?}");
        }
        assert_eq!(minimal_update_password().password, "NewPassword123");
    }
}
