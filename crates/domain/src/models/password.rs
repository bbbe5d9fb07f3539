//! Password update payloads and the payload rules the endpoint enforces.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Exclusive upper bound on the length of `UserName` and `Password`.
pub const MAX_FIELD_LEN: usize = 255;

/// Minimum length of `Password`.
pub const MIN_PASSWORD_LEN: usize = 8;

const USER_NAME: &str = "UserName";
const PASSWORD: &str = "Password";

/// Password update request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    /// Account whose password changes.
    #[serde(rename = "UserName")]
    pub user_name: String,
    /// New password.
    #[serde(rename = "Password")]
    pub password: String,
}

impl UpdatePasswordRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Returns a copy with a different user name.
    #[must_use]
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Returns a copy with a different password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Reads a request out of an arbitrary JSON body and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] for an absent field,
    /// [`DomainError::InvalidBody`] for a non-object body or a non-string
    /// field, and any error from [`Self::validate`].
    pub fn from_value(body: &serde_json::Value) -> DomainResult<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| DomainError::InvalidBody("request body must be a JSON object".into()))?;

        let field = |name: &'static str| -> DomainResult<String> {
            match object.get(name) {
                None | Some(serde_json::Value::Null) => Err(DomainError::MissingField(name)),
                Some(serde_json::Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(DomainError::InvalidBody(format!("field {name} must be a string"))),
            }
        };

        let request = Self::new(field(USER_NAME)?, field(PASSWORD)?);
        request.validate()?;
        Ok(request)
    }

    /// Checks the payload rules: both fields non-empty and shorter than
    /// [`MAX_FIELD_LEN`]; the password at least [`MIN_PASSWORD_LEN`] long and
    /// made of printable ASCII only.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> DomainResult<()> {
        check_length(USER_NAME, &self.user_name, 1)?;
        check_length(PASSWORD, &self.password, MIN_PASSWORD_LEN)?;
        if !self.password.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
            return Err(DomainError::UnsupportedCharacters(PASSWORD));
        }
        Ok(())
    }
}

fn check_length(field: &'static str, value: &str, min: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(DomainError::EmptyField(field));
    }
    if len < min {
        return Err(DomainError::FieldTooShort { field, min });
    }
    if len >= MAX_FIELD_LEN {
        return Err(DomainError::FieldTooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(())
}

/// Password update response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePasswordResponse {
    /// Echo of the request's user name.
    #[serde(rename = "UserName")]
    pub user_name: String,
    /// Previous password.
    #[serde(rename = "OldPassword")]
    pub old_password: String,
    /// New password.
    #[serde(rename = "NewPassword")]
    pub new_password: String,
    /// Change timestamp as reported by the server.
    #[serde(rename = "Date")]
    pub date: String,
}

impl UpdatePasswordResponse {
    /// Exact set of JSON fields in a password update response.
    pub const FIELDS: [&'static str; 4] = ["UserName", "OldPassword", "NewPassword", "Date"];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn base() -> UpdatePasswordRequest {
        UpdatePasswordRequest::new("testuser123", "NewSecurePassword123!")
    }

    #[test]
    fn test_serializes_with_wire_names() {
        assert_eq!(
            serde_json::to_value(base()).unwrap(),
            json!({"UserName": "testuser123", "Password": "NewSecurePassword123!"})
        );
    }

    #[test]
    fn test_valid_payloads() {
        assert!(base().validate().is_ok());
        assert!(base().with_password("NewPassword123").validate().is_ok());
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(
            base().with_user_name("").validate(),
            Err(DomainError::EmptyField("UserName"))
        );
        assert_eq!(
            base().with_password("").validate(),
            Err(DomainError::EmptyField("Password"))
        );
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            base().with_user_name("a".repeat(255)).validate(),
            Err(DomainError::FieldTooLong {
                field: "UserName",
                max: MAX_FIELD_LEN
            })
        );
        assert!(base().with_user_name("a".repeat(254)).validate().is_ok());
        assert!(matches!(
            base().with_password("a".repeat(255)).validate(),
            Err(DomainError::FieldTooLong { .. })
        ));
        assert_eq!(
            base().with_password("123").validate(),
            Err(DomainError::FieldTooShort {
                field: "Password",
                min: MIN_PASSWORD_LEN
            })
        );
    }

    #[test]
    fn test_non_ascii_password() {
        assert_eq!(
            base().with_password("NewPassword123ščćžđ").validate(),
            Err(DomainError::UnsupportedCharacters("Password"))
        );
    }

    #[test]
    fn test_from_value_missing_fields() {
        assert_eq!(
            UpdatePasswordRequest::from_value(&json!({"Password": "NewPassword123"})),
            Err(DomainError::MissingField("UserName"))
        );
        assert_eq!(
            UpdatePasswordRequest::from_value(&json!({"UserName": "testuser123"})),
            Err(DomainError::MissingField("Password"))
        );
        assert_eq!(
            UpdatePasswordRequest::from_value(&json!({})),
            Err(DomainError::MissingField("UserName"))
        );
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(matches!(
            UpdatePasswordRequest::from_value(&json!([1, 2])),
            Err(DomainError::InvalidBody(_))
        ));
        assert!(matches!(
            UpdatePasswordRequest::from_value(&json!({"UserName": 5, "Password": "x"})),
            Err(DomainError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_validation_messages_do_not_leak_field_values() {
        let err = base().with_password("").validate().unwrap_err().to_string();
        assert!(!err.contains("password"));
        assert!(!err.contains("token"));
    }
}
