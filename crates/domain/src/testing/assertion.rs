//! Assertions over HTTP responses and decoded JSON bodies.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AssertionResult;
use crate::response::ResponseSpec;

/// What an assertion is evaluated against.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A full HTTP response. Body assertions parse its body as JSON.
    Response(&'a ResponseSpec),
    /// An already decoded JSON body.
    Body(&'a Value),
}

impl<'a> From<&'a ResponseSpec> for Subject<'a> {
    fn from(response: &'a ResponseSpec) -> Self {
        Self::Response(response)
    }
}

impl<'a> From<&'a Value> for Subject<'a> {
    fn from(body: &'a Value) -> Self {
        Self::Body(body)
    }
}

/// A single check against a response or a body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check the ok (2xx) flag of the response.
    Ok {
        /// Expected flag.
        expected: bool,
    },
    /// Check response time.
    ResponseTime {
        /// Maximum allowed time in milliseconds.
        max_ms: u64,
    },
    /// Check header exists and optionally its value.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value.
        value: Option<String>,
    },
    /// Check header value contains text.
    HeaderContains {
        /// Header name (case-insensitive).
        name: String,
        /// Text to search for.
        text: String,
    },
    /// Check header is not sent.
    HeaderAbsent {
        /// Header name (case-insensitive).
        name: String,
    },
    /// Check the body text contains a substring.
    BodyContains {
        /// Text to search for.
        text: String,
        /// Case-insensitive search.
        #[serde(default)]
        ignore_case: bool,
    },
    /// Check the body text does not contain a substring.
    BodyNotContains {
        /// Text that must not appear.
        text: String,
    },
    /// Check body is valid JSON.
    IsJson,
    /// Check a top-level JSON field exists.
    FieldPresent {
        /// Field name.
        field: String,
    },
    /// Check a top-level JSON field equals a value.
    FieldEquals {
        /// Field name.
        field: String,
        /// Expected value.
        expected: Value,
    },
    /// Check a top-level JSON field is a non-empty string.
    NonEmptyString {
        /// Field name.
        field: String,
    },
    /// Check the JSON object has exactly these fields.
    ExactFields {
        /// Expected field names, in any order.
        fields: Vec<String>,
    },
}

impl Assertion {
    /// Status code equals `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode { expected: code }
    }

    /// Field `field` exists.
    #[must_use]
    pub fn field_present(field: impl Into<String>) -> Self {
        Self::FieldPresent {
            field: field.into(),
        }
    }

    /// Field `field` equals `expected`.
    #[must_use]
    pub fn field_equals(field: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::FieldEquals {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Field `field` is a non-empty string.
    #[must_use]
    pub fn non_empty_string(field: impl Into<String>) -> Self {
        Self::NonEmptyString {
            field: field.into(),
        }
    }

    /// The object has exactly `fields`.
    #[must_use]
    pub fn exact_fields(fields: &[&str]) -> Self {
        Self::ExactFields {
            fields: fields.iter().map(ToString::to_string).collect(),
        }
    }

    /// Body does not contain `text`.
    #[must_use]
    pub fn body_not_contains(text: impl Into<String>) -> Self {
        Self::BodyNotContains { text: text.into() }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::Ok { expected: true } => "Response is ok".to_string(),
            Self::Ok { expected: false } => "Response is not ok".to_string(),
            Self::ResponseTime { max_ms } => format!("Response time <= {max_ms}ms"),
            Self::HeaderExists {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::HeaderExists { name, value: None } => format!("Header '{name}' exists"),
            Self::HeaderContains { name, text } => format!("Header '{name}' contains '{text}'"),
            Self::HeaderAbsent { name } => format!("Header '{name}' is absent"),
            Self::BodyContains { text, .. } => format!("Body contains '{text}'"),
            Self::BodyNotContains { text } => format!("Body does not contain '{text}'"),
            Self::IsJson => "Body is valid JSON".to_string(),
            Self::FieldPresent { field } => format!("Field '{field}' is present"),
            Self::FieldEquals { field, expected } => format!("Field '{field}' equals {expected}"),
            Self::NonEmptyString { field } => format!("Field '{field}' is a non-empty string"),
            Self::ExactFields { fields } => format!("Fields are exactly [{}]", fields.join(", ")),
        }
    }

    /// Evaluates this assertion.
    ///
    /// Response-level checks (status, headers, timing) fail against a bare
    /// body. Field checks against a response parse its body as JSON first.
    #[must_use]
    pub fn evaluate(&self, subject: Subject<'_>) -> AssertionResult {
        match self {
            Self::StatusCode { expected } => self.on_response(subject, |r| {
                let actual = r.status;
                if actual == *expected {
                    self.pass(actual.to_string())
                } else {
                    self.fail(
                        actual.to_string(),
                        format!("Expected status = {expected}, got {actual}"),
                    )
                }
            }),
            Self::Ok { expected } => self.on_response(subject, |r| {
                let actual = r.ok();
                if actual == *expected {
                    self.pass(actual.to_string())
                } else {
                    self.fail(
                        actual.to_string(),
                        format!("Expected ok() to be {expected}, status was {}", r.status),
                    )
                }
            }),
            Self::ResponseTime { max_ms } => self.on_response(subject, |r| {
                let actual_ms = u64::try_from(r.duration.as_millis()).unwrap_or(u64::MAX);
                if actual_ms <= *max_ms {
                    self.pass(format!("{actual_ms}ms"))
                } else {
                    self.fail(
                        format!("{actual_ms}ms"),
                        format!("Response took {actual_ms}ms, expected <= {max_ms}ms"),
                    )
                }
            }),
            Self::HeaderExists { name, value } => {
                self.on_response(subject, |r| match (r.header(name), value) {
                    (Some(actual), Some(expected)) if actual == expected => self.pass(actual),
                    (Some(actual), Some(expected)) => self.fail(
                        actual,
                        format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
                    ),
                    (Some(actual), None) => self.pass(actual),
                    (None, _) => AssertionResult::fail(self.clone(), format!("Header '{name}' not found")),
                })
            }
            Self::HeaderContains { name, text } => {
                self.on_response(subject, |r| match r.header(name) {
                    Some(actual) if actual.contains(text.as_str()) => self.pass(actual),
                    Some(actual) => self.fail(
                        actual,
                        format!("Header '{name}' value '{actual}' does not contain '{text}'"),
                    ),
                    None => AssertionResult::fail(self.clone(), format!("Header '{name}' not found")),
                })
            }
            Self::HeaderAbsent { name } => self.on_response(subject, |r| match r.header(name) {
                Some(actual) => self.fail(actual, format!("Header '{name}' should not be sent")),
                None => AssertionResult::pass(self.clone()),
            }),
            Self::BodyContains { text, ignore_case } => {
                let body = body_text(subject);
                let found = if *ignore_case {
                    body.to_lowercase().contains(&text.to_lowercase())
                } else {
                    body.contains(text.as_str())
                };
                if found {
                    AssertionResult::pass(self.clone())
                } else {
                    self.fail(preview(&body), format!("Body does not contain '{text}'"))
                }
            }
            Self::BodyNotContains { text } => {
                let body = body_text(subject);
                if body.contains(text.as_str()) {
                    self.fail(preview(&body), format!("Body contains '{text}'"))
                } else {
                    AssertionResult::pass(self.clone())
                }
            }
            Self::IsJson => self.on_json(subject, |_| AssertionResult::pass(self.clone())),
            Self::FieldPresent { field } => self.on_json(subject, |json| match json.get(field) {
                Some(value) => self.pass(value.to_string()),
                None => AssertionResult::fail(self.clone(), format!("Field '{field}' is missing")),
            }),
            Self::FieldEquals { field, expected } => {
                self.on_json(subject, |json| match json.get(field) {
                    Some(value) if value == expected => self.pass(value.to_string()),
                    Some(value) => self.fail(
                        value.to_string(),
                        format!("Field '{field}' mismatch: expected {expected}, got {value}"),
                    ),
                    None => AssertionResult::fail(self.clone(), format!("Field '{field}' is missing")),
                })
            }
            Self::NonEmptyString { field } => {
                self.on_json(subject, |json| match json.get(field) {
                    Some(Value::String(s)) if !s.is_empty() => self.pass(s.as_str()),
                    Some(Value::String(_)) => {
                        self.fail("\"\"", format!("Field '{field}' is an empty string"))
                    }
                    Some(other) => self.fail(
                        other.to_string(),
                        format!("Field '{field}' is {}, expected a string", json_type(other)),
                    ),
                    None => AssertionResult::fail(self.clone(), format!("Field '{field}' is missing")),
                })
            }
            Self::ExactFields { fields } => self.on_json(subject, |json| {
                let Some(object) = json.as_object() else {
                    return self.fail(
                        json_type(json),
                        "Body is not a JSON object".to_string(),
                    );
                };
                let missing: Vec<&str> = fields
                    .iter()
                    .filter(|f| !object.contains_key(f.as_str()))
                    .map(String::as_str)
                    .collect();
                let unexpected: Vec<&str> = object
                    .keys()
                    .filter(|k| !fields.contains(k))
                    .map(String::as_str)
                    .collect();
                let actual = object.keys().cloned().collect::<Vec<_>>().join(", ");
                if missing.is_empty() && unexpected.is_empty() {
                    self.pass(actual)
                } else {
                    self.fail(
                        actual,
                        format!(
                            "Missing fields [{}], unexpected fields [{}]",
                            missing.join(", "),
                            unexpected.join(", ")
                        ),
                    )
                }
            }),
        }
    }

    fn pass(&self, actual: impl Into<String>) -> AssertionResult {
        AssertionResult::pass_with_value(self.clone(), actual)
    }

    fn fail(&self, actual: impl Into<String>, error: String) -> AssertionResult {
        AssertionResult::fail_with_value(self.clone(), actual, error)
    }

    fn on_response(
        &self,
        subject: Subject<'_>,
        check: impl FnOnce(&ResponseSpec) -> AssertionResult,
    ) -> AssertionResult {
        match subject {
            Subject::Response(response) => check(response),
            Subject::Body(_) => AssertionResult::fail(
                self.clone(),
                "Assertion requires an HTTP response, got a decoded body",
            ),
        }
    }

    fn on_json(
        &self,
        subject: Subject<'_>,
        check: impl FnOnce(&Value) -> AssertionResult,
    ) -> AssertionResult {
        match subject {
            Subject::Body(body) => check(body),
            Subject::Response(response) => {
                match serde_json::from_str::<Value>(&response.body) {
                    Ok(json) => check(&json),
                    Err(e) => self.fail(
                        preview(&response.body),
                        format!("Failed to parse body as JSON: {e}"),
                    ),
                }
            }
        }
    }
}

/// Body text as the server sent it, or the serialized form of a decoded body.
fn body_text(subject: Subject<'_>) -> Cow<'_, str> {
    match subject {
        Subject::Response(response) => Cow::Borrowed(response.body.as_str()),
        Subject::Body(body) => Cow::Owned(body.to_string()),
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
