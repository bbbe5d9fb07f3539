//! Stub login and password update endpoints backed by wiremock.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use authprobe::SuiteRunner;
use authprobe_application::{BaseClient, LoginService, UpdatePasswordService};
use authprobe_domain::{ErrorBody, LoginResponse, UpdatePasswordRequest, UpdatePasswordResponse};
use authprobe_infrastructure::ReqwestHttpClient;
use chrono::Utc;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const LOGIN_PATH: &str = "/login";
pub const UPDATE_PASSWORD_PATH: &str = "/api/updatepassword";

const ACCEPTED_LOGIN_TOKEN: &str = "1234wer";
const ACCEPTED_AUTH_TOKEN: &str = "valid_auth_token_123";
const ACCEPTED_SESSION_ID: &str = "valid_session_id_456";

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

fn bearer(request: &Request) -> Option<&str> {
    header(request, "authorization").and_then(|v| v.strip_prefix("Bearer "))
}

fn error(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(ErrorBody::new(code, message))
}

/// Accepts token `1234wer` when header and body agree, echoing the caller.
struct LoginResponder;

impl Respond for LoginResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return error(400, "bad_request", "malformed body");
        };
        let token = body["authToken"].as_str();
        let session = body["sessionId"].as_str();

        let authorized = token == Some(ACCEPTED_LOGIN_TOKEN)
            && bearer(request) == token
            && header(request, "x-session-id") == session;
        if !authorized {
            return error(401, "unauthorized", "unauthorized");
        }

        ResponseTemplate::new(200).set_body_json(LoginResponse {
            username: body["userId"].to_string(),
            password: "hashed-secret".to_string(),
            auth_token: ACCEPTED_LOGIN_TOKEN.to_string(),
            session_id: session.unwrap_or_default().to_string(),
            device_id: "device-0001".to_string(),
            member_number: "M-000111".to_string(),
        })
    }
}

/// Enforces credentials first, then the payload rules.
struct UpdatePasswordResponder;

impl Respond for UpdatePasswordResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if bearer(request) != Some(ACCEPTED_AUTH_TOKEN)
            || header(request, "x-session-id") != Some(ACCEPTED_SESSION_ID)
        {
            return error(401, "unauthorized", "invalid credentials");
        }

        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return error(400, "VALIDATION_ERROR", "malformed body");
        };
        match UpdatePasswordRequest::from_value(&body) {
            Ok(payload) => ResponseTemplate::new(200)
                .insert_header("cache-control", "no-store")
                .set_body_json(UpdatePasswordResponse {
                    user_name: payload.user_name,
                    old_password: "OldSecurePassword1!".to_string(),
                    new_password: payload.password,
                    date: Utc::now().to_rfc3339(),
                }),
            Err(err) => error(400, "VALIDATION_ERROR", &err.to_string()),
        }
    }
}

/// A running stub of both endpoints.
pub struct StubApi {
    pub server: MockServer,
}

impl StubApi {
    /// Starts a stub honouring the full contract.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(LoginResponder)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(UPDATE_PASSWORD_PATH))
            .respond_with(UpdatePasswordResponder)
            .mount(&server)
            .await;
        Self { server }
    }

    /// Starts a stub answering every request with `template`.
    pub async fn answering(template: ResponseTemplate) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(template)
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    pub fn login_url(&self) -> String {
        format!("{}{LOGIN_PATH}", self.server.uri())
    }

    pub fn client(&self) -> BaseClient {
        BaseClient::new(Arc::new(ReqwestHttpClient::new().unwrap()))
    }

    pub fn login_service(&self) -> LoginService {
        LoginService::new(self.client(), self.login_url())
    }

    pub fn update_password_service(&self) -> UpdatePasswordService {
        UpdatePasswordService::new(self.client(), &self.base_url())
    }

    pub fn runner(&self) -> SuiteRunner {
        SuiteRunner::new()
            .with_login(self.login_service())
            .with_update_password(self.update_password_service())
    }
}
