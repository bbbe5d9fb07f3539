//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Every status the server answers with is handed back as a response; only
//! transport failures become errors.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use authprobe_application::ports::{HttpClient, HttpClientError, HttpFuture};
use authprobe_domain::request::{APPLICATION_JSON, CONTENT_TYPE};
use authprobe_domain::{Headers, HttpMethod, RequestSpec, ResponseSpec};
use reqwest::{Client, Method, Url};
use tracing::debug;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - User-Agent: "authprobe/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new HTTP client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("authprobe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Serializes the JSON body, adding `Content-Type` unless already set.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;

        let builder = if headers.contains(CONTENT_TYPE) {
            builder
        } else {
            builder.header(CONTENT_TYPE, APPLICATION_JSON)
        };
        Ok(builder.body(bytes))
    }

    /// Maps reqwest errors to domain `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout;
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return HttpClientError::InvalidHeader(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

/// Joins an error with its sources; reqwest keeps the root cause out of `Display`.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        let method = request.method;
        let url = request.url.clone();
        let headers = request.headers.clone();
        let body = request.body.clone();

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url);

            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(body) = body.as_ref().filter(|_| method.has_body()) {
                builder = Self::build_body(builder, body, &headers)?;
            }

            let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

            let status = response.status();
            let status_text = status.canonical_reason().unwrap_or_default().to_string();

            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            let duration = start.elapsed();
            debug!(%method, %url, status = status.as_u16(), elapsed = ?duration, "received response");

            Ok(
                ResponseSpec::new(status.as_u16(), response_headers, body_bytes, duration)
                    .with_status_text(status_text),
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_build_body_adds_json_content_type() {
        let client = Client::new();
        let request = ReqwestHttpClient::build_body(
            client.post("https://example.com"),
            &json!({"UserName": "a"}),
            &Headers::new(),
        )
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(
            request.headers().get("content-type").unwrap(),
            APPLICATION_JSON
        );
        assert_eq!(request.body().unwrap().as_bytes().unwrap(), br#"{"UserName":"a"}"#);
    }

    #[test]
    fn test_build_body_keeps_explicit_content_type() {
        let client = Client::new();
        let headers = Headers::new().with("content-type", "application/vnd.api+json");
        let request = ReqwestHttpClient::build_body(
            client.post("https://example.com"),
            &json!({}),
            &headers,
        )
        .unwrap()
        .build()
        .unwrap();

        // The header itself is applied from `headers` by `execute`.
        assert!(request.headers().get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_post_sends_headers_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/updatepassword"))
            .and(header("authorization", "Bearer abc"))
            .and(header("x-session-id", "s-1"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"UserName": "u", "Password": "NewPassword123"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Cache-Control", "no-store")
                    .set_body_json(json!({"UserName": "u"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestSpec::post(
            format!("{}/api/updatepassword", server.uri()),
            json!({"UserName": "u", "Password": "NewPassword123"}),
        )
        .with_headers(Headers::json().bearer(Some("abc")).session_id(Some("s-1")));

        let response = ReqwestHttpClient::new().unwrap().execute(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        assert_eq!(response.header("cache-control"), Some("no-store"));
        assert_eq!(response.json_value().unwrap(), json!({"UserName": "u"}));
    }

    #[tokio::test]
    async fn test_error_statuses_are_responses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"code": "unauthorized", "message": "unauthorized"})),
            )
            .mount(&server)
            .await;

        let request = RequestSpec::post(format!("{}/login", server.uri()), json!({}));
        let response = ReqwestHttpClient::new().unwrap().execute(&request).await.unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.status_text, "Unauthorized");
        assert!(!response.ok());
    }

    #[tokio::test]
    async fn test_get_sends_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let request = RequestSpec::get(format!("{}/health", server.uri()));
        let response = ReqwestHttpClient::new().unwrap().execute(&request).await.unwrap();
        assert_eq!(response.status, 204);
        assert!(response.text().is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Grab a free port, then close the listener so nothing accepts on it.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let request = RequestSpec::get(format!("http://127.0.0.1:{port}/"));
        let err = ReqwestHttpClient::new().unwrap().execute(&request).await.unwrap_err();
        assert!(matches!(
            err,
            HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let request = RequestSpec::get("not a url");
        let err = ReqwestHttpClient::new().unwrap().execute(&request).await.unwrap_err();
        assert!(matches!(err, HttpClientError::InvalidUrl(_)));
    }
}
