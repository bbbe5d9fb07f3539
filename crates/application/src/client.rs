//! Base request wrapper shared by the endpoint services.

use std::fmt;
use std::sync::Arc;

use authprobe_domain::{DomainError, Headers, RequestSpec, ResponseSpec};
use serde::Serialize;
use tracing::debug;

use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Thin wrapper over an injected [`HttpClient`].
///
/// Never turns a non-2xx status into an error: the response is returned for
/// the caller to inspect. Errors come only from request validation and the
/// transport itself.
#[derive(Clone)]
pub struct BaseClient {
    transport: Arc<dyn HttpClient>,
}

impl fmt::Debug for BaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseClient").finish_non_exhaustive()
    }
}

impl BaseClient {
    /// Creates a client over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpClient>) -> Self {
        Self { transport }
    }

    /// Issues a GET to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the transport fails.
    pub async fn get(&self, endpoint: &str) -> ApplicationResult<ResponseSpec> {
        self.send(RequestSpec::get(endpoint)).await
    }

    /// Issues a POST to `endpoint` with `data` as the JSON body and the
    /// optional `headers` applied.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not serialize, the URL or headers are
    /// invalid, or the transport fails.
    pub async fn post<T>(
        &self,
        endpoint: &str,
        data: &T,
        headers: Option<&Headers>,
    ) -> ApplicationResult<ResponseSpec>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_value(data).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        let request = RequestSpec::post(endpoint, body).with_headers(headers.cloned().unwrap_or_default());
        self.send(request).await
    }

    async fn send(&self, request: RequestSpec) -> ApplicationResult<ResponseSpec> {
        request.validate()?;
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.execute(&request).await?;

        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            elapsed = %response.duration_display(),
            "received response"
        );
        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::fake::FakeHttpClient;
    use crate::ports::HttpClientError;
    use authprobe_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_post_sends_json_body_and_headers() {
        let fake = Arc::new(FakeHttpClient::new().respond(200, json!({"ok": true})));
        let client = BaseClient::new(fake.clone());

        let headers = Headers::json().with("X-Trace", "abc");
        let response = client
            .post("http://localhost/api", &json!({"a": 1}), Some(&headers))
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let sent = fake.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].body, Some(json!({"a": 1})));
        assert_eq!(sent[0].headers.get("x-trace"), Some("abc"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_returned_not_raised() {
        let fake = Arc::new(FakeHttpClient::new().respond(500, json!({"code": "E"})));
        let client = BaseClient::new(fake);

        let response = client.get("http://localhost/health").await.unwrap();
        assert_eq!(response.status, 500);
        assert!(!response.ok());
    }

    #[tokio::test]
    async fn test_post_without_headers() {
        let fake = Arc::new(FakeHttpClient::new().respond(200, json!({})));
        let client = BaseClient::new(fake.clone());

        client.post("http://localhost/api", &json!({}), None).await.unwrap();
        assert!(fake.requests()[0].headers.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let fake = Arc::new(FakeHttpClient::new().fail(HttpClientError::ConnectionRefused {
            host: "localhost".into(),
            port: 1,
        }));
        let client = BaseClient::new(fake);

        let err = client.get("http://localhost:1/").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Http(HttpClientError::ConnectionRefused { .. })));
    }

    #[tokio::test]
    async fn test_invalid_url_never_reaches_transport() {
        let fake = Arc::new(FakeHttpClient::new());
        let client = BaseClient::new(fake.clone());

        let err = client.get("not a url").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::InvalidUrl(_))));
        assert!(fake.requests().is_empty());
    }
}
