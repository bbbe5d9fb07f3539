//! In-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use authprobe_domain::{RequestSpec, ResponseSpec};

use crate::ports::{HttpClient, HttpClientError, HttpFuture};

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
pub struct FakeHttpClient {
    responses: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

#[allow(clippy::unwrap_used)]
impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response.
    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = ResponseSpec::new(
            status,
            headers,
            body.to_string().into_bytes(),
            Duration::from_millis(5),
        );
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queues a transport failure.
    pub fn fail(self, error: HttpClientError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

#[allow(clippy::unwrap_used)]
impl HttpClient for FakeHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpClientError::Other("no canned response".into())));
        Box::pin(async move { next })
    }
}
