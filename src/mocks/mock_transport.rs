//! Mock HTTP transport for testing

use crate::errors::{OpenAIError, OpenAIResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock HTTP transport that replays queued responses in order
#[derive(Clone)]
pub struct MockHttpTransport {
    inner: Arc<Mutex<MockHttpTransportInner>>,
}

struct MockHttpTransportInner {
    responses: VecDeque<OpenAIResult<serde_json::Value>>,
    file_upload_responses: VecDeque<OpenAIResult<serde_json::Value>>,
    requests: Vec<MockRequest>,
}

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub file_name: Option<String>,
    pub purpose: Option<String>,
    pub upload_size: Option<usize>,
}

impl MockHttpTransport {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockHttpTransportInner {
                responses: VecDeque::new(),
                file_upload_responses: VecDeque::new(),
                requests: Vec::new(),
            })),
        }
    }

    /// Add a successful JSON response
    pub fn with_json_response(self, response: serde_json::Value) -> Self {
        self.push_response(Ok(response));
        self
    }

    /// Add an error response
    pub fn with_error_response(self, error: OpenAIError) -> Self {
        self.push_response(Err(error));
        self
    }

    /// Add a file upload response
    pub fn with_file_upload_response(self, response: OpenAIResult<serde_json::Value>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .file_upload_responses
            .push_back(response);
        self
    }

    pub fn push_response(&self, response: OpenAIResult<serde_json::Value>) {
        self.inner.lock().unwrap().responses.push_back(response);
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Requests whose path starts with `prefix`, in send order
    pub fn requests_to(&self, prefix: &str) -> Vec<MockRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }

    /// Verify that a request was made with the given method and path
    pub fn verify_request(&self, method: Method, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .any(|r| r.method == method && r.path == path)
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn remaining_responses(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.responses.len() + inner.file_upload_responses.len()
    }

    fn record(&self, request: MockRequest) {
        self.inner.lock().unwrap().requests.push(request);
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        _headers: HeaderMap,
    ) -> OpenAIResult<serde_json::Value> {
        self.record(MockRequest {
            method,
            path: path.to_string(),
            body,
            file_name: None,
            purpose: None,
            upload_size: None,
        });

        self.inner
            .lock()
            .unwrap()
            .responses
            .pop_front()
            .ok_or_else(|| OpenAIError::internal(format!("No mock response configured for {path}")))?
    }

    async fn upload_file(
        &self,
        path: &str,
        file_data: Bytes,
        file_name: &str,
        purpose: &str,
        _headers: HeaderMap,
    ) -> OpenAIResult<serde_json::Value> {
        self.record(MockRequest {
            method: Method::POST,
            path: path.to_string(),
            body: None,
            file_name: Some(file_name.to_string()),
            purpose: Some(purpose.to_string()),
            upload_size: Some(file_data.len()),
        });

        self.inner
            .lock()
            .unwrap()
            .file_upload_responses
            .pop_front()
            .ok_or_else(|| OpenAIError::internal("No mock file upload response configured"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport_json_response() {
        let mock = MockHttpTransport::new()
            .with_json_response(json!({"id": "test-123", "object": "test"}));

        let response = mock
            .request(Method::POST, "/test", Some(json!({"input": "test"})), HeaderMap::new())
            .await
            .unwrap();

        assert_eq!(response["id"], "test-123");
        assert!(mock.verify_request(Method::POST, "/test"));
        assert_eq!(mock.requests()[0].body, Some(json!({"input": "test"})));
    }

    #[tokio::test]
    async fn test_mock_transport_error_response() {
        let mock = MockHttpTransport::new()
            .with_error_response(OpenAIError::authentication("Invalid API key"));

        let result = mock
            .request(Method::GET, "/test", None, HeaderMap::new())
            .await;

        assert!(result.unwrap_err().is_authentication_error());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_exhausted() {
        let mock = MockHttpTransport::new();
        let result = mock.request(Method::GET, "/test", None, HeaderMap::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_transport_records_uploads() {
        let mock = MockHttpTransport::new()
            .with_file_upload_response(Ok(json!({"id": "file-1"})));

        mock.upload_file("/files", Bytes::from("abc"), "train.jsonl", "fine-tune", HeaderMap::new())
            .await
            .unwrap();

        let request = &mock.requests_to("/files")[0];
        assert_eq!(request.file_name.as_deref(), Some("train.jsonl"));
        assert_eq!(request.purpose.as_deref(), Some("fine-tune"));
        assert_eq!(request.upload_size, Some(3));
    }
}
