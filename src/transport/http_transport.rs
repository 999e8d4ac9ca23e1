use crate::client::OpenAIConfig;
use crate::errors::{ConfigurationError, NetworkError, OpenAIError, OpenAIResult};
use crate::transport::{HttpTransport, MultipartBuilder, ResponseParser};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl ReqwestTransport {
    /// Creates a new ReqwestTransport from configuration
    pub fn new(config: &OpenAIConfig) -> OpenAIResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::HttpClient(e.to_string()))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            default_headers: HeaderMap::new(),
        })
    }

    /// Sets default headers to include in all requests
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Builds a full URL from a path
    fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Merges default headers with request-specific headers
    fn merge_headers(&self, request_headers: HeaderMap) -> HeaderMap {
        let mut headers = self.default_headers.clone();
        for (key, value) in request_headers.iter() {
            headers.insert(key.clone(), value.clone());
        }
        headers
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        method: &Method,
        path: &str,
    ) -> OpenAIResult<serde_json::Value> {
        let started = Instant::now();
        tracing::debug!(method = %method, path = path, "Outgoing request");

        let response = request
            .send()
            .await
            .map_err(|e| OpenAIError::from_reqwest(e, self.timeout))?;

        tracing::debug!(
            method = %method,
            path = path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response received"
        );

        ResponseParser::parse_response(response, self.timeout).await
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: HeaderMap,
    ) -> OpenAIResult<serde_json::Value> {
        let url = self.build_url(path);

        let mut request = match method {
            Method::GET => self.client.get(&url),
            Method::POST => self.client.post(&url),
            Method::DELETE => self.client.delete(&url),
            _ => {
                return Err(OpenAIError::Network(NetworkError::RequestFailed(format!(
                    "Unsupported HTTP method: {}",
                    method
                ))))
            }
        };

        request = request.headers(self.merge_headers(headers));

        if let Some(body) = body {
            request = request.json(&body);
        }

        self.send(request, &method, path).await
    }

    async fn upload_file(
        &self,
        path: &str,
        file_data: Bytes,
        file_name: &str,
        purpose: &str,
        headers: HeaderMap,
    ) -> OpenAIResult<serde_json::Value> {
        let url = self.build_url(path);

        let multipart = MultipartBuilder::new()
            .add_file("file", file_name, file_data)?
            .add_text("purpose", purpose)
            .build();

        let request = self
            .client
            .post(&url)
            .headers(self.merge_headers(headers))
            .multipart(multipart);

        self.send(request, &Method::POST, path).await
    }
}
