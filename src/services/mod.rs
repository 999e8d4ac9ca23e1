pub mod chat;
pub mod files;
pub mod fine_tuning;

use crate::auth::AuthManager;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::transport::{HttpTransport, ResponseParser};
use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// What every service needs to reach the API: a transport, credentials and
/// the retry policy. Cheap to clone.
#[derive(Clone)]
pub struct ServiceContext {
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,
    resilience: Arc<ResilienceOrchestrator>,
}

impl ServiceContext {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        resilience: Arc<ResilienceOrchestrator>,
    ) -> Self {
        Self {
            transport,
            auth_manager,
            resilience,
        }
    }

    async fn auth_headers(&self) -> OpenAIResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.auth_manager.apply_auth(&mut headers).await?;
        Ok(headers)
    }

    /// Authenticates once, then sends a JSON request through the retry layer.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> OpenAIResult<T> {
        let headers = self.auth_headers().await?;
        let transport = &self.transport;

        let value = self
            .resilience
            .execute(|| {
                let method = method.clone();
                let body = body.clone();
                let headers = headers.clone();
                async move { transport.request(method, path, body, headers).await }
            })
            .await?;

        ResponseParser::from_value(value)
    }

    /// Multipart upload through the retry layer. `Bytes` clones share the buffer.
    pub(crate) async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        data: &Bytes,
        file_name: &str,
        purpose: &str,
    ) -> OpenAIResult<T> {
        let headers = self.auth_headers().await?;
        let transport = &self.transport;

        let value = self
            .resilience
            .execute(|| {
                let data = data.clone();
                let headers = headers.clone();
                async move {
                    transport
                        .upload_file(path, data, file_name, purpose, headers)
                        .await
                }
            })
            .await?;

        ResponseParser::from_value(value)
    }
}
