mod http_transport;
mod multipart;
mod request_builder;
mod response_parser;

pub use http_transport::ReqwestTransport;
pub use multipart::MultipartBuilder;
pub use request_builder::RequestBuilder;
pub use response_parser::ResponseParser;

use crate::errors::OpenAIResult;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};

/// JSON-over-HTTP transport shared by every service.
///
/// Bodies travel as `serde_json::Value` so the trait stays object safe; the
/// services own the typed (de)serialization.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: HeaderMap,
    ) -> OpenAIResult<serde_json::Value>;

    async fn upload_file(
        &self,
        path: &str,
        file_data: Bytes,
        file_name: &str,
        purpose: &str,
        headers: HeaderMap,
    ) -> OpenAIResult<serde_json::Value>;
}
