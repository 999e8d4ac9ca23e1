use crate::errors::{ErrorMapper, OpenAIError, OpenAIResult};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct ResponseParser;

impl ResponseParser {
    /// Reads a response body as JSON, mapping non-2xx statuses to typed errors
    pub async fn parse_response(
        response: Response,
        timeout: Duration,
    ) -> OpenAIResult<serde_json::Value> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| OpenAIError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            return Err(ErrorMapper::map_status_with_headers(
                status.as_u16(),
                &headers,
                &body,
            ));
        }

        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        Self::parse_json(&body)
    }

    pub fn parse_json<T: DeserializeOwned>(data: &[u8]) -> OpenAIResult<T> {
        serde_json::from_slice(data).map_err(|e| {
            OpenAIError::Deserialization(format!(
                "Failed to deserialize JSON: {}. Data: {}",
                e,
                String::from_utf8_lossy(data)
            ))
        })
    }

    /// Converts a transport-level JSON value into the service's response type
    pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> OpenAIResult<T> {
        serde_json::from_value(value).map_err(|e| {
            OpenAIError::Deserialization(format!("Failed to deserialize response: {}", e))
        })
    }
}
