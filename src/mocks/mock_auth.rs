//! Mock auth manager

use crate::auth::AuthManager;
use crate::errors::{OpenAIError, OpenAIResult};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};

/// Adds a fixed bearer header, or fails every call when built with `with_error`
#[derive(Default)]
pub struct MockAuthManager {
    error: Option<String>,
}

impl MockAuthManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

#[async_trait]
impl AuthManager for MockAuthManager {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> OpenAIResult<()> {
        if let Some(message) = &self.error {
            return Err(OpenAIError::authentication(message.clone()));
        }
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer test-key"),
        );
        Ok(())
    }

    fn validate(&self) -> OpenAIResult<()> {
        match &self.error {
            Some(message) => Err(OpenAIError::authentication(message.clone())),
            None => Ok(()),
        }
    }
}
