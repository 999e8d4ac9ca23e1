use crate::errors::OpenAIResult;
use crate::services::chat::{ChatCompletionRequest, ChatCompletionResponse, ChatRequestValidator};
use crate::services::ServiceContext;
use async_trait::async_trait;
use http::Method;

#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    /// One non-streaming completion
    async fn create(&self, request: ChatCompletionRequest) -> OpenAIResult<ChatCompletionResponse>;
}

pub struct ChatCompletionServiceImpl {
    context: ServiceContext,
}

impl ChatCompletionServiceImpl {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ChatCompletionService for ChatCompletionServiceImpl {
    async fn create(&self, request: ChatCompletionRequest) -> OpenAIResult<ChatCompletionResponse> {
        ChatRequestValidator::validate(&request)?;

        let body = serde_json::to_value(&request)?;
        self.context
            .send_json(Method::POST, "/chat/completions", Some(body))
            .await
    }
}
