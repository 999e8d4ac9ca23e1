use crate::auth::AuthManager;
use crate::client::{OpenAIClient, OpenAIConfig};
use crate::resilience::ResilienceOrchestrator;
use crate::services::{
    chat::{ChatCompletionService, ChatCompletionServiceImpl},
    files::{FileService, FileServiceImpl},
    fine_tuning::{FineTuningService, FineTuningServiceImpl},
    ServiceContext,
};
use crate::transport::HttpTransport;
use std::sync::Arc;

/// Concrete client. Every service shares one transport, auth manager and retry policy.
pub struct OpenAIClientImpl {
    config: OpenAIConfig,
    chat: ChatCompletionServiceImpl,
    files: FileServiceImpl,
    fine_tuning: FineTuningServiceImpl,
}

impl OpenAIClientImpl {
    pub fn new(
        config: OpenAIConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        resilience: Arc<ResilienceOrchestrator>,
    ) -> Self {
        let context = ServiceContext::new(transport, auth_manager, resilience);

        Self {
            config,
            chat: ChatCompletionServiceImpl::new(context.clone()),
            files: FileServiceImpl::new(context.clone()),
            fine_tuning: FineTuningServiceImpl::new(context),
        }
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

impl OpenAIClient for OpenAIClientImpl {
    fn chat(&self) -> &dyn ChatCompletionService {
        &self.chat
    }

    fn files(&self) -> &dyn FileService {
        &self.files
    }

    fn fine_tuning(&self) -> &dyn FineTuningService {
        &self.fine_tuning
    }
}
