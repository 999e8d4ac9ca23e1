mod client_impl;
mod config;
mod factory;

pub use client_impl::OpenAIClientImpl;
pub use config::{OpenAIConfig, DEFAULT_BASE_URL};
pub use factory::OpenAIClientBuilder;

use crate::services::{
    chat::ChatCompletionService, files::FileService, fine_tuning::FineTuningService,
};

/// The remote surface the fine-tune pipeline talks to.
pub trait OpenAIClient: Send + Sync {
    fn chat(&self) -> &dyn ChatCompletionService;
    fn files(&self) -> &dyn FileService;
    fn fine_tuning(&self) -> &dyn FineTuningService;
}
