pub mod auth;
pub mod client;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod resilience;
pub mod services;
pub mod transport;

#[cfg(test)]
pub mod mocks;
#[cfg(test)]
pub mod fixtures;

pub use client::{OpenAIClient, OpenAIClientBuilder, OpenAIClientImpl, OpenAIConfig};
pub use errors::{OpenAIError, OpenAIResult};
pub use observability::{LogFormat, LogLevel, LoggingConfig};
pub use resilience::{ResilienceConfig, ResilienceHooks, ResilienceOrchestrator};

pub use services::{
    chat::{
        ChatCompletionRequest, ChatCompletionResponse, ChatCompletionService, ChatMessage,
        ChatMessageRole,
    },
    files::{FileDeleteResponse, FileObject, FilePurpose, FileService, FileUploadRequest},
    fine_tuning::{
        FineTuningEvent, FineTuningJob, FineTuningJobRequest, FineTuningJobStatus,
        FineTuningService,
    },
};

pub use pipeline::{
    run_trial, LabelPolicy, Pacing, PipelineConfig, PipelineError, PipelineResult, TrialPaths,
    TrialReport,
};

pub mod prelude {
    pub use crate::client::{OpenAIClient, OpenAIClientBuilder, OpenAIConfig};
    pub use crate::errors::{OpenAIError, OpenAIResult};
    pub use crate::pipeline::{
        run_trial, LabelPolicy, Pacing, PipelineConfig, PipelineError, PipelineResult,
        TrialReport,
    };
    pub use crate::services::chat::{ChatCompletionRequest, ChatCompletionService, ChatMessage};
    pub use crate::services::fine_tuning::{FineTuningJobRequest, FineTuningService};
}
