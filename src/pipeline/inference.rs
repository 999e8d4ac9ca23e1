//! Classifies the test set with the fine-tuned model.

use crate::client::OpenAIClient;
use crate::pipeline::config::Pacing;
use crate::pipeline::conversation::ConversationFormatter;
use crate::pipeline::dataset::LabeledExample;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::resilience::RateLimiter;
use crate::services::chat::ChatCompletionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Spacing hooks around each inference request. `index` is the 0-based test row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestPacer: Send + Sync {
    async fn before_request(&self, index: usize);
    async fn after_request(&self, index: usize);
}

pub struct NoPacing;

#[async_trait]
impl RequestPacer for NoPacing {
    async fn before_request(&self, _index: usize) {}
    async fn after_request(&self, _index: usize) {}
}

/// Sleeps `pause` after each row whose index is a non-zero multiple of `every`
pub struct BatchPause {
    every: usize,
    pause: Duration,
}

impl BatchPause {
    pub fn new(every: usize, pause: Duration) -> Self {
        Self { every, pause }
    }

    pub fn pauses_after(&self, index: usize) -> bool {
        self.every > 0 && index != 0 && index % self.every == 0
    }
}

#[async_trait]
impl RequestPacer for BatchPause {
    async fn before_request(&self, _index: usize) {}

    async fn after_request(&self, index: usize) {
        if self.pauses_after(index) {
            tracing::info!(index, pause_secs = self.pause.as_secs(), "Pausing inference");
            sleep(self.pause).await;
        }
    }
}

pub struct TokenBucketPacer {
    limiter: RateLimiter,
}

impl TokenBucketPacer {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            limiter: RateLimiter::per_minute(requests_per_minute),
        }
    }
}

#[async_trait]
impl RequestPacer for TokenBucketPacer {
    async fn before_request(&self, _index: usize) {
        self.limiter.acquire().await;
    }

    async fn after_request(&self, _index: usize) {}
}

pub fn pacer_for(pacing: &Pacing) -> Box<dyn RequestPacer> {
    match pacing {
        Pacing::None => Box::new(NoPacing),
        Pacing::BatchPause { every, pause } => Box::new(BatchPause::new(*every, *pause)),
        Pacing::TokenBucket {
            requests_per_minute,
        } => Box::new(TokenBucketPacer::new(*requests_per_minute)),
    }
}

pub struct InferenceRunner<'a> {
    client: &'a dyn OpenAIClient,
    formatter: &'a ConversationFormatter,
    pacer: &'a dyn RequestPacer,
    model_id: String,
    temperature: f32,
    max_tokens: u32,
}

impl<'a> InferenceRunner<'a> {
    pub fn new(
        client: &'a dyn OpenAIClient,
        formatter: &'a ConversationFormatter,
        pacer: &'a dyn RequestPacer,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            formatter,
            pacer,
            model_id: model_id.into(),
            temperature: 0.0,
            max_tokens: crate::pipeline::config::DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Asks the model to classify one abstract and returns its reply unmodified.
    pub async fn classify(&self, index: usize, abstract_text: &str) -> PipelineResult<String> {
        let record = self.formatter.inference_record(abstract_text);
        let request = ChatCompletionRequest::new(self.model_id.as_str(), record.messages)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.client.chat().create(request).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(PipelineError::EmptyCompletion { row: index })
    }

    /// One prediction per example, in order. The first error aborts the run.
    pub async fn run(&self, examples: &[LabeledExample]) -> PipelineResult<Vec<String>> {
        let mut predictions = Vec::with_capacity(examples.len());

        for (index, example) in examples.iter().enumerate() {
            self.pacer.before_request(index).await;
            let prediction = self.classify(index, &example.abstract_text).await?;
            tracing::debug!(index, prediction = %prediction, expected = %example.label, "Classified");
            predictions.push(prediction);
            self.pacer.after_request(index).await;
        }

        tracing::info!(model = %self.model_id, rows = predictions.len(), "Inference finished");
        Ok(predictions)
    }
}
