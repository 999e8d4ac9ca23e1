use crate::errors::OpenAIError;
use std::time::Duration;

/// Observation points of the retry loop
pub trait ResilienceHooks: Send + Sync {
    fn on_retry(&self, _error: &OpenAIError, _delay: Duration, _attempt: u32) {}
    fn on_give_up(&self, _error: &OpenAIError, _attempts: u32) {}
}

pub struct NoOpHooks;

impl ResilienceHooks for NoOpHooks {}

/// Reports retries through `tracing`
pub struct TracingHooks;

impl ResilienceHooks for TracingHooks {
    fn on_retry(&self, error: &OpenAIError, delay: Duration, attempt: u32) {
        tracing::warn!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Retrying request"
        );
    }

    fn on_give_up(&self, error: &OpenAIError, attempts: u32) {
        if error.is_retryable() {
            tracing::error!(attempts, error = %error, "Retries exhausted");
        }
    }
}
