use crate::client::OpenAIConfig;
use crate::errors::OpenAIResult;
use crate::resilience::{NoOpHooks, ResilienceHooks};
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub jitter: bool,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl ResilienceConfig {
    pub fn from_client_config(config: &OpenAIConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            ..Default::default()
        }
    }
}

/// Bounded retry with exponential backoff.
///
/// Only errors reporting `is_retryable()` are retried. A rate-limit error that
/// carries a `Retry-After` value waits exactly that long instead of the
/// computed backoff.
pub struct ResilienceOrchestrator {
    config: ResilienceConfig,
    hooks: Arc<dyn ResilienceHooks>,
}

impl ResilienceOrchestrator {
    pub fn new(config: ResilienceConfig) -> Self {
        Self::with_hooks(config, Arc::new(NoOpHooks))
    }

    pub fn with_hooks(config: ResilienceConfig, hooks: Arc<dyn ResilienceHooks>) -> Self {
        Self { config, hooks }
    }

    pub fn passthrough() -> Self {
        Self::new(ResilienceConfig {
            max_retries: 0,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &ResilienceConfig {
        &self.config
    }

    fn calculate_delay(&self, attempt: u32) -> Duration {
        let base_delay = self.config.initial_delay.as_millis() as f64
            * self.config.multiplier.powi(attempt as i32);

        let delay_ms = base_delay.min(self.config.max_delay.as_millis() as f64);

        let final_delay = if self.config.jitter {
            delay_ms + rand::thread_rng().gen_range(0.0..=delay_ms * 0.25)
        } else {
            delay_ms
        };

        Duration::from_millis(final_delay as u64)
    }

    pub async fn execute<F, Fut, T>(&self, operation: F) -> OpenAIResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = OpenAIResult<T>>,
    {
        let mut attempt = 0;

        loop {
            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            if !error.is_retryable() || attempt >= self.config.max_retries {
                self.hooks.on_give_up(&error, attempt + 1);
                return Err(error);
            }

            let delay = error
                .retry_after()
                .unwrap_or_else(|| self.calculate_delay(attempt));
            attempt += 1;
            self.hooks.on_retry(&error, delay, attempt);

            sleep(delay).await;
        }
    }
}
