use crate::pipeline::conversation::SYSTEM_MESSAGE;
use crate::pipeline::error::{PipelineError, PipelineResult};
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_EVENTS_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// How inference requests are spaced out
#[derive(Debug, Clone, PartialEq)]
pub enum Pacing {
    None,
    /// Sleep `pause` after every row index that is a non-zero multiple of `every`
    BatchPause { every: usize, pause: Duration },
    /// Wait for a token before each request
    TokenBucket { requests_per_minute: u32 },
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::BatchPause {
            every: 200,
            pause: Duration::from_secs(60),
        }
    }
}

/// What to do with labels other than `applied` / `basic`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LabelPolicy {
    /// Reject the dataset
    #[default]
    Strict,
    /// Keep the label verbatim and log a warning
    Permissive,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub base_model: String,
    /// `None` leaves the epoch count to the service
    pub n_epochs: Option<u32>,
    pub system_prompt: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub trials: Range<u32>,
    pub poll_interval: Duration,
    pub events_page_size: u32,
    /// `None` polls until the job leaves the running states
    pub max_polls: Option<u32>,
    pub cancel_on_timeout: bool,
    pub max_tokens: u32,
    pub temperature: f32,
    pub pacing: Pacing,
    pub label_policy: LabelPolicy,
    pub delete_uploads: bool,
    pub skip_training: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_model: DEFAULT_BASE_MODEL.to_string(),
            n_epochs: None,
            system_prompt: SYSTEM_MESSAGE.to_string(),
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            trials: 0..1,
            poll_interval: DEFAULT_POLL_INTERVAL,
            events_page_size: DEFAULT_EVENTS_PAGE_SIZE,
            max_polls: None,
            cancel_on_timeout: false,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            pacing: Pacing::default(),
            label_policy: LabelPolicy::default(),
            delete_uploads: false,
            skip_training: false,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_model(mut self, model: impl Into<String>) -> Self {
        self.base_model = model.into();
        self
    }

    pub fn with_n_epochs(mut self, n_epochs: Option<u32>) -> Self {
        self.n_epochs = n_epochs;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_trials(mut self, trials: Range<u32>) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_events_page_size(mut self, size: u32) -> Self {
        self.events_page_size = size;
        self
    }

    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn with_cancel_on_timeout(mut self, cancel: bool) -> Self {
        self.cancel_on_timeout = cancel;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    pub fn with_delete_uploads(mut self, delete: bool) -> Self {
        self.delete_uploads = delete;
        self
    }

    pub fn with_skip_training(mut self, skip: bool) -> Self {
        self.skip_training = skip;
        self
    }

    pub fn validate(&self) -> PipelineResult<()> {
        let invalid = |message: &str| Err(PipelineError::InvalidConfig(message.to_string()));

        if self.base_model.trim().is_empty() {
            return invalid("base model cannot be empty");
        }
        if self.n_epochs == Some(0) {
            return invalid("epoch count must be greater than zero when set");
        }
        if self.system_prompt.trim().is_empty() {
            return invalid("system prompt cannot be empty");
        }
        if self.trials.is_empty() {
            return invalid("trial range is empty");
        }
        if self.poll_interval.is_zero() {
            return invalid("poll interval must be greater than zero");
        }
        if self.events_page_size == 0 {
            return invalid("events page size must be greater than zero");
        }
        if self.max_polls == Some(0) {
            return invalid("max polls must be greater than zero when set");
        }
        if self.max_tokens == 0 {
            return invalid("max tokens must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return invalid("temperature must be between 0.0 and 2.0");
        }
        match self.pacing {
            Pacing::BatchPause { every: 0, .. } => invalid("pause batch size must be greater than zero"),
            Pacing::TokenBucket {
                requests_per_minute: 0,
            } => invalid("requests per minute must be greater than zero"),
            _ => Ok(()),
        }
    }
}
