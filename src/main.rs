//! Fine-tunes a chat model to label research abstracts as applied or basic.
//!
//! ```bash
//! finetune-classifier \
//!   --data-dir ./data \
//!   --output-dir ./results \
//!   --first-trial 0 --trials 3
//! ```
//!
//! The API key is read from `--api-key` or `OPENAI_API_KEY`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use openai_finetune_classifier::{
    run_trial, LabelPolicy, LogFormat, LogLevel, LoggingConfig, OpenAIClientBuilder,
    OpenAIConfig, Pacing, PipelineConfig,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PacingMode {
    /// Send requests back to back
    None,
    /// Sleep after every `--pause-every` rows
    Batch,
    /// Token bucket at `--requests-per-minute`
    Bucket,
}

#[derive(Parser, Debug)]
#[command(name = "finetune-classifier")]
#[command(about = "Fine-tune and evaluate an abstract classifier", long_about = None)]
struct Args {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "OPENAI_ORGANIZATION_ID")]
    organization_id: Option<String>,

    #[arg(long, env = "OPENAI_PROJECT_ID")]
    project_id: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "60")]
    timeout: u64,

    /// Retries for transient API failures
    #[arg(long, default_value = "3")]
    max_retries: u32,

    /// Model to fine-tune
    #[arg(long, env = "FINETUNE_BASE_MODEL", default_value = "gpt-3.5-turbo")]
    base_model: String,

    /// Training epochs; the service picks a value when omitted
    #[arg(long)]
    epochs: Option<u32>,

    /// File whose contents replace the built-in system prompt
    #[arg(long, value_name = "PATH")]
    system_prompt_file: Option<PathBuf>,

    /// Directory holding training_{i}.xlsx, valid_{i}.xlsx and test_set.xlsx
    #[arg(long, value_name = "PATH", default_value = ".")]
    data_dir: PathBuf,

    /// Directory for JSONL files, model ids and result workbooks
    #[arg(long, value_name = "PATH", default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, default_value = "0")]
    first_trial: u32,

    /// Number of trials to run
    #[arg(long, default_value = "1")]
    trials: u32,

    /// Seconds between job status polls
    #[arg(long, default_value = "30")]
    poll_interval: u64,

    #[arg(long, default_value = "100")]
    events_page_size: u32,

    /// Give up after this many polls of a running job
    #[arg(long)]
    max_polls: Option<u32>,

    /// Cancel the job when `--max-polls` is reached
    #[arg(long, requires = "max_polls")]
    cancel_on_timeout: bool,

    #[arg(long, default_value = "500")]
    max_tokens: u32,

    #[arg(long, default_value = "0.0")]
    temperature: f32,

    #[arg(long, value_enum, default_value = "batch")]
    pacing: PacingMode,

    #[arg(long, default_value = "200")]
    pause_every: usize,

    /// Seconds to sleep after each batch
    #[arg(long, default_value = "60")]
    pause_secs: u64,

    #[arg(long, default_value = "60")]
    requests_per_minute: u32,

    #[arg(long, value_enum, default_value = "strict")]
    label_policy: LabelPolicy,

    /// Delete the uploaded datasets once the job ends
    #[arg(long)]
    delete_uploads: bool,

    /// Reuse ft_id_{i}.txt and only run inference and scoring
    #[arg(long)]
    skip_training: bool,

    #[arg(long, value_enum, env = "FINETUNE_LOG_LEVEL", default_value = "info")]
    log_level: LogLevel,

    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

impl Args {
    fn client_config(&self) -> Result<OpenAIConfig> {
        let mut config = OpenAIConfig::new(self.api_key.as_str())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_retries(self.max_retries);

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url_str(base_url)?;
        }
        if let Some(org_id) = &self.organization_id {
            config = config.with_organization_id(org_id.as_str());
        }
        if let Some(project_id) = &self.project_id {
            config = config.with_project_id(project_id.as_str());
        }
        Ok(config)
    }

    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let pacing = match self.pacing {
            PacingMode::None => Pacing::None,
            PacingMode::Batch => Pacing::BatchPause {
                every: self.pause_every,
                pause: Duration::from_secs(self.pause_secs),
            },
            PacingMode::Bucket => Pacing::TokenBucket {
                requests_per_minute: self.requests_per_minute,
            },
        };

        let mut config = PipelineConfig::new()
            .with_base_model(self.base_model.as_str())
            .with_n_epochs(self.epochs)
            .with_data_dir(&self.data_dir)
            .with_output_dir(&self.output_dir)
            .with_trials(self.first_trial..self.first_trial.saturating_add(self.trials))
            .with_poll_interval(Duration::from_secs(self.poll_interval))
            .with_events_page_size(self.events_page_size)
            .with_max_polls(self.max_polls)
            .with_cancel_on_timeout(self.cancel_on_timeout)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_pacing(pacing)
            .with_label_policy(self.label_policy)
            .with_delete_uploads(self.delete_uploads)
            .with_skip_training(self.skip_training);

        if let Some(path) = &self.system_prompt_file {
            let prompt = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read system prompt from {}", path.display()))?;
            config = config.with_system_prompt(prompt.trim());
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::new()
        .with_level(args.log_level)
        .with_format(args.log_format)
        .init()
        .context("Failed to initialise logging")?;

    let pipeline = args.pipeline_config()?;
    let client = OpenAIClientBuilder::new()
        .with_config(args.client_config()?)
        .build()
        .context("Failed to build OpenAI client")?;

    for trial in pipeline.trials.clone() {
        let report = run_trial(client.as_ref(), &pipeline, trial)
            .await
            .with_context(|| format!("Trial {trial} failed"))?;

        tracing::info!(
            trial = report.trial,
            job_id = report.job_id.as_deref().unwrap_or("-"),
            model_id = %report.model_id,
            accuracy = report.accuracy,
            rows = report.rows,
            "Trial complete"
        );
    }

    Ok(())
}
