//! One full train-then-evaluate run.

use crate::client::OpenAIClient;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::conversation::ConversationFormatter;
use crate::pipeline::dataset::{load_examples, Table};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::inference::{pacer_for, InferenceRunner};
use crate::pipeline::jsonl::write_jsonl;
use crate::pipeline::poller::{JobPoller, PollSettings};
use crate::pipeline::scoring::score;
use crate::pipeline::submit::{delete_uploads, submit_job};
use crate::pipeline::workbook::read_table;
use std::path::{Path, PathBuf};

/// Every file a trial reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialPaths {
    pub training_input: PathBuf,
    pub validation_input: PathBuf,
    pub test_input: PathBuf,
    pub training_jsonl: PathBuf,
    pub validation_jsonl: PathBuf,
    pub model_id_file: PathBuf,
    pub results: PathBuf,
    pub accuracy_results: PathBuf,
}

impl TrialPaths {
    pub fn new(data_dir: &Path, output_dir: &Path, trial: u32) -> Self {
        Self {
            training_input: data_dir.join(format!("training_{trial}.xlsx")),
            validation_input: data_dir.join(format!("valid_{trial}.xlsx")),
            test_input: data_dir.join("test_set.xlsx"),
            training_jsonl: output_dir.join(format!("tmp_class_finetune_training_{trial}.jsonl")),
            validation_jsonl: output_dir
                .join(format!("tmp_class_finetune_validation_{trial}.jsonl")),
            model_id_file: output_dir.join(format!("ft_id_{trial}.txt")),
            results: output_dir.join(format!("test_result_{trial}.xlsx")),
            accuracy_results: output_dir.join(format!("test_result_accuracy_{trial}.xlsx")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialReport {
    pub trial: u32,
    /// `None` when training was skipped
    pub job_id: Option<String>,
    pub model_id: String,
    pub accuracy: f64,
    pub rows: usize,
}

pub async fn run_trial(
    client: &dyn OpenAIClient,
    config: &PipelineConfig,
    trial: u32,
) -> PipelineResult<TrialReport> {
    let paths = TrialPaths::new(&config.data_dir, &config.output_dir, trial);
    let formatter = ConversationFormatter::new(config.system_prompt.as_str());
    tracing::info!(trial, "Start trial");

    let test_table = load_table(&paths.test_input).await?;
    let test_examples = load_examples(&test_table, config.label_policy)?;

    let (job_id, model_id) = if config.skip_training {
        (None, read_model_id(&paths.model_id_file).await?)
    } else {
        let (job_id, model_id) = train(client, config, &formatter, &paths, trial).await?;
        (Some(job_id), model_id)
    };

    let pacer = pacer_for(&config.pacing);
    let predictions = InferenceRunner::new(client, &formatter, pacer.as_ref(), model_id.as_str())
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens)
        .run(&test_examples)
        .await?;

    let scored = score(&test_table, &test_examples, &predictions)?;
    let accuracy = scored.accuracy();
    let (results, accuracy_results) = (paths.results.clone(), paths.accuracy_results.clone());
    blocking(move || scored.write(&results, &accuracy_results)).await?;

    tracing::info!(trial, accuracy, rows = test_examples.len(), "Trial finished");

    Ok(TrialReport {
        trial,
        job_id,
        model_id,
        accuracy,
        rows: test_examples.len(),
    })
}

/// Runs workbook and JSONL file work on the blocking pool
async fn blocking<T, F>(task: F) -> PipelineResult<T>
where
    F: FnOnce() -> PipelineResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await?
}

async fn load_table(path: &Path) -> PipelineResult<Table> {
    let path = path.to_path_buf();
    blocking(move || read_table(&path)).await
}

async fn save_jsonl<T>(path: &Path, records: Vec<T>) -> PipelineResult<usize>
where
    T: serde::Serialize + Send + 'static,
{
    let path = path.to_path_buf();
    blocking(move || write_jsonl(&path, &records)).await
}

/// Builds the datasets, trains, and records the model id. Returns `(job_id, model_id)`.
async fn train(
    client: &dyn OpenAIClient,
    config: &PipelineConfig,
    formatter: &ConversationFormatter,
    paths: &TrialPaths,
    trial: u32,
) -> PipelineResult<(String, String)> {
    let training = load_examples(&load_table(&paths.training_input).await?, config.label_policy)?;
    let validation =
        load_examples(&load_table(&paths.validation_input).await?, config.label_policy)?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| PipelineError::io(&config.output_dir, source))?;

    save_jsonl(&paths.training_jsonl, formatter.training_records(&training)).await?;
    save_jsonl(&paths.validation_jsonl, formatter.training_records(&validation)).await?;
    tracing::info!(
        trial,
        training = training.len(),
        validation = validation.len(),
        "Wrote fine-tuning datasets"
    );

    let job = submit_job(
        client,
        &config.base_model,
        config.n_epochs,
        trial,
        &paths.training_jsonl,
        &paths.validation_jsonl,
    )
    .await?;

    let outcome = JobPoller::new(client, PollSettings::from(config))
        .wait_for_model(&job.job_id)
        .await;

    if config.delete_uploads {
        delete_uploads(client, &job).await;
    }

    let model_id = outcome?;
    tokio::fs::write(&paths.model_id_file, &model_id)
        .await
        .map_err(|source| PipelineError::io(&paths.model_id_file, source))?;
    tracing::info!(trial, model_id = %model_id, "Fine-tuned model ready");

    Ok((job.job_id, model_id))
}

async fn read_model_id(path: &Path) -> PipelineResult<String> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::io(path, source))?;
    let model_id = contents.trim();
    if model_id.is_empty() {
        return Err(PipelineError::InvalidConfig(format!(
            "{} does not contain a model id",
            path.display()
        )));
    }
    Ok(model_id.to_string())
}
