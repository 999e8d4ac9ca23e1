//! Uploads the two datasets and creates the fine-tuning job.

use crate::client::OpenAIClient;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::services::files::{FilePurpose, FileUploadRequest};
use crate::services::fine_tuning::{FineTuningJobRequest, Hyperparameters};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    pub job_id: String,
    pub training_file_id: String,
    pub validation_file_id: String,
}

/// Suffix appended to the fine-tuned model name for trial `trial`
pub fn job_suffix(trial: u32) -> String {
    format!("_ft_{trial}")
}

async fn upload_dataset(client: &dyn OpenAIClient, path: &Path) -> PipelineResult<String> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| PipelineError::io(path, source))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.jsonl".to_string());

    let file = client
        .files()
        .upload(FileUploadRequest::new(data, filename, FilePurpose::FineTune))
        .await?;

    tracing::info!(path = %path.display(), file_id = %file.id, bytes = file.bytes, "Uploaded dataset");
    Ok(file.id)
}

/// Nothing is rolled back on failure; files uploaded before the error stay remote.
pub async fn submit_job(
    client: &dyn OpenAIClient,
    base_model: &str,
    n_epochs: Option<u32>,
    trial: u32,
    training_path: &Path,
    validation_path: &Path,
) -> PipelineResult<SubmittedJob> {
    let training_file_id = upload_dataset(client, training_path).await?;
    let validation_file_id = upload_dataset(client, validation_path).await?;

    let mut request = FineTuningJobRequest::new(base_model, training_file_id.as_str())
        .with_validation_file(validation_file_id.as_str())
        .with_suffix(job_suffix(trial));
    if let Some(n_epochs) = n_epochs {
        request = request.with_hyperparameters(Hyperparameters::with_n_epochs(n_epochs));
    }

    let job = client.fine_tuning().create(request).await?;
    tracing::info!(trial, job_id = %job.id, model = %job.model, "Created fine-tuning job");

    Ok(SubmittedJob {
        job_id: job.id,
        training_file_id,
        validation_file_id,
    })
}

/// Removes both uploaded datasets. Failures are logged, not returned.
pub async fn delete_uploads(client: &dyn OpenAIClient, job: &SubmittedJob) {
    for file_id in [&job.training_file_id, &job.validation_file_id] {
        match client.files().delete(file_id).await {
            Ok(response) => tracing::info!(file_id = %response.id, deleted = response.deleted, "Deleted upload"),
            Err(err) => tracing::warn!(file_id = %file_id, error = %err, "Failed to delete upload"),
        }
    }
}
