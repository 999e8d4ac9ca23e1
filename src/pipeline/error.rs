use crate::errors::OpenAIError;
use std::path::PathBuf;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("API error: {0}")]
    Api(#[from] OpenAIError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read workbook {}: {message}", path.display())]
    Spreadsheet { path: PathBuf, message: String },

    #[error("Failed to write workbook {}: {message}", path.display())]
    SpreadsheetWrite { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    #[error("Row {row}: column '{column}' is empty")]
    EmptyCell { row: usize, column: String },

    #[error("Row {row}: label '{label}' is neither 'applied' nor 'basic'")]
    InvalidLabel { row: usize, label: String },

    #[error("{table} has no data rows")]
    EmptyDataset { table: String },

    #[error("Column '{column}' has {actual} values but the table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("{}:{line}: malformed record: {message}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Fine-tuning job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },

    #[error("Fine-tuning job {job_id} was cancelled")]
    JobCancelled { job_id: String },

    #[error("Fine-tuning job {job_id} still running after {polls} polls")]
    PollLimitExceeded { job_id: String, polls: u32 },

    #[error("Fine-tuning job {job_id} finished without a fine-tuned model id")]
    MissingModelId { job_id: String },

    #[error("Model returned no content for test row {row}")]
    EmptyCompletion { row: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Blocking file task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Failures the remote job reported, as opposed to local or transport faults
    pub fn is_job_outcome(&self) -> bool {
        matches!(
            self,
            PipelineError::JobFailed { .. }
                | PipelineError::JobCancelled { .. }
                | PipelineError::PollLimitExceeded { .. }
                | PipelineError::MissingModelId { .. }
        )
    }
}
