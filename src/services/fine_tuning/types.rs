use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineTuningJobStatus {
    ValidatingFiles,
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl FineTuningJobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FineTuningJobStatus::Succeeded
                | FineTuningJobStatus::Failed
                | FineTuningJobStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FineTuningJobRequest {
    pub model: String,
    pub training_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperparameters: Option<Hyperparameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl FineTuningJobRequest {
    pub fn new(model: impl Into<String>, training_file: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            training_file: training_file.into(),
            validation_file: None,
            hyperparameters: None,
            suffix: None,
        }
    }

    pub fn with_validation_file(mut self, file_id: impl Into<String>) -> Self {
        self.validation_file = Some(file_id.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = Some(hyperparameters);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hyperparameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<HyperparameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<HyperparameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<HyperparameterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperparameterValue {
    Auto(String),
    Integer(u64),
    Number(f64),
}

impl Hyperparameters {
    /// Fixed epoch count, other values left to the service
    pub fn with_n_epochs(n_epochs: u32) -> Self {
        Self {
            n_epochs: Some(HyperparameterValue::Integer(u64::from(n_epochs))),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FineTuningJob {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    pub finished_at: Option<i64>,
    #[serde(default)]
    pub model: String,
    pub fine_tuned_model: Option<String>,
    pub organization_id: Option<String>,
    pub status: FineTuningJobStatus,
    pub hyperparameters: Option<Hyperparameters>,
    #[serde(default)]
    pub training_file: String,
    pub validation_file: Option<String>,
    #[serde(default)]
    pub result_files: Vec<String>,
    pub trained_tokens: Option<u64>,
    pub error: Option<FineTuningError>,
}

/// Jobs that have not failed carry `"error": {}`, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FineTuningError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub param: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FineTuningEvent {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub level: String,
    pub message: String,
}

/// One page of job events, newest first
#[derive(Debug, Clone, Deserialize)]
pub struct FineTuningEventListResponse {
    #[serde(default)]
    pub object: String,
    pub data: Vec<FineTuningEvent>,
    #[serde(default)]
    pub has_more: bool,
}
