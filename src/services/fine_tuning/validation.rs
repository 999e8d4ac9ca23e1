use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use crate::services::fine_tuning::FineTuningJobRequest;

pub struct FineTuningRequestValidator;

impl FineTuningRequestValidator {
    /// Suffixes longer than this are rejected by the API
    const MAX_SUFFIX_LEN: usize = 64;

    pub fn validate(request: &FineTuningJobRequest) -> OpenAIResult<()> {
        if request.training_file.is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("training_file".to_string()),
            ));
        }

        if request.model.is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("model".to_string()),
            ));
        }

        if let Some(suffix) = &request.suffix {
            if suffix.len() > Self::MAX_SUFFIX_LEN {
                return Err(OpenAIError::Validation(ValidationError::InvalidParameter {
                    parameter: "suffix".to_string(),
                    reason: format!("must be at most {} characters", Self::MAX_SUFFIX_LEN),
                }));
            }
        }

        Ok(())
    }

    pub fn validate_job_id(job_id: &str) -> OpenAIResult<()> {
        if job_id.trim().is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("job_id".to_string()),
            ));
        }
        Ok(())
    }
}
