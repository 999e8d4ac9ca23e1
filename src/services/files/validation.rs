use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use crate::services::files::{FilePurpose, FileUploadRequest};

/// Upload limit enforced by the files endpoint
const MAX_FILE_SIZE: u64 = 512 * 1024 * 1024;

pub struct FileRequestValidator;

impl FileRequestValidator {
    pub fn validate(request: &FileUploadRequest) -> OpenAIResult<()> {
        let invalid = |parameter: &str, reason: &str| {
            Err(OpenAIError::Validation(ValidationError::InvalidParameter {
                parameter: parameter.to_string(),
                reason: reason.to_string(),
            }))
        };

        if request.filename.trim().is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("filename".to_string()),
            ));
        }
        if request.purpose == FilePurpose::FineTune && !request.filename.ends_with(".jsonl") {
            return invalid("filename", "fine-tune datasets must be .jsonl files");
        }
        if request.file_data.is_empty() {
            return invalid("file", "file cannot be empty");
        }

        let size = request.file_data.len() as u64;
        if size > MAX_FILE_SIZE {
            return Err(OpenAIError::Validation(ValidationError::FileTooLarge {
                max_size: MAX_FILE_SIZE,
                actual_size: size,
            }));
        }
        Ok(())
    }

    pub fn validate_file_id(file_id: &str) -> OpenAIResult<()> {
        if file_id.trim().is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("file_id".to_string()),
            ));
        }
        Ok(())
    }
}
