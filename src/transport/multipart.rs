use crate::errors::{OpenAIError, OpenAIResult};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};

/// Builder for multipart/form-data requests
pub struct MultipartBuilder {
    form: Form,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self { form: Form::new() }
    }

    /// Adds a file part to the multipart form
    pub fn add_file(mut self, field_name: &str, file_name: &str, data: Bytes) -> OpenAIResult<Self> {
        let part = Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime::APPLICATION_OCTET_STREAM.as_ref())
            .map_err(|e| OpenAIError::Serialization(format!("Failed to set MIME type: {}", e)))?;

        self.form = self.form.part(field_name.to_string(), part);
        Ok(self)
    }

    /// Adds a text part to the multipart form
    pub fn add_text(mut self, field_name: &str, value: &str) -> Self {
        self.form = self.form.text(field_name.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> Form {
        self.form
    }
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}
