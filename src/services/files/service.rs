use crate::errors::OpenAIResult;
use crate::services::files::{
    FileDeleteResponse, FileObject, FileRequestValidator, FileUploadRequest,
};
use crate::services::ServiceContext;
use async_trait::async_trait;
use http::Method;

#[async_trait]
pub trait FileService: Send + Sync {
    async fn upload(&self, request: FileUploadRequest) -> OpenAIResult<FileObject>;
    async fn retrieve(&self, file_id: &str) -> OpenAIResult<FileObject>;
    async fn delete(&self, file_id: &str) -> OpenAIResult<FileDeleteResponse>;
}

pub struct FileServiceImpl {
    context: ServiceContext,
}

impl FileServiceImpl {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl FileService for FileServiceImpl {
    async fn upload(&self, request: FileUploadRequest) -> OpenAIResult<FileObject> {
        FileRequestValidator::validate(&request)?;

        self.context
            .upload_file(
                "/files",
                &request.file_data,
                &request.filename,
                request.purpose.as_str(),
            )
            .await
    }

    async fn retrieve(&self, file_id: &str) -> OpenAIResult<FileObject> {
        FileRequestValidator::validate_file_id(file_id)?;
        self.context
            .send_json(Method::GET, &format!("/files/{file_id}"), None)
            .await
    }

    async fn delete(&self, file_id: &str) -> OpenAIResult<FileDeleteResponse> {
        FileRequestValidator::validate_file_id(file_id)?;
        self.context
            .send_json(Method::DELETE, &format!("/files/{file_id}"), None)
            .await
    }
}
