use crate::errors::OpenAIResult;
use crate::services::fine_tuning::{
    FineTuningEventListResponse, FineTuningJob, FineTuningJobRequest, FineTuningRequestValidator,
};
use crate::services::ServiceContext;
use crate::transport::RequestBuilder;
use async_trait::async_trait;
use http::Method;

#[async_trait]
pub trait FineTuningService: Send + Sync {
    async fn create(&self, request: FineTuningJobRequest) -> OpenAIResult<FineTuningJob>;
    async fn retrieve(&self, job_id: &str) -> OpenAIResult<FineTuningJob>;
    async fn cancel(&self, job_id: &str) -> OpenAIResult<FineTuningJob>;
    async fn events(
        &self,
        job_id: &str,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> OpenAIResult<FineTuningEventListResponse>;
}

pub struct FineTuningServiceImpl {
    context: ServiceContext,
}

impl FineTuningServiceImpl {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl FineTuningService for FineTuningServiceImpl {
    async fn create(&self, request: FineTuningJobRequest) -> OpenAIResult<FineTuningJob> {
        FineTuningRequestValidator::validate(&request)?;

        let body = serde_json::to_value(&request)?;
        self.context.send_json(Method::POST, "/fine_tuning/jobs", Some(body)).await
    }

    async fn retrieve(&self, job_id: &str) -> OpenAIResult<FineTuningJob> {
        FineTuningRequestValidator::validate_job_id(job_id)?;

        let path = format!("/fine_tuning/jobs/{job_id}");
        self.context.send_json(Method::GET, &path, None).await
    }

    async fn cancel(&self, job_id: &str) -> OpenAIResult<FineTuningJob> {
        FineTuningRequestValidator::validate_job_id(job_id)?;

        let path = format!("/fine_tuning/jobs/{job_id}/cancel");
        self.context.send_json(Method::POST, &path, None).await
    }

    async fn events(
        &self,
        job_id: &str,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> OpenAIResult<FineTuningEventListResponse> {
        FineTuningRequestValidator::validate_job_id(job_id)?;

        let path = RequestBuilder::get(format!("/fine_tuning/jobs/{job_id}/events"))
            .query_opt("limit", limit)
            .query_opt("after", after)
            .build_path();
        self.context.send_json(Method::GET, &path, None).await
    }
}
