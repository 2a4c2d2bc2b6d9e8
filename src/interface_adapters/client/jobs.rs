use reqwest::Method;

use super::ApiClient;
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::ApiError;
use crate::domain::jobs::{
    GenerationJob, GenerationOptions, JobStatusReport, QuiltDesignOptions, QuiltJobStatus,
};
use crate::interface_adapters::protocol::{GenerateRequest, QuiltDesignRequest};

// Job creation is not idempotent: two calls enqueue two jobs. Status reads are
// plain accessors; polling cadence belongs to PollJobUseCase or the caller.
impl ApiClient {
    pub async fn create_generation_job(
        &self,
        model_image_id: &str,
        outfit_image_id: &str,
        options: Option<GenerationOptions>,
    ) -> Result<GenerationJob, ApiError> {
        let job: GenerationJob = self
            .send(
                Method::POST,
                Endpoint::Generate,
                Some(&GenerateRequest {
                    model_image_id,
                    outfit_image_id,
                    options: options.unwrap_or_default(),
                }),
            )
            .await?;
        tracing::info!(job_id = %job.job_id, status = ?job.status, "generation job created");
        Ok(job)
    }

    pub async fn get_job_status(&self, job_id: &str) -> Result<JobStatusReport, ApiError> {
        self.get(Endpoint::GenerateStatus(job_id.to_string())).await
    }

    pub async fn generate_quilt_design(
        &self,
        prompt: &str,
        options: Option<QuiltDesignOptions>,
    ) -> Result<GenerationJob, ApiError> {
        if prompt.trim().is_empty() {
            return Err(ApiError::Validation(
                "Please enter a description for your quilt design.".to_string(),
            ));
        }
        let job: GenerationJob = self
            .send(
                Method::POST,
                Endpoint::QuiltDesign,
                Some(&QuiltDesignRequest {
                    prompt,
                    options: options.unwrap_or_default(),
                }),
            )
            .await?;
        tracing::info!(job_id = %job.job_id, status = ?job.status, "quilt design job created");
        Ok(job)
    }

    pub async fn get_quilt_design_job_status(
        &self,
        job_id: &str,
    ) -> Result<QuiltJobStatus, ApiError> {
        self.get(Endpoint::QuiltDesignStatus(job_id.to_string()))
            .await
    }
}
