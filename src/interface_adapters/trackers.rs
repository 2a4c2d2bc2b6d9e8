use async_trait::async_trait;

use crate::domain::errors::ApiError;
use crate::domain::jobs::{JobStatusReport, QuiltJobStatus};
use crate::domain::ports::JobTracker;
use crate::interface_adapters::client::ApiClient;

// Adapts the image-generation status accessor to the polling port.
#[derive(Clone)]
pub struct GenerationJobs(pub ApiClient);

#[async_trait]
impl JobTracker for GenerationJobs {
    type Report = JobStatusReport;

    async fn fetch_status(&self, job_id: &str) -> Result<JobStatusReport, ApiError> {
        self.0.get_job_status(job_id).await
    }
}

// Adapts the quilt-design status accessor to the polling port.
#[derive(Clone)]
pub struct QuiltDesignJobs(pub ApiClient);

#[async_trait]
impl JobTracker for QuiltDesignJobs {
    type Report = QuiltJobStatus;

    async fn fetch_status(&self, job_id: &str) -> Result<QuiltJobStatus, ApiError> {
        self.0.get_quilt_design_job_status(job_id).await
    }
}
