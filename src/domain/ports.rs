use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::ApiError;
use crate::domain::jobs::JobReport;

// Port for one persisted key/value store. The durable and session-scoped
// stores are two implementations of the same port.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// Port the polling scheduler reads job state through.
#[async_trait]
pub trait JobTracker: Send + Sync {
    type Report: JobReport + Send;

    async fn fetch_status(&self, job_id: &str) -> Result<Self::Report, ApiError>;
}
