use std::time::Duration;

use serde::Deserialize;

use crate::domain::errors::ApiError;
use crate::domain::jobs::JobReport;
use crate::domain::ports::JobTracker;

// Cadence for caller-side polling. The façade itself never polls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    #[serde(with = "millis")]
    pub initial_interval: Duration,
    pub backoff_factor: f64,
    #[serde(with = "millis")]
    pub max_interval: Duration,
    pub max_attempts: u32,
    // Transport failures tolerated in a row before the poll gives up.
    pub max_consecutive_transport_errors: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(2),
            backoff_factor: 1.5,
            max_interval: Duration::from_secs(10),
            max_attempts: 150,
            max_consecutive_transport_errors: 3,
        }
    }
}

impl PollPolicy {
    fn next_interval(&self, current: Duration) -> Duration {
        // Overflowing products saturate at the cap instead of panicking.
        Duration::try_from_secs_f64(current.as_secs_f64() * self.backoff_factor.max(1.0))
            .unwrap_or(self.max_interval)
            .min(self.max_interval)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("job {job_id} still running after {attempts} status checks")]
    TimedOut { job_id: String, attempts: u32 },

    #[error(transparent)]
    Status(#[from] ApiError),
}

/// Polls a job until the backend reports a terminal state.
///
/// A `failed` job is a successful poll: the report is returned and the caller
/// decides what to show. Cancellation is dropping the returned future.
pub struct PollJobUseCase<T> {
    pub tracker: T,
    pub policy: PollPolicy,
}

impl<T> PollJobUseCase<T>
where
    T: JobTracker,
{
    #[tracing::instrument(name = "poll_job", skip(self))]
    pub async fn execute(&self, job_id: &str) -> Result<T::Report, PollError> {
        let mut interval = self.policy.initial_interval;
        let mut transport_errors = 0;

        for attempt in 1..=self.policy.max_attempts {
            match self.tracker.fetch_status(job_id).await {
                Ok(report) if report.state().is_terminal() => {
                    tracing::info!(attempt, state = ?report.state(), "job finished");
                    return Ok(report);
                }
                Ok(report) => {
                    transport_errors = 0;
                    tracing::debug!(attempt, state = ?report.state(), "job still running");
                }
                Err(error)
                    if error.is_transport()
                        && transport_errors < self.policy.max_consecutive_transport_errors =>
                {
                    transport_errors += 1;
                    tracing::warn!(attempt, %error, "status check failed; retrying");
                }
                Err(error) => return Err(PollError::Status(error)),
            }

            if attempt < self.policy.max_attempts {
                tokio::time::sleep(interval).await;
                interval = self.policy.next_interval(interval);
            }
        }

        Err(PollError::TimedOut {
            job_id: job_id.to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
