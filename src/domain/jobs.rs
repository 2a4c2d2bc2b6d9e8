use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Backend-owned job lifecycle. The client only observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Processing,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

// Anything a poll can return: it must expose the job state.
pub trait JobReport {
    fn state(&self) -> JobState;
}

// Returned by job creation calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJob {
    pub job_id: String,
    pub status: JobState,
    #[serde(default)]
    pub estimated_time: f64,
    pub queue_position: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub strength: f64,
    pub preserve_face: bool,
    pub background: String,
    pub style: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            strength: 0.9,
            preserve_face: true,
            background: "transparent".to_string(),
            style: "artistic".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputImage {
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusReport {
    pub job_id: String,
    pub status: JobState,
    #[serde(default)]
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_time: f64,
    pub processing_time: Option<f64>,
    pub queue_time: Option<f64>,
    pub output_image: Option<OutputImage>,
    pub error: Option<String>,
    pub error_details: Option<Value>,
}

impl JobReport for JobStatusReport {
    fn state(&self) -> JobState {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltDesignOptions {
    pub style: String,
    pub color_palette: Vec<String>,
    pub complexity: u8,
    pub size: String,
    pub rows: u32,
    pub columns: u32,
    pub symmetry: String,
}

impl Default for QuiltDesignOptions {
    fn default() -> Self {
        Self {
            style: "modern".to_string(),
            color_palette: ["#FF6B6B", "#4ECDC4", "#FFD166", "#06D6A0", "#118AB2"]
                .into_iter()
                .map(String::from)
                .collect(),
            complexity: 3,
            size: "throw".to_string(),
            rows: 8,
            columns: 8,
            symmetry: "mirror".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltOutputImage {
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
    pub prompt: String,
    pub metadata: QuiltDesignOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltJobStatus {
    pub job_id: String,
    pub status: JobState,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_time: f64,
    pub processing_time: Option<f64>,
    pub output_image: Option<QuiltOutputImage>,
    pub error: Option<String>,
}

impl JobReport for QuiltJobStatus {
    fn state(&self) -> JobState {
        self.status
    }
}
