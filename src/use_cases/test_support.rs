use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::auth::{Quota, User};
use crate::domain::errors::ApiError;
use crate::domain::jobs::{JobReport, JobState};
use crate::domain::ports::{Clock, JobTracker, SessionStore};
use crate::use_cases::session::{TOKEN_KEY, USER_KEY};

pub(crate) type Entries = Arc<Mutex<HashMap<String, String>>>;

// Shared fixed time source for deterministic tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at_epoch_seconds(seconds: i64) -> Self {
        Self(Utc.timestamp_opt(seconds, 0).single().expect("valid timestamp"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
    pub remove: bool,
}

// In-memory store whose contents tests can inspect; clones share entries.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    entries: Entries,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_raw(&self, key: &str, value: &str) {
        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn insert_test_session(&self, token: &str, user: &User) {
        self.insert_raw(TOKEN_KEY, token);
        self.insert_raw(
            USER_KEY,
            &serde_json::to_string(user).expect("user should serialize"),
        );
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().expect("entries mutex poisoned");
        guard.get(key).cloned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.lock().expect("entries mutex poisoned").is_empty()
    }
}

impl SessionStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        if self.failures.set {
            return Err("set failed".to_string());
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }
        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

pub(crate) fn sample_user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        name: "Sample".to_string(),
        avatar_url: String::new(),
        plan: "free".to_string(),
        quota: Quota {
            monthly_requests: 25,
            used_this_month: 3,
            remaining: 22,
            reset_date: Utc
                .with_ymd_and_hms(2026, 11, 1, 0, 0, 0)
                .single()
                .expect("valid date"),
            has_quota: true,
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StubReport(pub(crate) JobState);

impl JobReport for StubReport {
    fn state(&self) -> JobState {
        self.0
    }
}

// Replays a fixed sequence of poll outcomes and counts calls.
#[derive(Clone)]
pub(crate) struct ScriptedTracker {
    script: Arc<Mutex<VecDeque<Result<JobState, ApiError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTracker {
    pub(crate) fn new(script: Vec<Result<JobState, ApiError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().expect("calls mutex poisoned").len()
    }
}

#[async_trait]
impl JobTracker for ScriptedTracker {
    type Report = StubReport;

    async fn fetch_status(&self, job_id: &str) -> Result<StubReport, ApiError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(job_id.to_string());
        let next = self
            .script
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            // Once the script runs out, the job keeps processing.
            .unwrap_or(Ok(JobState::Processing));
        next.map(StubReport)
    }
}
