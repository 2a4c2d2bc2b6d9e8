use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::errors::ApiError;
use crate::use_cases::poll_job::PollPolicy;

// Runtime/client settings. Precedence: defaults < TOML file < environment.

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/v1";
pub const CONFIG_FILE_VAR: &str = "SWAPMYLOOK_CONFIG";
pub const API_URL_VAR: &str = "SWAPMYLOOK_API_URL";
pub const TIMEOUT_VAR: &str = "SWAPMYLOOK_TIMEOUT_MS";
pub const SESSION_FILE_VAR: &str = "SWAPMYLOOK_SESSION_FILE";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_SESSION_FILE: &str = ".swapmylook/session.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout_ms: u64,
    pub session_file: PathBuf,
    pub poll: PollPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            poll: PollPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        Self::load(|key| std::env::var(key).ok())
    }

    // Lookup is injected so tests never touch the process environment.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(api_url) = lookup(API_URL_VAR) {
            config.api_url = api_url;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.request_timeout_ms = raw
                .parse()
                .map_err(|_| ApiError::Config(format!("{TIMEOUT_VAR} must be milliseconds, got {raw:?}")))?;
        }
        if let Some(path) = lookup(SESSION_FILE_VAR) {
            config.session_file = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ApiError> {
        toml::from_str(raw).map_err(|e| ApiError::Config(format!("invalid config: {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn validate(&self) -> Result<(), ApiError> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| ApiError::Config(format!("invalid api_url {:?}: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "api_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ApiError::Config("request timeout must be positive".to_string()));
        }
        if !self.poll.backoff_factor.is_finite() || self.poll.backoff_factor < 1.0 {
            return Err(ApiError::Config(
                "poll backoff_factor must be a finite number >= 1.0".to_string(),
            ));
        }
        if self.poll.max_interval < self.poll.initial_interval {
            return Err(ApiError::Config(
                "poll max_interval must not be shorter than initial_interval".to_string(),
            ));
        }
        Ok(())
    }
}
