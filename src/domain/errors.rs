// Error taxonomy surfaced by every façade operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),

    // 401/403 on a non-auth endpoint; the session has already been cleared.
    #[error("{message}")]
    SessionExpired { status: u16, message: String },

    #[error("{message}")]
    Upstream { status: u16, message: String },

    // No HTTP response at all (connect failure, timeout, reset).
    #[error("backend unreachable: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("session storage failure: {0}")]
    Storage(String),

    #[error("client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn transport(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        ApiError::Transport(Box::new(error))
    }

    // Text suitable for a user-facing notification.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired { status, .. } | ApiError::Upstream { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::SessionExpired { .. } => true,
            ApiError::Upstream { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}
