use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ApiError;

const OTP_LENGTH: usize = 6;

// Cached account profile, mirrored from login/signup and /auth/me.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub plan: String,
    pub quota: Quota,
}

// Advisory usage numbers; the backend enforces quota when a job is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    pub monthly_requests: u64,
    pub used_this_month: u64,
    pub remaining: u64,
    pub reset_date: DateTime<Utc>,
    pub has_quota: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Signup,
    Login,
    PasswordReset,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpDispatch {
    pub message: String,
    pub expires_in: u64,
}

// Outcome of OTP verification. Signup/login yield a session; password reset
// yields a reset token instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    pub token: Option<String>,
    pub user: Option<User>,
    pub message: Option<String>,
    pub reset_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleAuthUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// Banner returned by the backend origin.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    Ok(())
}

pub fn validate_otp_code(code: &str) -> Result<(), ApiError> {
    if code.len() != OTP_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Please enter a valid 6-digit OTP".to_string(),
        ));
    }
    Ok(())
}
