use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::auth::OtpPurpose;
use crate::domain::billing::{BillingCycle, ProrationOption};
use crate::domain::jobs::{GenerationOptions, QuiltDesignOptions};

// Error envelope returned by the backend. Older routes use `message`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

#[derive(Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub remember_me: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTokenRequest<'a> {
    pub id_token: &'a str,
}

#[derive(Serialize)]
pub struct OtpSendRequest<'a> {
    pub email: &'a str,
    pub purpose: OtpPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Serialize)]
pub struct OtpVerifyRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
    pub purpose: OtpPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

#[derive(Serialize)]
pub struct OtpResendRequest<'a> {
    pub email: &'a str,
    pub purpose: OtpPurpose,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    pub model_image_id: &'a str,
    pub outfit_image_id: &'a str,
    pub options: GenerationOptions,
}

#[derive(Serialize)]
pub struct QuiltDesignRequest<'a> {
    pub prompt: &'a str,
    pub options: QuiltDesignOptions,
}

#[derive(Serialize)]
pub struct FavoriteRequest {
    pub favorite: bool,
}

#[derive(Serialize)]
pub struct MetadataRequest<'a> {
    pub metadata: &'a Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Serialize)]
pub struct DeleteAccountRequest<'a> {
    pub confirmation: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest<'a> {
    pub plan: &'a str,
    pub billing_cycle: BillingCycle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlanRequest<'a> {
    pub plan: &'a str,
    pub proration_option: ProrationOption,
}
