use reqwest::Method;

use super::ApiClient;
use crate::domain::auth::{
    AuthResponse, CurrentUser, GoogleAuthUrl, MessageResponse, OtpDispatch, OtpPurpose,
    OtpVerification, Quota, User, validate_email, validate_otp_code,
};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::ApiError;
use crate::interface_adapters::protocol::{
    GoogleTokenRequest, LoginRequest, OtpResendRequest, OtpSendRequest, OtpVerifyRequest,
    SignupRequest,
};

// Allowance shown on the placeholder user until /auth/me answers.
const PLACEHOLDER_MONTHLY_REQUESTS: u64 = 100;

impl ApiClient {
    pub async fn get_google_auth_url(&self) -> Result<GoogleAuthUrl, ApiError> {
        self.get(Endpoint::GoogleAuthUrl).await
    }

    pub async fn google_auth_with_token(&self, id_token: &str) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .send(
                Method::POST,
                Endpoint::GoogleToken,
                Some(&GoogleTokenRequest { id_token }),
            )
            .await?;
        self.session
            .set_auth_data(response.token.clone(), response.user.clone(), true)?;
        Ok(response)
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        validate_email(email)?;
        let response: AuthResponse = self
            .send(
                Method::POST,
                Endpoint::Signup,
                Some(&SignupRequest {
                    email,
                    password,
                    name,
                }),
            )
            .await?;
        self.session
            .set_auth_data(response.token.clone(), response.user.clone(), true)?;
        Ok(response)
    }

    /// Password login. `remember_me` picks the durable store over the
    /// session-scoped one and is forwarded so the backend can size the token TTL.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<AuthResponse, ApiError> {
        validate_email(email)?;
        let response: AuthResponse = self
            .send(
                Method::POST,
                Endpoint::Login,
                Some(&LoginRequest {
                    email,
                    password,
                    remember_me,
                }),
            )
            .await?;
        self.session
            .set_auth_data(response.token.clone(), response.user.clone(), remember_me)?;
        Ok(response)
    }

    pub async fn send_otp(
        &self,
        email: &str,
        purpose: OtpPurpose,
        name: Option<&str>,
    ) -> Result<OtpDispatch, ApiError> {
        validate_email(email)?;
        self.send(
            Method::POST,
            Endpoint::OtpSend,
            Some(&OtpSendRequest {
                email,
                purpose,
                name,
            }),
        )
        .await
    }

    /// Verifies an emailed code. A session is stored only when the backend
    /// returns both a token and a user; password resets return a reset token.
    pub async fn verify_otp(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<OtpVerification, ApiError> {
        validate_email(email)?;
        validate_otp_code(code)?;
        let response: OtpVerification = self
            .send(
                Method::POST,
                Endpoint::OtpVerify,
                Some(&OtpVerifyRequest {
                    email,
                    code,
                    purpose,
                    name,
                    password,
                }),
            )
            .await?;

        if let (Some(token), Some(user)) = (&response.token, &response.user) {
            self.session.set_auth_data(token.clone(), user.clone(), true)?;
        }
        Ok(response)
    }

    pub async fn resend_otp(&self, email: &str, purpose: OtpPurpose) -> Result<OtpDispatch, ApiError> {
        validate_email(email)?;
        self.send(
            Method::POST,
            Endpoint::OtpResend,
            Some(&OtpResendRequest { email, purpose }),
        )
        .await
    }

    /// Refreshes the cached user from the backend. When the backend is
    /// unreachable the cached user is returned unchanged.
    pub async fn fetch_current_user(&self) -> Result<CurrentUser, ApiError> {
        let response: CurrentUser = self.get(Endpoint::Me).await?;
        if let Some(user) = &response.user {
            self.session.replace_user(user.clone())?;
        }
        Ok(response)
    }

    // The local session is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let result = self
            .send::<MessageResponse, ()>(Method::POST, Endpoint::Logout, None)
            .await;
        self.session.clear_auth_data();
        result
    }

    pub async fn get_user_quota(&self) -> Result<Quota, ApiError> {
        self.get(Endpoint::Quota).await
    }

    /// Completes the OAuth redirect: installs the token with a placeholder user,
    /// then replaces the placeholder with the real profile.
    pub async fn complete_oauth_callback(
        &self,
        token: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<CurrentUser, ApiError> {
        let (Some(token), Some(user_id)) = (
            token.filter(|t| !t.trim().is_empty()),
            user_id.filter(|u| !u.trim().is_empty()),
        ) else {
            return Err(ApiError::Validation(
                "Missing authentication information. Please try again.".to_string(),
            ));
        };

        let placeholder = User {
            id: user_id.to_string(),
            email: String::new(),
            name: String::new(),
            avatar_url: String::new(),
            plan: "free".to_string(),
            quota: Quota {
                monthly_requests: PLACEHOLDER_MONTHLY_REQUESTS,
                used_this_month: 0,
                remaining: PLACEHOLDER_MONTHLY_REQUESTS,
                reset_date: self.clock.now(),
                has_quota: true,
            },
        };
        self.session.set_auth_data(token, placeholder, true)?;
        self.fetch_current_user().await
    }
}
