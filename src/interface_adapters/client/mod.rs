// The clients defined here are reqwest wrappers around the remote backend API.
// Every JSON call goes through `request`; only the multipart upload bypasses it.

mod account;
mod assets;
mod auth;
mod jobs;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::assets::{UploadFile, UploadOptions, UploadPurpose, UploadResult};
use crate::domain::auth::{ServiceInfo, User};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::ApiError;
use crate::domain::ports::Clock;
use crate::interface_adapters::protocol::ErrorBody;
use crate::use_cases::fallback::{FallbackContext, fallback_for};
use crate::use_cases::session::SessionManager;

// Suffix stripped from the API base to reach the backend origin.
const API_PREFIX: &str = "/api/v1";

/// Session façade over the backend REST API.
///
/// Cloning is cheap and every clone shares the same session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    clock: Arc<dyn Clock>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionManager>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid API base URL {base_url:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            session,
            clock,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn set_auth_data(
        &self,
        token: impl Into<String>,
        user: User,
        remember_me: bool,
    ) -> Result<(), ApiError> {
        self.session.set_auth_data(token, user, remember_me)
    }

    pub fn clear_auth_data(&self) {
        self.session.clear_auth_data();
    }

    /// Checks the backend origin (the API base without its version prefix).
    pub async fn test_connection(&self) -> Result<ServiceInfo, ApiError> {
        let origin = self
            .base_url
            .strip_suffix(API_PREFIX)
            .unwrap_or(&self.base_url);
        let response = self.http.get(origin).send().await.map_err(|error| {
            tracing::error!(%error, origin, "backend is not reachable");
            ApiError::transport(error)
        })?;
        decode(response).await
    }

    /// Multipart upload. Sends only the bearer header so the transport sets the
    /// multipart boundary, and never degrades to fallback data.
    #[tracing::instrument(
        name = "upload_file",
        skip_all,
        fields(file_name = %file.file_name, purpose = purpose.as_str())
    )]
    pub async fn upload_file(
        &self,
        file: UploadFile,
        purpose: UploadPurpose,
        options: UploadOptions,
    ) -> Result<UploadResult, ApiError> {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime_type) = file.mime_type {
            part = part
                .mime_str(&mime_type)
                .map_err(|e| ApiError::Validation(format!("invalid mime type {mime_type:?}: {e}")))?;
        }

        let mut form = Form::new().part("file", part).text("purpose", purpose.as_str());
        if let Some(name) = options.name {
            form = form.text("name", name);
        }
        if !options.tags.is_empty() {
            form = form.text("tags", options.tags.join(","));
        }
        if let Some(is_public) = options.is_public {
            form = form.text("isPublic", is_public.to_string());
        }

        let mut builder = self
            .http
            .post(self.url(&Endpoint::UploadDirect, None))
            .multipart(form);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|error| {
            tracing::error!(%error, "file upload failed");
            ApiError::transport(error)
        })?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| format!("Upload failed: {}", reason(status)));
            tracing::error!(status = status.as_u16(), %message, "file upload rejected");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        decode(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None, None).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: Option<String>,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, query, None).await
    }

    pub(crate) async fn send<T, B>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;
        self.request(method, endpoint, None, body).await
    }

    #[tracing::instrument(
        name = "api_request",
        skip_all,
        fields(method = %method, endpoint = %endpoint.path())
    )]
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint,
        query: Option<String>,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        endpoint.ensure_addressable()?;
        let mut builder = self
            .http
            .request(method, self.url(&endpoint, query.as_deref()))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => return self.degrade(&endpoint, error),
        };

        let status = response.status();
        if status.is_success() {
            return decode(response).await;
        }

        let message = error_message(response)
            .await
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            && !endpoint.is_auth_endpoint()
        {
            tracing::info!(status = status.as_u16(), "session rejected by backend; clearing it");
            self.session.clear_auth_data();
            return Err(ApiError::SessionExpired {
                status: status.as_u16(),
                message,
            });
        }

        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        Err(ApiError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    // No response at all: serve fallback data for allow-listed reads, fail otherwise.
    fn degrade<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        error: reqwest::Error,
    ) -> Result<T, ApiError> {
        let Some(fallback) = fallback_for(endpoint) else {
            tracing::error!(%error, "request failed");
            return Err(ApiError::transport(error));
        };

        tracing::warn!(%error, ?fallback, "backend not reachable; returning fallback data");
        let cached_user = self.session.current_user();
        let ctx = FallbackContext {
            now: self.clock.now(),
            cached_user: cached_user.as_ref(),
        };
        serde_json::from_value(fallback.produce(&ctx)).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn url(&self, endpoint: &Endpoint, query: Option<&str>) -> String {
        match query {
            Some(query) => format!("{}{}?{}", self.base_url, endpoint.path(), query),
            None => format!("{}{}", self.base_url, endpoint.path()),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

// Best-effort message from a JSON error body.
async fn error_message(response: Response) -> Option<String> {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
