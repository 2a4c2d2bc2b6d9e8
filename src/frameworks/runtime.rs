// Framework bootstrap for the diagnostic client runtime.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::domain::errors::ApiError;
use crate::frameworks::config::ClientConfig;
use crate::interface_adapters::{ApiClient, FileStore, MemoryStore, SystemClock};
use crate::use_cases::session::SessionManager;

pub const LOG_FILTER_VAR: &str = "SWAPMYLOOK_LOG";
pub const LOG_FORMAT_VAR: &str = "SWAPMYLOOK_LOG_FORMAT";

// Our own spans at info; dependencies only when they warn.
const DEFAULT_LOG_FILTER: &str = "warn,swapmylook_client=info";

// SWAPMYLOOK_LOG wins over RUST_LOG; an unparsable value falls through.
fn log_filter(lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    [LOG_FILTER_VAR, "RUST_LOG"]
        .into_iter()
        .filter_map(|var| lookup(var))
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn json_logs(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup(LOG_FORMAT_VAR)
        .or_else(|| lookup("LOG_FORMAT"))
        .is_some_and(|format| format.eq_ignore_ascii_case("json"))
}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let env = |key: &str| std::env::var(key).ok();
    let filter = log_filter(env);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json_logs(env) {
        builder.json().with_current_span(true).init();
    } else {
        builder.compact().init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "client panicked");
    }));
}

/// Wires stores, session and client from `config`.
///
/// The durable store is the configured session file; the ephemeral store
/// lives as long as the process.
pub fn build_client(config: &ClientConfig) -> Result<ApiClient, ApiError> {
    let durable = Arc::new(FileStore::new(config.session_file.clone()));
    let ephemeral = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionManager::hydrate(durable, ephemeral));

    ApiClient::new(
        config.api_url.clone(),
        config.request_timeout(),
        session,
        Arc::new(SystemClock),
    )
}

// Checks backend reachability and reports the persisted session, if any.
pub async fn run(config: ClientConfig) -> Result<(), ApiError> {
    let client = build_client(&config)?;
    tracing::debug!(
        api_url = %client.base_url(),
        request_timeout_ms = config.request_timeout_ms,
        session_file = %config.session_file.display(),
        "client configured"
    );

    let service = client.test_connection().await?;
    tracing::info!(status = %service.status, version = %service.version, "backend reachable");

    if !client.is_authenticated() {
        tracing::info!("no stored session");
        return Ok(());
    }

    let current = client.fetch_current_user().await?;
    match current.user {
        Some(user) => {
            let quota = client.get_user_quota().await?;
            tracing::info!(
                user_id = %user.id,
                plan = %user.plan,
                remaining = quota.remaining,
                monthly_requests = quota.monthly_requests,
                "session active"
            );
        }
        None => tracing::info!("stored session has no user"),
    }
    Ok(())
}

pub async fn run_with_config() -> Result<(), ApiError> {
    init_runtime();

    let config = ClientConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
    })?;

    run(config).await
}
