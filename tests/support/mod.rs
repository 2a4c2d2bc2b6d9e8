// Scriptable stand-in for the backend, served by axum on an ephemeral port.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use swapmylook_client::{
    ApiClient, SessionManager,
    domain::{Clock, SessionStore, User, auth::Quota},
    interface_adapters::MemoryStore,
};

pub const API_PREFIX: &str = "/api/v1";

// What the backend saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

#[derive(Default)]
struct Script {
    // (method, path) -> queue of responses; the last one repeats.
    responses: HashMap<(String, String), Vec<(StatusCode, Value)>>,
    recorded: Vec<RecordedRequest>,
}

#[derive(Clone)]
pub struct FakeBackend {
    pub base_url: String,
    script: Arc<Mutex<Script>>,
}

impl FakeBackend {
    // Spawned on the calling test's runtime; it stops when the test ends.
    pub async fn start() -> Self {
        let script = Arc::new(Mutex::new(Script::default()));
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend failed");
        });

        Self {
            base_url: format!("http://{addr}{API_PREFIX}"),
            script,
        }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.lock()
            .responses
            .entry((method.to_string(), full_path(path)))
            .or_default()
            .push((status, body));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().recorded.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        let path = full_path(path);
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script lock")
    }
}

// Paths starting with '/' are API routes; "ORIGIN/..." addresses the bare origin.
fn full_path(path: &str) -> String {
    match path.strip_prefix("ORIGIN") {
        Some(origin_path) => origin_path.to_string(),
        None => format!("{API_PREFIX}{path}"),
    }
}

async fn handle(
    State(script): State<Arc<Mutex<Script>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    };

    let mut script = script.lock().expect("script lock");
    let key = (recorded.method.clone(), recorded.path.clone());
    script.recorded.push(recorded);

    match script.responses.get_mut(&key) {
        Some(queue) if queue.len() > 1 => {
            let (status, body) = queue.remove(0);
            (status, Json(body))
        }
        Some(queue) if !queue.is_empty() => {
            let (status, body) = queue[0].clone();
            (status, Json(body))
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))),
    }
}

// A base URL nothing listens on: bind, note the port, release it.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind scratch port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

// Client plus handles on both stores so tests can inspect persistence.
pub struct Harness {
    pub client: ApiClient,
    pub durable: Arc<MemoryStore>,
    pub ephemeral: Arc<MemoryStore>,
}

impl Harness {
    pub fn new(base_url: &str) -> Self {
        Self::with_stores(base_url, MemoryStore::new(), MemoryStore::new())
    }

    pub fn signed_in(base_url: &str, token: &str) -> Self {
        let durable = MemoryStore::new();
        durable.set("authToken", token).expect("seed token");
        durable
            .set(
                "userData",
                &serde_json::to_string(&sample_user("u1")).expect("encode user"),
            )
            .expect("seed user");
        Self::with_stores(base_url, durable, MemoryStore::new())
    }

    fn with_stores(base_url: &str, durable: MemoryStore, ephemeral: MemoryStore) -> Self {
        let durable = Arc::new(durable);
        let ephemeral = Arc::new(ephemeral);
        let session = Arc::new(SessionManager::hydrate(
            durable.clone(),
            ephemeral.clone(),
        ));
        let client = ApiClient::new(
            base_url,
            Duration::from_secs(5),
            session,
            Arc::new(FixedClock(fixed_now())),
        )
        .expect("client should build");

        Self {
            client,
            durable,
            ephemeral,
        }
    }

    pub fn durable_value(&self, key: &str) -> Option<String> {
        self.durable.get(key).expect("durable read")
    }

    pub fn ephemeral_value(&self, key: &str) -> Option<String> {
        self.ephemeral.get(key).expect("ephemeral read")
    }
}

pub fn sample_user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        name: "Sample User".to_string(),
        avatar_url: String::new(),
        plan: "free".to_string(),
        quota: Quota {
            monthly_requests: 100,
            used_this_month: 10,
            remaining: 90,
            reset_date: fixed_now(),
            has_quota: true,
        },
    }
}

pub fn user_json(id: &str) -> Value {
    serde_json::to_value(sample_user(id)).expect("encode user")
}

pub fn job_status_json(job_id: &str, status: &str) -> Value {
    json!({
        "jobId": job_id,
        "status": status,
        "attempts": 1,
        "createdAt": "2025-03-01T12:00:00.000Z",
        "updatedAt": "2025-03-01T12:00:05.000Z",
        "estimatedTime": 30,
        "processingTime": null,
        "queueTime": null,
        "outputImage": null,
        "error": null,
        "errorDetails": null
    })
}
