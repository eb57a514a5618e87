#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use education_crm_client::config::ClientConfig;
use education_crm_client::{ApiClient, MemoryTokenStore, SessionEvents, TokenStore};

pub const VALID_TOKEN: &str = "valid-token";

/// One request as seen by the test backend
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub custom: Option<String>,
}

#[derive(Clone, Default)]
pub struct Backend {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Backend {
    fn record(&self, path: &str, headers: &HeaderMap) {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            authorization: header("authorization"),
            custom: header("x-custom"),
        });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Backend,
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        == Some(VALID_TOKEN)
}

async fn students(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.record("/api/v1/students", &headers);
    if bearer_ok(&headers) {
        (StatusCode::OK, Json(json!({ "data": [{ "id": 1, "full_name": "Asha Rao" }], "total": 1 })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid or expired token" })))
    }
}

async fn missing(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.record("/api/v1/missing", &headers);
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Student not found" })))
}

async fn boom(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.record("/api/v1/boom", &headers);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn exams(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.record("/api/v1/exams", &headers);
    (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance")
}

async fn echo(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.record("/echo", &headers);
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    Json(json!({
        "authorization": header("authorization"),
        "x-custom": header("x-custom"),
        "content-type": header("content-type"),
    }))
}

async fn login(State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    backend.record("/api/v1/auth/login", &headers);
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (email, password) {
        ("admin@example.com", "secret") => (StatusCode::OK, Json(json!({ "token": VALID_TOKEN }))),
        ("tokenless@example.com", _) => (StatusCode::OK, Json(json!({ "user": { "email": email } }))),
        ("expired@example.com", _) => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "expired" }))),
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid email or password" }))),
    }
}

async fn register(State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    backend.record("/api/v1/auth/register", &headers);
    if body.get("confirm_password").is_some() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "unexpected field" })));
    }
    match body["email"].as_str() {
        Some("taken@example.com") => (StatusCode::CONFLICT, Json(json!({ "error": "Email already registered" }))),
        Some(_) => (StatusCode::CREATED, Json(json!({ "id": 7, "full_name": body["full_name"] }))),
        None => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({}))),
    }
}

fn app(backend: Backend) -> Router {
    Router::new()
        .route("/api/v1/students", get(students))
        .route("/api/v1/missing", get(missing))
        .route("/api/v1/boom", get(boom))
        .route("/api/v1/exams", get(exams))
        .route("/echo", get(echo).post(echo))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .with_state(backend)
}

/// Start an in-process backend on a free port
pub async fn spawn_backend() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test backend")?;
    let backend = Backend::default();
    let router = app(backend.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        backend,
    })
}

pub struct Harness {
    pub config: ClientConfig,
    pub store: Arc<MemoryTokenStore>,
    pub events: SessionEvents,
    pub client: ApiClient,
}

pub fn harness(base_url: &str, token: Option<&str>) -> Harness {
    let config = ClientConfig::with_base_url(base_url);
    let store = Arc::new(MemoryTokenStore::new());
    store.set_token(token);
    let events = SessionEvents::new();
    let client = ApiClient::new(&config, store.clone(), events.clone());
    Harness {
        config,
        store,
        events,
        client,
    }
}
