//! Shared test helpers for integration tests.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use quarry_auth::{FileTokenStore, SessionContext, TokenStore};
use quarry_client::HttpApiClient;
use quarry_core::config::{ApiConfig, SessionConfig};

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    /// `METHOD /path`
    pub route: String,
    /// Bearer token, when one was attached
    pub bearer: Option<String>,
}

/// Mock backend state
#[derive(Default)]
pub struct MockState {
    /// Every request, in arrival order
    pub requests: Mutex<Vec<SeenRequest>>,
    /// Issued tokens and the company each is scoped to
    tokens: Mutex<HashMap<String, String>>,
    /// Tokens the backend no longer accepts
    revoked: Mutex<HashSet<String>>,
    issued: AtomicUsize,
}

impl MockState {
    fn record(&self, method: &str, path: &str, headers: &HeaderMap) {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);
        self.requests.lock().unwrap().push(SeenRequest {
            route: format!("{method} {path}"),
            bearer,
        });
    }

    fn issue(&self, company: &str) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let token = format!("t{n}");
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), company.to_string());
        token
    }

    /// Company of the request's token, or a 401 response.
    fn authorize(&self, headers: &HeaderMap) -> Result<String, Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .unwrap_or_default();
        if self.revoked.lock().unwrap().contains(token) {
            return Err(error(StatusCode::UNAUTHORIZED, "Token has expired"));
        }
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }

    /// Make the backend reject `token` from now on.
    pub fn revoke(&self, token: &str) {
        self.revoked.lock().unwrap().insert(token.to_string());
    }

    /// Requests seen so far.
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn company(id: &str) -> Value {
    match id {
        "c1" => json!({ "id": "c1", "name": "محجر الشمال", "name_en": "North Quarry", "city": "Riyadh", "status": "ACTIVE" }),
        "c2" => json!({ "id": "c2", "name": "محجر الجنوب", "name_en": "South Quarry", "city": "Abha", "status": "TRIAL" }),
        other => json!({ "id": other, "name": other }),
    }
}

fn user() -> Value {
    json!({
        "id": "u7",
        "username": "foo",
        "email": "foo@quarry.example",
        "full_name": "Foo Foreman",
        "role": "manager",
        "company_id": "c1",
        "companies": ["c1", "c2"],
        "is_active": true
    })
}

fn permissions(company: &str) -> Value {
    match company {
        "c1" => json!({
            "dashboard": ["read"],
            "expenses": ["read"],
            "equipment": ["read", "create"],
            "weighbridge": ["read"]
        }),
        "c2" => json!({
            "dashboard": ["read"],
            "production": ["read"],
            "invoices": ["read", "export"]
        }),
        _ => json!({}),
    }
}

async fn login(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST", "/api/login", &headers);
    if body["username"] != "foo" || body["password"] != "good" {
        return error(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }
    let token = state.issue("c1");
    Json(json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user(),
        "company": company("c1")
    }))
    .into_response()
}

async fn register(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST", "/api/register", &headers);
    if body["username"] == "foo" {
        return error(StatusCode::CONFLICT, "Username already registered");
    }
    if body["password"].as_str().is_some_and(|p| p.len() < 8) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "password"], "msg": "Password too short" }] })),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "id": 8, "username": body["username"] }))).into_response()
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET", "/api/me", &headers);
    match state.authorize(&headers) {
        Ok(company_id) => Json(json!({
            "user": user(),
            "company": company(&company_id),
            "role": "manager",
            "permissions": permissions(&company_id)
        }))
        .into_response(),
        Err(response) => response,
    }
}

async fn companies(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET", "/api/companies", &headers);
    match state.authorize(&headers) {
        Ok(_) => Json(json!([company("c1"), company("c2")])).into_response(),
        Err(response) => response,
    }
}

async fn switch_company(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST", "/api/switch-company", &headers);
    if let Err(response) = state.authorize(&headers) {
        return response;
    }
    let target = body["company_id"].as_str().unwrap_or_default().to_string();
    if target != "c1" && target != "c2" {
        return error(StatusCode::FORBIDDEN, "You do not belong to this company");
    }
    let token = state.issue(&target);
    Json(json!({ "access_token": token, "company": company(&target) })).into_response()
}

async fn collection(
    State(state): State<Arc<MockState>>,
    Path(resource): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.record("GET", &format!("/api/{resource}"), &headers);
    match state.authorize(&headers) {
        Ok(company_id) => Json(json!([
            { "id": 1, "company_id": company_id, "resource": resource },
            { "id": 2, "company_id": company_id, "resource": resource }
        ]))
        .into_response(),
        Err(response) => response,
    }
}

/// Mock ERP backend bound to an ephemeral port
pub struct MockBackend {
    /// Listening address
    pub addr: SocketAddr,
    /// Shared state for assertions
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Start serving on `127.0.0.1:0`
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .route("/api/login", post(login))
            .route("/api/register", post(register))
            .route("/api/me", get(me))
            .route("/api/companies", get(companies))
            .route("/api/switch-company", post(switch_company))
            .route("/api/{resource}", get(collection))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Mock backend stopped");
        });

        Self { addr, state }
    }

    /// Base URL for `ApiConfig`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Test application: mock backend, file token store and a session context
pub struct TestApp {
    /// The mock backend
    pub backend: MockBackend,
    /// Session under test
    pub session: Arc<SessionContext>,
    /// Token store backing the session
    pub tokens: Arc<FileTokenStore>,
    /// Keeps the token directory alive
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application with an empty token store
    pub async fn new() -> Self {
        let backend = MockBackend::start().await;
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self::with_backend(backend, dir)
    }

    /// Build a fresh session over an existing backend and token directory,
    /// as a new process would.
    pub fn with_backend(backend: MockBackend, dir: TempDir) -> Self {
        let session_config = SessionConfig {
            token_file: dir.path().join("session.json").to_string_lossy().into_owned(),
            ..SessionConfig::default()
        };
        let api_config = ApiConfig {
            base_url: backend.base_url(),
            timeout_seconds: 5,
            ..ApiConfig::default()
        };
        let api = Arc::new(HttpApiClient::new(&api_config).expect("Failed to build client"));
        let tokens = Arc::new(FileTokenStore::from_config(&session_config));
        let session = Arc::new(SessionContext::new(api, tokens.clone(), &session_config));
        Self {
            backend,
            session,
            tokens,
            dir,
        }
    }

    /// Bootstrap and log in as `foo`
    pub async fn logged_in() -> Self {
        let app = Self::new().await;
        app.session.bootstrap().await;
        let result = app.session.login("foo", "good").await;
        assert!(result.is_success(), "login failed: {result:?}");
        app
    }

    /// Persisted token, read straight from the store
    pub fn stored_token(&self) -> Option<String> {
        self.tokens
            .load()
            .expect("Failed to read token store")
            .map(|token| token.expose().to_string())
    }

    /// Raw contents of the token file, if it exists
    pub fn token_file(&self) -> Option<Value> {
        let raw = std::fs::read_to_string(self.tokens.path()).ok()?;
        serde_json::from_str(&raw).ok()
    }
}
