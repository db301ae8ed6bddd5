//! Shared mock UniTalk backend for integration tests.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{any, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use unitalk_client::config::ClientConfig;

/// Programmable backend state shared with the test body.
pub struct BackendState {
    /// Bearer token protected routes currently accept.
    pub valid_token: Mutex<String>,
    /// Refresh calls observed, across all waves.
    pub refresh_calls: AtomicU32,
    /// Whether the refresh endpoint succeeds.
    pub refresh_ok: AtomicBool,
    /// Whether a successful refresh also rotates `valid_token` to the
    /// token it hands out (off = the renewed token is still rejected).
    pub rotate_on_refresh: AtomicBool,
    /// Artificial delay before the refresh endpoint answers, to hold a
    /// renewal wave open while more requests pile up.
    pub refresh_delay_ms: AtomicU64,
    /// Paths of successfully authorized requests, in service order.
    pub served: Mutex<Vec<String>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    /// Client config pointed at this backend.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: format!("http://{}/api_backend", self.addr),
            ..Default::default()
        }
    }
}

/// Start a mock backend on an ephemeral port.
///
/// Routes:
/// - `POST /api_backend/token/refresh/` — programmable renewal endpoint
/// - `/api_backend/public/...` — open, echoes the Authorization header
/// - `/api_backend/boom/...` — open, always answers 500
/// - everything else — requires `Bearer <valid_token>`, else 401
pub async fn start_mock_backend() -> MockBackend {
    let state = Arc::new(BackendState {
        valid_token: Mutex::new("initial".to_string()),
        refresh_calls: AtomicU32::new(0),
        refresh_ok: AtomicBool::new(true),
        rotate_on_refresh: AtomicBool::new(true),
        refresh_delay_ms: AtomicU64::new(0),
        served: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api_backend/token/refresh/", post(refresh))
        .route("/api_backend/{*path}", any(protected))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend { addr, state }
}

async fn refresh(State(state): State<Arc<BackendState>>) -> (StatusCode, Json<Value>) {
    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let calls = state.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if !state.refresh_ok.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Token is invalid or expired" })),
        );
    }

    let access = format!("renewed-{calls}");
    if state.rotate_on_refresh.load(Ordering::SeqCst) {
        *state.valid_token.lock().unwrap() = access.clone();
    }
    (StatusCode::OK, Json(json!({ "access": access })))
}

async fn protected(
    State(state): State<Arc<BackendState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if path.starts_with("public/") {
        return (
            StatusCode::OK,
            Json(json!({ "path": path, "authorization": authorization })),
        );
    }
    if path.starts_with("boom/") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "exploded" })),
        );
    }

    let expected = format!("Bearer {}", state.valid_token.lock().unwrap());
    if authorization.as_deref() == Some(expected.as_str()) {
        state.served.lock().unwrap().push(path.clone());
        (
            StatusCode::OK,
            Json(json!({ "path": path, "authorization": authorization })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Given token not valid for any token type" })),
        )
    }
}
