// HTTP test helpers: serve a router on an ephemeral port, and a fake hosted JSON document.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Serves `router` on 127.0.0.1 with a random port and returns its base url.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Clone, Default)]
pub struct FakeDocument {
    record: Arc<RwLock<Option<Value>>>,
    puts: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct FakeDocumentState {
    document: FakeDocument,
    access_key: String,
}

#[allow(dead_code)]
impl FakeDocument {
    pub fn with_record(record: Value) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(record))),
            ..Self::default()
        }
    }

    pub fn without_record() -> Self {
        Self::default()
    }

    pub async fn record(&self) -> Value {
        self.record.read().await.clone().unwrap_or(Value::Null)
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn router(&self, access_key: &str) -> Router {
        Router::new()
            .route("/b/{bin}/latest", get(latest))
            .route("/b/{bin}", put(replace))
            .with_state(FakeDocumentState {
                document: self.clone(),
                access_key: access_key.to_string(),
            })
    }
}

fn authorized(state: &FakeDocumentState, headers: &HeaderMap) -> bool {
    headers
        .get("X-Master-Key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == state.access_key)
}

async fn latest(State(state): State<FakeDocumentState>, headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let metadata = json!({ "id": "bin-0001", "private": true });
    match state.document.record.read().await.clone() {
        Some(record) => Json(json!({ "record": record, "metadata": metadata })).into_response(),
        None => Json(json!({ "metadata": metadata })).into_response(),
    }
}

async fn replace(
    State(state): State<FakeDocumentState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.document.puts.fetch_add(1, Ordering::SeqCst);
    *state.document.record.write().await = Some(body.clone());
    Json(json!({ "record": body })).into_response()
}
