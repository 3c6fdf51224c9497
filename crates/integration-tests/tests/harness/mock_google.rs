//! Mock Google Generative Language backend for integration tests
//!
//! Serves both `models/{model}:generateContent` (chat) and
//! `models/{model}:predict` (image generation) with canned responses,
//! counting calls and capturing request bodies.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock Google backend with configurable behavior
pub struct MockGoogle {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGoogleState>,
}

struct MockGoogleState {
    chat_count: AtomicU32,
    predict_count: AtomicU32,
    /// Bodies received by the chat endpoint, in arrival order
    chat_requests: Mutex<Vec<serde_json::Value>>,
    /// Bodies received by the predict endpoint, in arrival order
    predict_requests: Mutex<Vec<serde_json::Value>>,
    behavior: Behavior,
}

/// Canned behavior for the mock endpoints
#[derive(Clone)]
pub struct Behavior {
    /// Base64 payload returned by `:predict` (empty list when None)
    pub predict_payload: Option<String>,
    /// HTTP status for `:predict` (success body only sent on 200)
    pub predict_status: u16,
    /// Delay applied to `:predict` before responding
    pub predict_delay: Option<Duration>,
    /// Text returned by `:generateContent`
    pub chat_text: Option<String>,
    /// HTTP status for `:generateContent`
    pub chat_status: u16,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            predict_payload: Some("QUJDRA==".to_owned()),
            predict_status: 200,
            predict_delay: None,
            chat_text: Some("Hello from mock Gemini".to_owned()),
            chat_status: 200,
        }
    }
}

impl MockGoogle {
    /// Start the mock with default canned responses
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Behavior::default()).await
    }

    /// Start the mock with custom behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockGoogleState {
            chat_count: AtomicU32::new(0),
            predict_count: AtomicU32::new(0),
            chat_requests: Mutex::new(Vec::new()),
            predict_requests: Mutex::new(Vec::new()),
            behavior,
        });

        let app = Router::new()
            .route("/v1beta/models/{model_action}", routing::post(handle_model_action))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// Number of `:generateContent` requests received
    pub fn chat_count(&self) -> u32 {
        self.state.chat_count.load(Ordering::Relaxed)
    }

    /// Number of `:predict` requests received
    pub fn predict_count(&self) -> u32 {
        self.state.predict_count.load(Ordering::Relaxed)
    }

    /// Bodies received by the chat endpoint, in arrival order
    pub fn chat_requests(&self) -> Vec<serde_json::Value> {
        self.state.chat_requests.lock().unwrap().clone()
    }

    /// Bodies received by the predict endpoint, in arrival order
    pub fn predict_requests(&self) -> Vec<serde_json::Value> {
        self.state.predict_requests.lock().unwrap().clone()
    }
}

impl Drop for MockGoogle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Dispatch on the `{model}:{action}` path segment
async fn handle_model_action(
    State(state): State<Arc<MockGoogleState>>,
    Path(model_action): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    if model_action.ends_with(":generateContent") {
        handle_chat(&state, body).await
    } else if model_action.ends_with(":predict") {
        handle_predict(&state, body).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn handle_chat(state: &MockGoogleState, body: serde_json::Value) -> axum::response::Response {
    state.chat_count.fetch_add(1, Ordering::Relaxed);
    state.chat_requests.lock().unwrap().push(body);

    if state.behavior.chat_status != 200 {
        let status = StatusCode::from_u16(state.behavior.chat_status).unwrap();
        let body = serde_json::json!({
            "error": { "code": state.behavior.chat_status, "message": "mock chat error", "status": "FAILED" }
        });
        return (status, Json(body)).into_response();
    }

    let candidates = state.behavior.chat_text.as_ref().map_or_else(
        || serde_json::json!([]),
        |text| {
            serde_json::json!([{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }])
        },
    );

    Json(serde_json::json!({ "candidates": candidates })).into_response()
}

async fn handle_predict(state: &MockGoogleState, body: serde_json::Value) -> axum::response::Response {
    state.predict_count.fetch_add(1, Ordering::Relaxed);
    state.predict_requests.lock().unwrap().push(body);

    if let Some(delay) = state.behavior.predict_delay {
        tokio::time::sleep(delay).await;
    }

    if state.behavior.predict_status != 200 {
        let status = StatusCode::from_u16(state.behavior.predict_status).unwrap();
        let body = serde_json::json!({
            "error": { "code": state.behavior.predict_status, "message": "mock predict error", "status": "FAILED" }
        });
        return (status, Json(body)).into_response();
    }

    let predictions = state.behavior.predict_payload.as_ref().map_or_else(
        || serde_json::json!([]),
        |payload| serde_json::json!([{ "bytesBase64Encoded": payload }]),
    );

    Json(serde_json::json!({ "predictions": predictions })).into_response()
}
