//! Mock keyless image service for integration tests
//!
//! Serves `GET /prompt/{prompt}` with fixed bytes and counts calls, so
//! tests can assert whether the fallback endpoint was actually fetched.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Bytes served for every image request
pub const MOCK_IMAGE_BYTES: &[u8] = b"mock-image-bytes";

/// Mock fallback image service
pub struct MockPollinations {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockPollinationsState>,
}

struct MockPollinationsState {
    fetch_count: AtomicU32,
    fail_status: Option<u16>,
}

impl MockPollinations {
    /// Start a mock that serves image bytes
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock that fails every fetch with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Some(status)).await
    }

    async fn start_inner(fail_status: Option<u16>) -> anyhow::Result<Self> {
        let state = Arc::new(MockPollinationsState {
            fetch_count: AtomicU32::new(0),
            fail_status,
        });

        let app = Router::new()
            .route("/prompt/{prompt}", routing::get(handle_prompt))
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

    /// Base URL for configuring the mock as the fallback service
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of image fetches received
    pub fn fetch_count(&self) -> u32 {
        self.state.fetch_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockPollinations {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_prompt(State(state): State<Arc<MockPollinationsState>>) -> axum::response::Response {
    state.fetch_count.fetch_add(1, Ordering::Relaxed);

    match state.fail_status {
        Some(status) => StatusCode::from_u16(status).unwrap().into_response(),
        None => MOCK_IMAGE_BYTES.into_response(),
    }
}
