//! Chat relay for Prism
//!
//! Forwards a prompt plus optional history and inline image to the
//! Google Generative Language API and maps the reply (or error) back
//! to the relay's uniform envelope.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod protocol;
mod relay;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{ChatError, Result};
pub use relay::ChatRelay;
pub use types::{ChatRequest, ChatResponse, ChatTurn};

/// Build the chat relay from configuration
pub fn build_relay(config: &prism_config::Config) -> anyhow::Result<Arc<ChatRelay>> {
    Ok(Arc::new(ChatRelay::new(&config.chat)))
}

/// Create the endpoint router for the chat relay
pub fn endpoint_router() -> Router<Arc<ChatRelay>> {
    Router::new().route("/api/chat", post(chat))
}

/// Handle chat requests
async fn chat(
    State(relay): State<Arc<ChatRelay>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    tracing::debug!(history_len = request.history.as_ref().map_or(0, Vec::len), "chat handler called");

    let text = relay.relay(&request).await?;

    tracing::debug!("chat relay complete");

    Ok(Json(ChatResponse { success: true, text }))
}
