//! Image generation degrader for Prism
//!
//! Attempts the credentialed primary provider under a short deadline
//! and degrades to a keyless fallback service on any failure or
//! timeout. Every successful response names the provider that actually
//! produced it.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod fallback;
mod primary;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{ImagineError, Result};
pub use types::{ImageSource, ImagineRequest, ImagineResponse};

use server::ImagineServerBuilder;
pub use server::Server;

/// Build the image generation server from configuration
pub fn build_server(config: &prism_config::Config) -> anyhow::Result<Arc<Server>> {
    Ok(Arc::new(ImagineServerBuilder::new(&config.imagine).build()))
}

/// Create the endpoint router for image generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/imagine", post(imagine))
}

/// Handle image generation requests
async fn imagine(
    State(server): State<Arc<Server>>,
    Json(request): Json<ImagineRequest>,
) -> Result<Json<ImagineResponse>> {
    tracing::debug!("image generation handler called");

    let response = server.generate(&request).await?;

    tracing::debug!(source = ?response.source, "image generation complete");

    Ok(Json(response))
}
