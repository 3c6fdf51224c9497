//! HTTP server assembly for Prism
//!
//! Wires the chat relay and image generation degrader into a single
//! axum router with CORS, request tracing, and a body-size cap wide
//! enough for inline images.

mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use prism_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if subsystem initialization fails
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let chat_state = prism_chat::build_relay(config)?;
        let imagine_state = prism_imagine::build_server(config)?;

        let mut app = Router::new();

        // Liveness check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Chat relay routes
        app = app.merge(prism_chat::endpoint_router().with_state(chat_state));

        // Image generation routes
        app = app.merge(prism_imagine::endpoint_router().with_state(imagine_state));

        // Apply middleware layers (innermost first)

        // Body cap sized for inline base64 images
        app = app.layer(DefaultBodyLimit::max(config.server.body_limit_bytes));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS; a browser-facing relay defaults to fully permissive
        let cors_config = config.server.cors.clone().unwrap_or_default();
        app = app.layer(cors::cors_layer(&cors_config));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
