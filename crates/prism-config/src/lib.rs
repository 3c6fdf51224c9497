#![allow(clippy::must_use_candidate)]

pub mod chat;
pub mod cors;
mod env;
pub mod health;
pub mod imagine;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use chat::*;
pub use cors::*;
pub use health::*;
pub use imagine::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Prism configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chat relay configuration
    #[serde(default)]
    pub chat: ChatConfig,
    /// Image generation configuration
    #[serde(default)]
    pub imagine: ImagineConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
