use std::path::PathBuf;

use clap::Parser;

/// Prism generative-AI relay
#[derive(Debug, Parser)]
#[command(name = "prism", about = "Relay for chat and image generation with fallback degradation")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "prism.toml", env = "PRISM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "PRISM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
