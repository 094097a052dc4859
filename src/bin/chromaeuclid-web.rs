//! ChromaEuclid Web Server Binary
//!
//! This binary starts the ChromaEuclid web server that provides a REST API
//! and the embedded single-page explorer.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from config.toml (default 127.0.0.1:3001)
//! chromaeuclid-web
//!
//! # Override the port
//! chromaeuclid-web --port 8080
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chromaeuclid::config::Config;
use chromaeuclid::web;

/// ChromaEuclid Web Server - palette explorer UI and REST API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (default from config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (default from config)
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    if config.resolve_api_key().is_none() {
        warn!(
            "No API key found (set {} or ai.api_key); AI suggestions are disabled",
            config.ai.api_key_env
        );
    }

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context(format!("Invalid listen address {host}:{port}"))?;

    info!("Using config {}", Config::config_file_path()?.display());

    web::run_server(config, addr).await
}
