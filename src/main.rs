//! model-gateway
//!
//! A path-routed reverse proxy for LLM API backends, built with Tokio and
//! Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 MODEL GATEWAY                  │
//!                     │                                                │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│ routing  │──▶│   header   │  │
//!                     │  │ server  │   │ resolver │   │   filter   │  │
//!                     │  └─────────┘   └──────────┘   └─────┬──────┘  │
//!                     │                                     │         │
//!                     │                                     ▼         │
//!   Client Response   │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │     Backend
//!   ◀─────────────────┼──│ header  │◀──│ response │◀──│  upstream  │◀─┼──── (per-model
//!                     │  │ filter  │   │  stream  │   │   client   │  │      origin)
//!                     │  └─────────┘   └──────────┘   └────────────┘  │
//!                     │                                                │
//!                     │  Cross-cutting: config, observability,         │
//!                     │  lifecycle                                     │
//!                     └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use model_gateway::config::{load_config, GatewayConfig};
use model_gateway::http::HttpServer;
use model_gateway::lifecycle::{wait_for_signal, Shutdown};
use model_gateway::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "model-gateway", version, about = "Path-routed LLM API reverse proxy")]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = config.backends.len(),
        request_timeout_secs = config.upstream.request_timeout_secs,
        max_body_bytes = config.listener.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let serve = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    wait_for_signal().await;
    shutdown.trigger();

    serve.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
