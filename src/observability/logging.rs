//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Default to useful filter directives when RUST_LOG is unset
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Log level configurable via the RUST_LOG environment variable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "model_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
