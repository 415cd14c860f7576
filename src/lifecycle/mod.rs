//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Initialize subsystems → Start listener
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → Trigger broadcast → Server drains and exits
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then core, then listener
//! - In-flight requests drain during graceful shutdown

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};
