//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound connection
//!     → server.rs (Axum setup, wildcard dispatch)
//!     → [routing layer resolves model + backend]
//!     → headers.rs (request-direction filter)
//!     → upstream.rs (dispatch, redirect handling, response relay)
//!     → headers.rs (response-direction filter)
//!     → Stream to caller
//!
//! Failures at any stage before relay:
//!     → error.rs (fixed status + body per error class)
//! ```

pub mod error;
pub mod headers;
pub mod server;
pub mod upstream;

pub use error::ProxyError;
pub use server::HttpServer;
pub use upstream::UpstreamClient;
