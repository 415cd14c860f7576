//! Path-routed reverse proxy for LLM API backends.
//!
//! Maps `/v1/{model}/{rest...}` to a fixed backend origin per model and
//! streams the backend response back byte-for-byte.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
