//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (/v1/{model}/{rest...})
//!     → resolver.rs (parse model + sub-path)
//!     → registry.rs (model → origin lookup)
//!     → url.rs (origin + sub-path + query → target URL)
//!     → Return: ModelRoute or explicit error
//! ```
//!
//! # Design Decisions
//! - Registry built at startup, immutable at runtime
//! - Model matching is case-insensitive (identifier lowercased once)
//! - Deterministic: same path always resolves to the same backend
//! - Unknown model and malformed path are distinct, caller-visible errors

pub mod registry;
pub mod resolver;
pub mod url;

pub use registry::BackendRegistry;
pub use resolver::{resolve, ModelRoute};
pub use url::build_target_url;
