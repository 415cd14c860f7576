//! Route resolution: request path → model + sub-path + origin.
//!
//! # Responsibilities
//! - Parse paths of the shape `/v1/{model}/{rest...}`
//! - Lowercase the model segment before registry lookup
//! - Reject malformed paths and unknown models before any backend contact
//!
//! # Design Decisions
//! - The slash after the model segment is required; `/v1/claude` without
//!   it is a shape violation, matching the original route contract
//! - Sub-path may be empty (`/v1/claude/` resolves with rest = "")
//! - Shape violations and unknown models are distinct errors so callers
//!   get an actionable message without leaking backend topology

use crate::http::error::ProxyError;
use crate::routing::registry::BackendRegistry;

/// A resolved route: which backend a request targets and with what sub-path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoute {
    /// Model identifier, lowercased.
    pub model: String,
    /// Remainder of the path after the model segment, no leading slash.
    /// May be empty.
    pub sub_path: String,
    /// Backend origin for this model (scheme + host, no trailing slash).
    pub origin: String,
}

/// Resolve a request path against the registry.
///
/// Paths that do not match `/v1/{model}/{rest...}` yield
/// [`ProxyError::InvalidPath`]; a well-shaped path with an unregistered
/// model yields [`ProxyError::UnsupportedModel`].
pub fn resolve(path: &str, registry: &BackendRegistry) -> Result<ModelRoute, ProxyError> {
    let after_prefix = path.strip_prefix("/v1/").ok_or(ProxyError::InvalidPath)?;

    let (model_segment, sub_path) = after_prefix
        .split_once('/')
        .ok_or(ProxyError::InvalidPath)?;

    if model_segment.is_empty() {
        return Err(ProxyError::InvalidPath);
    }

    let model = model_segment.to_lowercase();

    let origin = registry
        .resolve(&model)
        .ok_or_else(|| ProxyError::UnsupportedModel(model.clone()))?;

    Ok(ModelRoute {
        model,
        sub_path: sub_path.to_string(),
        origin: origin.to_string(),
    })
}
