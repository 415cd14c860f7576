//! Backend registry: model identifier → backend origin.
//!
//! # Responsibilities
//! - Store the model → origin table, frozen at startup
//! - Resolve a lowercase model identifier to its origin
//! - Return explicit None for unknown identifiers
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Lookup is case-sensitive over normalized-lowercase keys; callers
//!   lowercase the incoming identifier before resolving
//! - Open table: adding a model is a config change, not a code change

use std::collections::HashMap;

use crate::config::BackendConfig;

/// Immutable lookup table from model identifier to backend origin.
#[derive(Debug, Clone)]
pub struct BackendRegistry {
    origins: HashMap<String, String>,
}

impl BackendRegistry {
    /// Build a registry from backend configuration entries.
    pub fn from_config(backends: &[BackendConfig]) -> Self {
        let origins = backends
            .iter()
            .map(|b| (b.model.clone(), b.origin.clone()))
            .collect();
        Self { origins }
    }

    /// Resolve a model identifier to its backend origin.
    ///
    /// Returns `None` when the identifier is not configured.
    pub fn resolve(&self, model: &str) -> Option<&str> {
        self.origins.get(model).map(String::as_str)
    }

    /// Number of configured models.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// True if no models are configured.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::from_config(&crate::config::GatewayConfig::default().backends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_resolves_all_models() {
        let registry = BackendRegistry::default();
        assert_eq!(registry.resolve("grok"), Some("https://api.x.ai"));
        assert_eq!(registry.resolve("claude"), Some("https://api.anthropic.com"));
        assert_eq!(registry.resolve("openai"), Some("https://api.openai.com"));
        assert_eq!(registry.resolve("chatgpt"), Some("https://chatgpt.com"));
        assert_eq!(
            registry.resolve("gemini"),
            Some("https://generativelanguage.googleapis.com")
        );
    }

    #[test]
    fn test_unknown_model_is_absent() {
        let registry = BackendRegistry::default();
        assert_eq!(registry.resolve("llama"), None);
        assert_eq!(registry.resolve(""), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // Callers are responsible for lowercasing; mixed case misses.
        let registry = BackendRegistry::default();
        assert_eq!(registry.resolve("Claude"), None);
    }

    #[test]
    fn test_custom_table() {
        let registry = BackendRegistry::from_config(&[BackendConfig {
            model: "local".into(),
            origin: "http://127.0.0.1:8000".into(),
        }]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("local"), Some("http://127.0.0.1:8000"));
        assert_eq!(registry.resolve("claude"), None);
    }
}
