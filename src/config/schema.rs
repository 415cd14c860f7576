//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or empty) config is valid.

use serde::{Deserialize, Serialize};

/// Default backend table: model identifier → backend origin.
///
/// Origins carry scheme and host only, no trailing slash.
pub const DEFAULT_BACKENDS: &[(&str, &str)] = &[
    ("grok", "https://api.x.ai"),
    ("claude", "https://api.anthropic.com"),
    ("openai", "https://api.openai.com"),
    ("chatgpt", "https://chatgpt.com"),
    ("gemini", "https://generativelanguage.googleapis.com"),
];

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, inbound limits).
    pub listener: ListenerConfig,

    /// Backend definitions mapping model identifiers to origins.
    pub backends: Vec<BackendConfig>,

    /// Upstream client settings (timeouts, redirects, pooling).
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            backends: default_backends(),
            upstream: UpstreamConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_backends() -> Vec<BackendConfig> {
    DEFAULT_BACKENDS
        .iter()
        .map(|(model, origin)| BackendConfig {
            model: (*model).to_string(),
            origin: (*origin).to_string(),
        })
        .collect()
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum inbound request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 50 * 1024 * 1024,
        }
    }
}

/// A single model → origin mapping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Model identifier, lowercase (e.g., "claude").
    pub model: String,

    /// Backend origin: scheme + host, no trailing slash
    /// (e.g., "https://api.anthropic.com").
    pub origin: String,
}

/// Upstream HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total attempt ceiling in seconds. Generous by default to
    /// accommodate long-running streaming completions.
    pub request_timeout_secs: u64,

    /// Maximum redirects followed per request.
    pub max_redirects: usize,

    /// Idle pooled connection timeout in seconds.
    pub pool_idle_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
            max_redirects: 10,
            pool_idle_timeout_secs: 90,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
