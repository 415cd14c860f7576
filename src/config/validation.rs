//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check backend table integrity (lowercase ids, no duplicates)
//! - Validate origins are absolute http(s) URLs without path or query
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to (e.g., "backends[2].origin").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "listener.max_body_bytes".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.backends.is_empty() {
        errors.push(ValidationError {
            field: "backends".into(),
            message: "at least one backend mapping is required".into(),
        });
    }

    let mut seen = HashSet::new();
    for (i, backend) in config.backends.iter().enumerate() {
        if backend.model.is_empty() {
            errors.push(ValidationError {
                field: format!("backends[{}].model", i),
                message: "model identifier must not be empty".into(),
            });
        } else if backend.model != backend.model.to_lowercase() {
            errors.push(ValidationError {
                field: format!("backends[{}].model", i),
                message: format!("model identifier must be lowercase: {}", backend.model),
            });
        }

        if !seen.insert(backend.model.clone()) {
            errors.push(ValidationError {
                field: format!("backends[{}].model", i),
                message: format!("duplicate model identifier: {}", backend.model),
            });
        }

        validate_origin(&backend.origin, i, &mut errors);
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "upstream.connect_timeout_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "upstream.request_timeout_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_origin(origin: &str, index: usize, errors: &mut Vec<ValidationError>) {
    let field = format!("backends[{}].origin", index);

    let parsed = match Url::parse(origin) {
        Ok(url) => url,
        Err(e) => {
            errors.push(ValidationError {
                field,
                message: format!("not a valid URL: {}", e),
            });
            return;
        }
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        errors.push(ValidationError {
            field: field.clone(),
            message: format!("scheme must be http or https: {}", parsed.scheme()),
        });
    }

    if parsed.host_str().is_none() {
        errors.push(ValidationError {
            field: field.clone(),
            message: "origin must include a host".into(),
        });
    }

    // The loader strips a single trailing slash; anything deeper is a
    // misconfiguration (sub-paths belong to the request, not the origin).
    if parsed.path() != "/" && !parsed.path().is_empty() {
        errors.push(ValidationError {
            field: field.clone(),
            message: format!("origin must not contain a path: {}", parsed.path()),
        });
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        errors.push(ValidationError {
            field,
            message: "origin must not contain a query or fragment".into(),
        });
    }
}
