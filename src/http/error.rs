//! Request-path error taxonomy.
//!
//! # Responsibilities
//! - Classify every failure the proxy pipeline can surface to a caller
//! - Map each class to its fixed status code and body format
//!
//! # Design Decisions
//! - All errors are handled at the single handler boundary; no wrapping,
//!   no retries
//! - Routing errors use the fixed plain-text bodies callers match on;
//!   transport and internal errors are structured JSON
//! - A failure after the response has been handed to the server cannot be
//!   represented here: the stream simply ends early (truncation)

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failure classes for a proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Path does not match `/v1/{model}/{rest...}`.
    #[error("Invalid URL format. Expected: /v1/{{model}}")]
    InvalidPath,

    /// Well-shaped path, but the model is not in the registry.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// The backend could not be reached, timed out, or failed before
    /// any response headers arrived.
    #[error("{message}")]
    Upstream {
        message: String,
        code: &'static str,
    },

    /// Inbound body exceeded the configured ceiling.
    #[error("Request body too large")]
    BodyTooLarge,

    /// Fault in the gateway itself prior to dispatch.
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    /// Status code this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidPath => StatusCode::BAD_REQUEST,
            ProxyError::UnsupportedModel(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProxyError::InvalidPath | ProxyError::UnsupportedModel(_) | ProxyError::BodyTooLarge => {
                (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    self.to_string(),
                )
                    .into_response()
            }
            ProxyError::Upstream { message, code } => (
                status,
                Json(json!({
                    "error": "Backend Connection Error",
                    "message": message,
                    "code": code,
                })),
            )
                .into_response(),
            ProxyError::Internal(message) => (
                status,
                Json(json!({
                    "error": "Internal Server Error",
                    "message": message,
                })),
            )
                .into_response(),
        }
    }
}
