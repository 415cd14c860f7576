//! Upstream dispatch and response relay.
//!
//! # Responsibilities
//! - Issue the outbound request with filtered headers and opaque body
//! - Follow backend redirects transparently
//! - Relay status, filtered headers, then the body stream, in that order
//! - Map transport failures to a structured 502 before anything is sent
//!
//! # Design Decisions
//! - One shared client: connection pooling across requests to the same
//!   origin is an optimization the pool gives us for free
//! - The response body is never buffered; backend payloads may be
//!   unbounded (streaming token output)
//! - A stream error after relay has begun cannot be converted into an
//!   error response; the body simply ends early and the failure is logged
//! - Request bodies are opaque bytes: no parsing, re-encoding, or
//!   content-type sniffing

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use axum::response::Response;
use futures_util::TryStreamExt;

use crate::config::UpstreamConfig;
use crate::http::error::ProxyError;
use crate::http::headers::filter_response_headers;

/// HTTP client for the backend leg of the proxy.
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build the shared upstream client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .build()
            .map_err(|e| ProxyError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Execute a backend request and relay the response.
    ///
    /// The returned response carries the backend's status, its filtered
    /// headers, and a body that streams from the backend connection as
    /// bytes arrive. Errors are only returned while nothing has been
    /// relayed yet.
    pub async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<Response, ProxyError> {
        let mut request = self.http.request(method, &url).headers(headers);

        if let Some(bytes) = body {
            request = request.body(bytes);
        }

        let backend_response = request.send().await.map_err(|e| classify(&e, &url))?;

        let status = backend_response.status();
        let response_headers = filter_response_headers(backend_response.headers());

        tracing::debug!(
            url = %url,
            status = %status,
            "Backend response headers received"
        );

        let stream = backend_response.bytes_stream().inspect_err(move |e| {
            // Headers are already committed; the caller sees a truncated
            // body, not a synthetic error.
            tracing::warn!(url = %url, error = %e, "Backend stream ended with error");
        });

        let mut response = Response::builder()
            .status(status)
            .body(Body::from_stream(stream))
            .map_err(|e| ProxyError::Internal(format!("failed to build response: {}", e)))?;
        *response.headers_mut() = response_headers;

        Ok(response)
    }
}

/// Map a reqwest transport failure to the caller-visible error.
fn classify(error: &reqwest::Error, url: &str) -> ProxyError {
    let code = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_request() {
        "request"
    } else {
        "unknown"
    };

    tracing::error!(
        url = %url,
        code = code,
        error = %error,
        "Backend request failed"
    );

    // Chase the source chain for the underlying cause; reqwest's own
    // Display wraps it in "error sending request for url (...)" noise.
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        message = inner.to_string();
        source = inner.source();
    }

    ProxyError::Upstream { message, code }
}

/// Methods that never carry a body through the proxy.
pub fn is_bodyless(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

/// The body to attach to the backend request, if any.
///
/// GET and HEAD never carry one, and an empty inbound body is omitted
/// rather than sent as zero bytes.
pub fn outbound_body(method: &Method, bytes: Bytes) -> Option<Bytes> {
    if is_bodyless(method) || bytes.is_empty() {
        None
    } else {
        Some(bytes)
    }
}
