//! Header filtering for both proxy directions.
//!
//! # Responsibilities
//! - Decide, per header name, whether it may cross the proxy boundary
//! - Copy allowed headers preserving multi-value order
//!
//! # Design Decisions
//! - Allow-by-default, deny-by-exception: everything not in a deny-set is
//!   forwarded verbatim
//! - Deny-sets are data (const slices of lowercase names), not scattered
//!   conditionals, so they are independently testable and extendable
//! - Request deny-set strips hop-by-hop headers, message framing, and
//!   forwarding/CDN metadata that would leak topology or conflict with
//!   the new connection's framing
//! - Response deny-set strips hop-by-hop headers and content-encoding

use axum::http::HeaderMap;

/// Request headers that must never be forwarded to a backend.
const REQUEST_DENYLIST: &[&str] = &[
    // Framing; the upstream client sets these for the new connection.
    "host",
    "content-length",
    "transfer-encoding",
    // Hop-by-hop.
    "connection",
    "keep-alive",
    "upgrade",
    "http2-settings",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    // Forwarding and client-IP metadata injected by intermediaries.
    "forwarded",
    "x-forwarded-for",
    "x-forwarded-host",
    "x-forwarded-proto",
    "x-forwarded-port",
    "x-real-ip",
    // CDN metadata.
    "cf-connecting-ip",
    "cf-ray",
    "cf-visitor",
    "cf-ipcountry",
    "cdn-loop",
    "true-client-ip",
];

/// Response headers that must never be forwarded to the caller.
const RESPONSE_DENYLIST: &[&str] = &[
    "transfer-encoding",
    "connection",
    "keep-alive",
    "content-encoding",
];

/// True if a request header may be forwarded to the backend.
pub fn should_forward_request_header(name: &str) -> bool {
    !REQUEST_DENYLIST.contains(&name.to_lowercase().as_str())
}

/// True if a response header may be forwarded to the caller.
pub fn should_forward_response_header(name: &str) -> bool {
    !RESPONSE_DENYLIST.contains(&name.to_lowercase().as_str())
}

/// Copy the forwardable subset of inbound request headers.
pub fn filter_request_headers(headers: &HeaderMap) -> HeaderMap {
    filter(headers, should_forward_request_header)
}

/// Copy the forwardable subset of backend response headers.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    filter(headers, should_forward_response_header)
}

fn filter(headers: &HeaderMap, allow: fn(&str) -> bool) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    // iter() repeats the name for each value of a multi-value header, in
    // insertion order; append keeps that order on the other side.
    for (name, value) in headers.iter() {
        if allow(name.as_str()) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}
