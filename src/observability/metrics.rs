//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, model
//! - `gateway_request_duration_seconds` (histogram): latency by method, model
//!
//! # Design Decisions
//! - Low-overhead updates (atomic operations via the metrics crate)
//! - "none" model label for requests rejected before route resolution
//! - Prometheus exposition is optional and runs on its own address

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed (or rejected) request.
pub fn record_request(method: &str, status: u16, model: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("model", model.to_string()),
    ];
    metrics::counter!("gateway_requests_total", &labels).increment(1);

    let duration_labels = [
        ("method", method.to_string()),
        ("model", model.to_string()),
    ];
    metrics::histogram!("gateway_request_duration_seconds", &duration_labels)
        .record(start.elapsed().as_secs_f64());
}
