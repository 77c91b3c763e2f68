//! Metrics collection and exposition.
//!
//! # Metrics
//! - `probe_requests_total` (counter): requests by endpoint, method, status
//! - `probe_request_duration_seconds` (histogram): handler latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own scrape listener.
///
/// Exporter failure is logged but not fatal: the probe endpoints are the
/// point of this server, metrics are a bonus.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(endpoint: &'static str, method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();

    metrics::counter!(
        "probe_requests_total",
        "endpoint" => endpoint,
        "method" => method.clone(),
        "status" => status.clone()
    )
    .increment(1);

    metrics::histogram!(
        "probe_request_duration_seconds",
        "endpoint" => endpoint,
        "method" => method,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}
