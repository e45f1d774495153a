//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method and status
//! - `relay_request_duration_seconds` (histogram): time until response
//!   headers are ready, by method

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one relayed request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    let method = method.to_string();
    counter!("relay_requests_total", "method" => method.clone(), "status" => status.to_string())
        .increment(1);
    histogram!("relay_request_duration_seconds", "method" => method)
        .record(start_time.elapsed().as_secs_f64());
}
