//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hookpress_requests_total` (counter): rendered pages by status
//! - `hookpress_request_duration_seconds` (histogram): render latency
//! - `hookpress_asset_probes_total` (counter): asset probes by kind and outcome
//! - `hookpress_markdown_renders_total` (counter): Markdown conversions
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed, so library code and tests never need setup

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished page request.
pub fn record_request(status: u16, start: Instant) {
    counter!("hookpress_requests_total", "status" => status.to_string()).increment(1);
    histogram!("hookpress_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an asset content-type probe.
pub fn record_asset_probe(kind: &'static str, outcome: &'static str) {
    counter!("hookpress_asset_probes_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_markdown_render() {
    counter!("hookpress_markdown_renders_total").increment(1);
}
