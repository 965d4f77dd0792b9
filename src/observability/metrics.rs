//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_requests_total` (counter): requests by method, status, outcome
//! - `mock_request_duration_seconds` (histogram): time to respond, delays included
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "mock_requests_total",
        "method" => method_label(method),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    ::metrics::histogram!("mock_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Clients may send any method token; only the standard ones become labels.
fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "PATCH" => "PATCH",
        "OPTIONS" => "OPTIONS",
        _ => "other",
    }
}
