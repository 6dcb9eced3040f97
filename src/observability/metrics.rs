//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay invocations by outcome
//! - `relay_request_duration_seconds` (histogram): latency by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a relay invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upstream transfer completed (any upstream status).
    Relayed,
    /// Rejected before any network I/O.
    MissingUrl,
    /// Transport-level failure.
    UpstreamFailed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Relayed => "relayed",
            Outcome::MissingUrl => "missing_url",
            Outcome::UpstreamFailed => "upstream_failed",
        }
    }
}

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished relay invocation.
pub fn record_relay(outcome: Outcome, start_time: Instant) {
    let outcome = outcome.as_str();
    metrics::counter!("relay_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("relay_request_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
