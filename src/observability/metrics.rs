//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, readiness)
//! - Own the process-wide Prometheus recorder rendered by the admin listener
//!
//! # Metrics
//! - `random_requests_total` (counter): requests by status code
//! - `random_request_duration_seconds` (histogram): handler latency
//! - `random_healthcheck_status` (gauge): 1=passing, 0=failing, by check
//!
//! # Design Decisions
//! - One recorder per process; later callers share the same handle
//! - Pull-based exposition only

use std::sync::OnceLock;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder (first call) and return its handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                tracing::info!("Prometheus recorder installed");
                handle
            }
            Err(e) => {
                // Another recorder owns the global slot; render an empty one.
                tracing::warn!(error = %e, "Prometheus recorder not installed");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Record a completed randomness request.
pub fn record_request(status: u16, start_time: Instant) {
    let status = status.to_string();
    counter!("random_requests_total", "status" => status.clone()).increment(1);
    histogram!("random_request_duration_seconds", "status" => status)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record the outcome of a named health check.
pub fn record_check(check: &'static str, passing: bool) {
    gauge!("random_healthcheck_status", "check" => check).set(if passing { 1.0 } else { 0.0 });
}
