//! Prometheus metrics for chart-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.

use axum::extract::State;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const HTTP_REQUESTS_TOTAL: &str = "chart_http_requests_total";
const HTTP_REQUEST_DURATION: &str = "chart_http_request_duration_seconds";
const RENDERS_TOTAL: &str = "chart_renders_total";
const RENDER_DURATION: &str = "chart_render_duration_seconds";
const VALIDATION_FAILURES_TOTAL: &str = "chart_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record an HTTP request.
///
/// # Arguments
///
/// * `method` - HTTP method (GET, POST, etc.)
/// * `path` - Request path
/// * `status` - HTTP status code
/// * `duration_secs` - Request duration in seconds
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// Record a finished render.
///
/// # Arguments
///
/// * `kind` - Chart kind ("bar", "pie", "line")
/// * `success` - Whether a PNG was produced
/// * `duration_secs` - Time spent rasterizing and encoding
pub fn record_render(kind: &str, success: bool, duration_secs: f64) {
    counter!(
        RENDERS_TOTAL,
        "kind" => kind.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
    histogram!(RENDER_DURATION, "kind" => kind.to_string()).record(duration_secs);
}

/// Record a rejected chart request.
///
/// # Arguments
///
/// * `kind` - Chart kind of the rejected request
/// * `field` - Parameter that failed (size, values, colors)
pub fn record_validation_failure(kind: &str, field: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "kind" => kind.to_string(),
        "field" => field.to_string()
    )
    .increment(1);
}

/// Prometheus metrics endpoint.
#[tracing::instrument(name = "metrics", skip(handle))]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
