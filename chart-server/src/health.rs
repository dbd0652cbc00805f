//! Health check endpoints for Kubernetes probes.
//!
//! Provides liveness and readiness probes for container orchestration:
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)
//! - `/health` - Combined check for backward compatibility

use axum::{http::StatusCode, Json};
use chart_renderer::{encode_png, Canvas};
use serde::Serialize;

/// Edge length of the canvas rendered by the readiness probe.
const PROBE_SIZE: u32 = 8;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Rasterizer and PNG encoder produce an image
    pub renderer: bool,
}

/// Liveness probe - is the server running?
///
/// Returns 200 OK if the process is alive.
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Paint and encode the diagnostic pattern.
fn renderer_ok() -> bool {
    match encode_png(&Canvas::diagnostic(PROBE_SIZE)) {
        Ok(png) => !png.is_empty(),
        Err(e) => {
            tracing::warn!("Readiness render failed: {}", e);
            false
        }
    }
}

/// Readiness probe - is the server ready to accept traffic?
///
/// Renders a tiny diagnostic canvas end to end.
#[tracing::instrument(name = "readiness_probe")]
pub async fn readiness() -> (StatusCode, Json<HealthStatus>) {
    let renderer = renderer_ok();

    let status = HealthStatus {
        status: if renderer { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { renderer },
    };

    let code = if renderer {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}
