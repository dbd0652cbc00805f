//! # Chart Server Library
//!
//! HTTP host for the chart rasterizer: query validation, routing, health
//! probes and metrics. This library is used by both the binary and
//! integration tests.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use chart_renderer::Renderer;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod access_log;
pub mod config;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use config::{CliArgs, ServerConfig};
pub use validation::{ChartQuery, Limits, ValidationError};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Chart renderer, shared with blocking render tasks.
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Build the state for `config`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let renderer = Renderer::new(config.renderer.clone());
        Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
        }
    }
}

/// Build the application router.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut app = Router::new()
        .route("/", get(routes::index))
        .route("/bar", get(routes::bar_chart))
        .route("/pie", get(routes::pie_chart))
        .route("/line", get(routes::line_chart))
        // Health check endpoints (Kubernetes probes)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness))
        .with_state(state);

    if let Some(handle) = metrics_handle {
        let metrics_router = Router::new()
            .route("/metrics", get(metrics::metrics_handler))
            .with_state(handle);
        app = app.merge(metrics_router);
    }

    app.layer(middleware::from_fn(access_log::access_log))
        // Request ID for tracing correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // Structured request tracing with timing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
