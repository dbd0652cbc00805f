//! Chart and landing page handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chart_core::{ChartKind, ColorResolver};
use chart_renderer::RenderError;
use thiserror::Error;
use tokio::task::JoinError;

use crate::metrics;
use crate::validation::{self, ChartQuery, Limits, ValidationError};
use crate::AppState;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Why a chart request produced no image.
#[derive(Debug, Error)]
pub enum ChartFailure {
    /// The query was rejected; the message goes back to the client.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The canvas could not be encoded.
    #[error("Could not load image")]
    Render(#[from] RenderError),
    /// The blocking render task panicked or was cancelled.
    #[error("Could not load image")]
    Worker(#[from] JoinError),
}

impl IntoResponse for ChartFailure {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// `GET /bar`
pub async fn bar_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ChartFailure> {
    chart(ChartKind::Bar, &state, &query).await
}

/// `GET /pie`
pub async fn pie_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ChartFailure> {
    chart(ChartKind::Pie, &state, &query).await
}

/// `GET /line`
pub async fn line_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ChartFailure> {
    chart(ChartKind::Line, &state, &query).await
}

/// Validate, render on a blocking worker and answer with a PNG.
///
/// Each request gets its own entropy-seeded [`ColorResolver`].
///
/// # Errors
///
/// Returns [`ChartFailure::Invalid`] for a rejected query and
/// [`ChartFailure::Render`] or [`ChartFailure::Worker`] when no image could
/// be produced.
#[tracing::instrument(name = "render_chart", skip_all, fields(kind = %kind))]
pub async fn chart(
    kind: ChartKind,
    state: &AppState,
    query: &ChartQuery,
) -> Result<Response, ChartFailure> {
    let request = validation::build_request(kind, query, &state.config.limits).inspect_err(|e| {
        metrics::record_validation_failure(kind.as_str(), e.field());
        tracing::debug!(error = %e, "Rejected chart request");
    })?;

    let renderer = Arc::clone(&state.renderer);
    let started = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut colors = ColorResolver::from_entropy();
        renderer.render_png(&request, &mut colors)
    })
    .await;

    let result = match outcome {
        Ok(encoded) => encoded.map_err(ChartFailure::from),
        Err(e) => Err(ChartFailure::from(e)),
    };
    metrics::record_render(kind.as_str(), result.is_ok(), started.elapsed().as_secs_f64());

    let png = result.inspect_err(|e| tracing::error!(error = ?e, "Chart rendering failed"))?;
    tracing::debug!(bytes = png.len(), "Chart rendered");
    Ok(png_response(png))
}

/// `200 OK` with PNG content type and explicit length.
fn png_response(png: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_LENGTH, HeaderValue::from(png.len())),
        ],
        png,
    )
        .into_response()
}

/// `GET /` landing page describing the endpoints.
#[tracing::instrument(name = "index", skip(state, headers))]
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    Html(render_index(host, &state.config.limits))
}

/// Fill the landing page template.
#[must_use]
pub fn render_index(host: &str, limits: &Limits) -> String {
    INDEX_TEMPLATE
        .replace("{{host}}", &escape_html(host))
        .replace("{{default_size}}", &limits.default_size.to_string())
        .replace("{{max_size}}", &limits.max_size.to_string())
        .replace("{{max_values}}", &limits.max_values.to_string())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
