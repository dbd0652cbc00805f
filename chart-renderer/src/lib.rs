//! # Chart Renderer
//!
//! Software rasterizer turning a [`ChartRequest`] into a square RGBA canvas.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────────────────┐    ┌────────────┐
//! │ ChartRequest │ ─> │ bar │ pie/donut │ line        │ ─> │ encode_png │
//! └──────────────┘    │      Canvas (size x size)     │    └────────────┘
//!                     └──────────────────────────────┘
//! ```
//!
//! Renderers share the [`Canvas`], the [`ColorResolver`] passed in by the
//! caller and the geometry helpers. They never call each other.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod canvas;
pub mod error;
pub mod export;
pub mod geometry;
pub mod line;
pub mod pie;

pub use canvas::Canvas;
pub use error::{RenderError, RenderResult};
pub use export::{encode_png, render_png};
pub use geometry::DONUT_HOLE_RATIO;
pub use line::{LineStrategy, LineStyle};
pub use pie::PieOptions;

use chart_core::{ChartKind, ChartRequest, ColorResolver};

/// Configuration for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Donut hole radius as a fraction of the outer radius.
    pub hole_ratio: f64,
    /// How line chart segments are drawn.
    pub line_style: LineStyle,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            hole_ratio: DONUT_HOLE_RATIO,
            line_style: LineStyle::default(),
        }
    }
}

/// Dispatches chart requests to the matching rasterizer.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Rasterize `request` onto a fresh canvas.
    ///
    /// Line charts are drawn in the first palette color, or in a single
    /// random color when no palette was given.
    #[must_use]
    pub fn render(&self, request: &ChartRequest, colors: &mut ColorResolver) -> Canvas {
        tracing::debug!(
            kind = %request.kind,
            size = request.size,
            values = request.values.len(),
            "rendering chart"
        );

        match request.kind {
            ChartKind::Bar => bar::render_bar(request.size, &request.values, &request.colors, colors),
            ChartKind::Pie => {
                let options = PieOptions {
                    donut: request.donut,
                    hole_ratio: self.config.hole_ratio,
                };
                pie::render_pie(request.size, &request.values, &request.colors, &options, colors)
            }
            ChartKind::Line => {
                let color = colors.palette_or_random(&request.colors, 0);
                line::render_line(
                    request.size,
                    &request.values,
                    color,
                    self.config.line_style.strategy(),
                )
            }
        }
    }

    /// Render and encode as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render_png(
        &self,
        request: &ChartRequest,
        colors: &mut ColorResolver,
    ) -> RenderResult<Vec<u8>> {
        export::render_png(request, &self.config, colors)
    }
}

/// Renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
