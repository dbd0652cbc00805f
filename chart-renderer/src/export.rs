//! PNG export of finished canvases.
//!
//! Rasterization never fails; encoding is the only fallible step, so it lives
//! here behind [`RenderResult`].

use chart_core::{ChartRequest, ColorResolver};
use image::ImageEncoder;

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};
use crate::{Renderer, RendererConfig};

/// PNG file signature.
pub const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a canvas as an RGBA8 PNG.
///
/// # Errors
///
/// Returns [`RenderError::EmptyCanvas`] for a zero-size canvas and
/// [`RenderError::Encode`] if the encoder rejects the buffer.
pub fn encode_png(canvas: &Canvas) -> RenderResult<Vec<u8>> {
    let size = canvas.size();
    if size == 0 {
        return Err(RenderError::EmptyCanvas(size));
    }

    let bytes = canvas.to_rgba_bytes();
    let mut buf = std::io::Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(&bytes, size, size, image::ColorType::Rgba8.into())
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

/// Render `request` and encode the result as PNG.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn render_png(
    request: &ChartRequest,
    config: &RendererConfig,
    colors: &mut ColorResolver,
) -> RenderResult<Vec<u8>> {
    let canvas = Renderer::new(config.clone()).render(request, colors);
    let png = encode_png(&canvas)?;
    tracing::trace!(kind = %request.kind, bytes = png.len(), "chart encoded");
    Ok(png)
}
