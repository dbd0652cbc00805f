//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur after rasterization.
///
/// Painting itself is infallible; only handing the finished canvas to an
/// encoder can fail.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The canvas has no pixels to encode.
    #[error("Canvas is empty (size {0})")]
    EmptyCanvas(u32),

    /// Image encoding failed.
    #[error("Image encoding failed: {0}")]
    Encode(String),
}
