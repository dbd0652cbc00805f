//! Error types for chart data handling.

use thiserror::Error;

/// Result type for chart data operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors that can occur while building chart data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    /// Color string is not exactly six hexadecimal digits.
    #[error("Color {0} is not a valid html color")]
    InvalidHexColor(String),

    /// Chart kind name is not one of bar, pie or line.
    #[error("Unknown chart type: {0}")]
    UnknownChartKind(String),
}
