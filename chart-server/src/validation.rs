//! Input validation for chart query strings.
//!
//! All user-supplied input MUST be validated before it reaches the renderer.
//! Every chart endpoint accepts a short and a long name for each parameter
//! (`s`/`size`, `v`/`values`, `c`/`colors`); the short name wins when both
//! are present.

use chart_core::{ChartKind, ChartRequest, Color, Palette};
use serde::Deserialize;
use thiserror::Error;

/// Canvas size used when none (or an unusable one) is given.
pub const DEFAULT_SIZE: u32 = 512;
/// Largest accepted canvas size in pixels.
pub const MAX_SIZE: u32 = 1024;
/// Largest accepted number of values.
pub const MAX_VALUES: usize = 100;

/// Validation error types.
///
/// The messages are returned verbatim to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Requested size exceeds the configured maximum.
    #[error("Maximum allowed size is {max}")]
    SizeTooLarge {
        /// Configured maximum.
        max: u32,
    },
    /// A value token is not an integer.
    #[error("Could not convert {0} to integer")]
    NotAnInteger(String),
    /// A negative value was given to a chart that cannot draw one.
    #[error("Only positive integers allowed")]
    NegativeValue,
    /// No values at all.
    #[error("No values provided")]
    NoValues,
    /// More values than the configured maximum.
    #[error("Maximum {max} values allowed")]
    TooManyValues {
        /// Configured maximum.
        max: usize,
    },
    /// A palette entry is not six lowercase hex digits.
    #[error("Color {color} at position {position} is not a valid html color")]
    InvalidColorAt {
        /// Offending token.
        color: String,
        /// Zero-based position in the list.
        position: usize,
    },
    /// The line color is not six lowercase hex digits.
    #[error("Color {0} is not a valid html color")]
    InvalidColor(String),
}

impl ValidationError {
    /// Which parameter failed, for metrics labels.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::SizeTooLarge { .. } => "size",
            Self::NotAnInteger(_)
            | Self::NegativeValue
            | Self::NoValues
            | Self::TooManyValues { .. } => "values",
            Self::InvalidColorAt { .. } | Self::InvalidColor(_) => "colors",
        }
    }
}

/// Request limits applied during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Size used when the request names none.
    pub default_size: u32,
    /// Largest accepted size.
    pub max_size: u32,
    /// Largest accepted number of values.
    pub max_values: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_SIZE,
            max_size: MAX_SIZE,
            max_values: MAX_VALUES,
        }
    }
}

/// Raw query parameters of a chart request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    /// Size, short form.
    pub s: Option<String>,
    /// Size, long form.
    pub size: Option<String>,
    /// Comma-separated values, short form.
    pub v: Option<String>,
    /// Comma-separated values, long form.
    pub values: Option<String>,
    /// Colors (bar, pie) or the single line color, short form.
    pub c: Option<String>,
    /// Comma-separated palette, long form.
    pub colors: Option<String>,
    /// Line color, long form.
    pub color: Option<String>,
    /// `"true"` punches a hole into pie charts.
    pub donut: Option<String>,
}

fn pick<'a>(short: Option<&'a str>, long: Option<&'a str>) -> Option<&'a str> {
    short.filter(|s| !s.is_empty()).or(long)
}

impl ChartQuery {
    /// The size parameter.
    #[must_use]
    pub fn size_param(&self) -> Option<&str> {
        pick(self.s.as_deref(), self.size.as_deref())
    }

    /// The values parameter.
    #[must_use]
    pub fn values_param(&self) -> Option<&str> {
        pick(self.v.as_deref(), self.values.as_deref())
    }

    /// The palette parameter of bar and pie charts.
    #[must_use]
    pub fn colors_param(&self) -> Option<&str> {
        pick(self.c.as_deref(), self.colors.as_deref())
    }

    /// The single color parameter of line charts.
    #[must_use]
    pub fn color_param(&self) -> Option<&str> {
        pick(self.c.as_deref(), self.color.as_deref())
    }
}

/// Parse the requested canvas size.
///
/// Missing, non-numeric and non-positive sizes fall back to the default.
///
/// # Errors
///
/// Returns [`ValidationError::SizeTooLarge`] above the configured maximum.
pub fn parse_size(raw: Option<&str>, limits: &Limits) -> Result<u32, ValidationError> {
    let Some(size) = raw
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|size| *size > 0)
    else {
        return Ok(limits.default_size);
    };

    if size > i64::from(limits.max_size) {
        return Err(ValidationError::SizeTooLarge {
            max: limits.max_size,
        });
    }
    u32::try_from(size).map_err(|_| ValidationError::SizeTooLarge {
        max: limits.max_size,
    })
}

/// Parse a comma-separated list of integers.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnInteger`] for the first bad token,
/// [`ValidationError::NegativeValue`] for a negative value when
/// `allow_negative` is false, [`ValidationError::NoValues`] for an empty
/// list and [`ValidationError::TooManyValues`] above the configured maximum.
pub fn parse_values(
    raw: Option<&str>,
    allow_negative: bool,
    limits: &Limits,
) -> Result<Vec<i64>, ValidationError> {
    let mut values = Vec::new();
    if let Some(raw) = raw.filter(|s| !s.is_empty()) {
        for token in raw.split(',') {
            let value: i64 = token
                .parse()
                .map_err(|_| ValidationError::NotAnInteger(token.to_string()))?;
            if value < 0 && !allow_negative {
                return Err(ValidationError::NegativeValue);
            }
            values.push(value);
        }
    }

    if values.is_empty() {
        return Err(ValidationError::NoValues);
    }
    if values.len() > limits.max_values {
        return Err(ValidationError::TooManyValues {
            max: limits.max_values,
        });
    }
    Ok(values)
}

/// Check for exactly six lowercase hex digits.
#[must_use]
pub fn is_html_color(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn html_color(s: &str) -> Option<Color> {
    if is_html_color(s) {
        Color::parse_hex(s).ok()
    } else {
        None
    }
}

/// Parse a comma-separated palette.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidColorAt`] for the first malformed entry.
pub fn parse_colors(raw: Option<&str>) -> Result<Palette, ValidationError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(Palette::default());
    };

    raw.split(',')
        .enumerate()
        .map(|(position, token)| {
            html_color(token).ok_or_else(|| ValidationError::InvalidColorAt {
                color: token.to_string(),
                position,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Palette::new)
}

/// Parse the optional single line color.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidColor`] if a color is given but malformed.
pub fn parse_line_color(raw: Option<&str>) -> Result<Option<Color>, ValidationError> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(token) => html_color(token)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidColor(token.to_string())),
    }
}

/// Only the literal `true` enables donut mode.
#[must_use]
pub fn parse_donut(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// Validate a query for `kind` and assemble the render request.
///
/// Parameters are checked in the order size, values, colors; the first
/// failure is reported.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn build_request(
    kind: ChartKind,
    query: &ChartQuery,
    limits: &Limits,
) -> Result<ChartRequest, ValidationError> {
    let size = parse_size(query.size_param(), limits)?;
    let values = parse_values(query.values_param(), kind.allows_negative(), limits)?;

    let request = ChartRequest::new(kind, size, values);
    let request = match kind {
        ChartKind::Bar => request.with_colors(parse_colors(query.colors_param())?),
        ChartKind::Pie => request
            .with_colors(parse_colors(query.colors_param())?)
            .with_donut(parse_donut(query.donut.as_deref())),
        ChartKind::Line => {
            let color = parse_line_color(query.color_param())?;
            request.with_colors(color.into_iter().collect::<Vec<_>>())
        }
    };
    Ok(request)
}
