//! Chart requests as assembled by a host from untrusted input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ChartError, Palette, Series};

/// Chart types the rasterizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bars anchored at a zero baseline.
    Bar,
    /// Angular sectors, optionally with a donut hole.
    Pie,
    /// Anti-aliased polyline.
    Line,
}

impl ChartKind {
    /// Lowercase name, as used in URL paths and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Line => "line",
        }
    }

    /// Whether negative values are meaningful for this chart type.
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        !matches!(self, Self::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "pie" => Ok(Self::Pie),
            "line" => Ok(Self::Line),
            _ => Err(ChartError::UnknownChartKind(s.to_string())),
        }
    }
}

/// A fully validated request to render one chart.
///
/// Hosts guarantee `size` in `1..=1024`, `1..=100` values and no negative
/// values for pie charts before building one of these. The rasterizer does
/// not re-check those limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Chart type.
    pub kind: ChartKind,
    /// Edge length of the square canvas in pixels.
    pub size: u32,
    /// Values in display order.
    pub values: Series,
    /// Colors, reused cyclically; empty means random.
    pub colors: Palette,
    /// Punch a hole in the middle of a pie chart.
    pub donut: bool,
}

impl ChartRequest {
    /// Create a request with an empty palette and no donut hole.
    #[must_use]
    pub fn new(kind: ChartKind, size: u32, values: impl Into<Series>) -> Self {
        Self {
            kind,
            size,
            values: values.into(),
            colors: Palette::default(),
            donut: false,
        }
    }

    /// Set the palette.
    #[must_use]
    pub fn with_colors(mut self, colors: impl Into<Palette>) -> Self {
        self.colors = colors.into();
        self
    }

    /// Enable or disable the donut hole.
    #[must_use]
    pub fn with_donut(mut self, donut: bool) -> Self {
        self.donut = donut;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("bar".parse::<ChartKind>(), Ok(ChartKind::Bar));
        assert_eq!("PIE".parse::<ChartKind>(), Ok(ChartKind::Pie));
        assert_eq!("Line".parse::<ChartKind>(), Ok(ChartKind::Line));
        assert_eq!(
            "scatter".parse::<ChartKind>(),
            Err(ChartError::UnknownChartKind("scatter".to_string()))
        );
    }

    #[test]
    fn test_chart_kind_negative_policy() {
        assert!(ChartKind::Bar.allows_negative());
        assert!(ChartKind::Line.allows_negative());
        assert!(!ChartKind::Pie.allows_negative());
    }

    #[test]
    fn test_chart_kind_names_round_trip() {
        for kind in [ChartKind::Bar, ChartKind::Pie, ChartKind::Line] {
            assert_eq!(kind.to_string().parse::<ChartKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_request_builder() {
        let request = ChartRequest::new(ChartKind::Pie, 200, vec![1, 2, 4])
            .with_colors(vec![Color::rgb(1, 2, 3)])
            .with_donut(true);

        assert_eq!(request.size, 200);
        assert_eq!(request.values.values(), &[1, 2, 4]);
        assert_eq!(request.colors.len(), 1);
        assert!(request.donut);
    }

    #[test]
    fn test_request_serialization() {
        let request = ChartRequest::new(ChartKind::Line, 64, vec![3, 1]);
        let json = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(json["kind"], "line");
        assert_eq!(json["size"], 64);
        assert_eq!(json["donut"], false);
    }
}
