//! Ordered chart values and color palettes.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Ordered sequence of chart values.
///
/// Order is significant: it fixes the bar index, slice order and line
/// x-position of every value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series(Vec<i64>);

impl Series {
    /// Wrap a vector of values.
    #[must_use]
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    /// The values in order.
    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Saturating sum of all values.
    #[must_use]
    pub fn sum(&self) -> i64 {
        self.0.iter().fold(0i64, |acc, v| acc.saturating_add(*v))
    }

    /// Whether any value is below zero.
    #[must_use]
    pub fn has_negative(&self) -> bool {
        self.0.iter().any(|v| *v < 0)
    }

    /// `(min, max)` of the values; see [`extremes`].
    #[must_use]
    pub fn extremes(&self) -> (i64, i64) {
        extremes(&self.0)
    }
}

impl From<Vec<i64>> for Series {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

/// Ordered colors, reused cyclically when shorter than the series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Wrap a vector of colors.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// The colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The color at `index mod len`, or `None` for an empty palette.
    #[must_use]
    pub fn get_cyclic(&self, index: usize) -> Option<Color> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0[index % self.0.len()])
        }
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self::new(colors)
    }
}

/// Smallest and largest value of `values`, or `(0, 0)` when empty.
#[must_use]
pub fn extremes(values: &[i64]) -> (i64, i64) {
    let Some(first) = values.first() else {
        return (0, 0);
    };
    values
        .iter()
        .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
}
