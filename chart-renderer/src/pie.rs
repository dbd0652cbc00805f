//! Pie and donut chart rasterization.

use std::f64::consts::TAU;

use chart_core::{ColorResolver, Palette, Series};

use crate::canvas::Canvas;
use crate::geometry::{normalized_angle, sector_bounding_box, DONUT_HOLE_RATIO};

/// Pie chart settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieOptions {
    /// Leave the centre of the disk unpainted.
    pub donut: bool,
    /// Hole radius as a fraction of the outer radius.
    pub hole_ratio: f64,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            donut: false,
            hole_ratio: DONUT_HOLE_RATIO,
        }
    }
}

impl PieOptions {
    /// Default settings with the donut hole switched on or off.
    #[must_use]
    pub fn donut(donut: bool) -> Self {
        Self {
            donut,
            ..Self::default()
        }
    }
}

/// Half-open angular ranges `[start, end)` for each value, counter-clockwise
/// from 3 o'clock.
///
/// Boundaries come from prefix sums, so the last non-empty slice ends at
/// exactly `2π`. A zero (or negative) total yields zero-width slices.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sector_angles(values: &[i64]) -> Vec<(f64, f64)> {
    let total: i128 = values.iter().map(|v| i128::from(*v)).sum();
    if total <= 0 {
        return vec![(0.0, 0.0); values.len()];
    }

    let mut prefix: i128 = 0;
    values
        .iter()
        .map(|v| {
            let start = TAU * (prefix as f64 / total as f64);
            prefix += i128::from(*v);
            let end = TAU * (prefix as f64 / total as f64);
            (start, end)
        })
        .collect()
}

/// Polar position of pixel offset `(x, y)` from the centre, or `None` when it
/// falls outside the painted ring.
fn ring_angle(x: f64, y: f64, radius: f64, inner_radius: Option<f64>) -> Option<f64> {
    let distance = x.hypot(y);
    if distance > radius {
        return None;
    }
    if let Some(inner) = inner_radius {
        if distance <= inner {
            return None;
        }
    }
    Some(normalized_angle(x, y))
}

/// Paint one sector per value onto a fresh canvas.
///
/// Slice `i` takes palette color `i mod len`, or its own random color when
/// the palette is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_pie(
    size: u32,
    series: &Series,
    palette: &Palette,
    options: &PieOptions,
    colors: &mut ColorResolver,
) -> Canvas {
    let mut canvas = Canvas::new(size);
    let radius = f64::from(size / 2);
    let inner_radius = options.donut.then(|| options.hole_ratio * radius);

    for (i, (start, end)) in sector_angles(series.values()).into_iter().enumerate() {
        let color = colors.palette_or_random(palette, i);
        if end <= start {
            continue;
        }

        let bounds = sector_bounding_box(start, end, radius, size);
        for m in bounds.left..=bounds.right {
            let x = m as f64 - radius;
            for n in bounds.top..=bounds.bottom {
                let y = radius - n as f64;
                match ring_angle(x, y, radius, inner_radius) {
                    Some(angle) if angle >= start && angle < end => canvas.set(m, n, color),
                    _ => {}
                }
            }
        }
    }

    tracing::trace!(size, slices = series.len(), "pie rendered");
    canvas
}
