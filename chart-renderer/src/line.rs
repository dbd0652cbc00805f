//! Line chart rasterization with pluggable segment drawing.
//!
//! [`AntiAliased`] (Xiaolin Wu coverage blending) is the default.
//! [`Interpolated`] and [`NearestPixel`] are the simpler legacy strategies,
//! kept for comparison and for hosts that want hard edges.

use std::fmt;
use std::str::FromStr;

use chart_core::{Color, Series};

use crate::canvas::Canvas;

/// A point in canvas pixel space (x right, y down).
pub type Point = (f64, f64);

/// Draws one straight segment of a polyline.
pub trait LineStrategy: fmt::Debug + Send + Sync {
    /// Short name used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Draw the segment `from` -> `to` in `color`.
    fn draw_segment(&self, canvas: &mut Canvas, color: Color, from: Point, to: Point);
}

/// Which [`LineStrategy`] a renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Wu's anti-aliased line.
    #[default]
    AntiAliased,
    /// Linear interpolation with fractional alpha, written without blending.
    Interpolated,
    /// One opaque pixel per step on the dominant axis.
    NearestPixel,
}

impl LineStyle {
    /// The strategy implementing this style.
    #[must_use]
    pub fn strategy(self) -> &'static dyn LineStrategy {
        match self {
            Self::AntiAliased => &AntiAliased,
            Self::Interpolated => &Interpolated,
            Self::NearestPixel => &NearestPixel,
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anti-aliased" | "antialiased" | "aa" | "wu" => Ok(Self::AntiAliased),
            "interpolated" | "linear" => Ok(Self::Interpolated),
            "nearest" | "nearest-pixel" => Ok(Self::NearestPixel),
            _ => Err(format!("Unknown line style: {s}")),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}

/// Fractional part.
fn fpart(v: f64) -> f64 {
    v - v.floor()
}

/// One minus the fractional part.
fn rfpart(v: f64) -> f64 {
    1.0 - fpart(v)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_alpha(alpha: u8, coverage: f64) -> u8 {
    (f64::from(alpha) * coverage.clamp(0.0, 1.0)) as u8
}

/// Xiaolin Wu's line: two pixels per step on the dominant axis, weighted by
/// how much of each the ideal line covers. Endpoints are additionally scaled
/// by their horizontal overlap with the pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntiAliased;

impl LineStrategy for AntiAliased {
    fn name(&self) -> &'static str {
        "anti-aliased"
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::float_cmp,
        clippy::many_single_char_names
    )]
    fn draw_segment(&self, canvas: &mut Canvas, color: Color, from: Point, to: Point) {
        let (mut x0, mut y0) = from;
        let (mut x1, mut y1) = to;

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

        let mut plot = |x: i64, y: i64, coverage: f64| {
            let alpha = scaled_alpha(color.a, coverage);
            if alpha == 0 {
                return;
            }
            let shade = color.with_alpha(alpha);
            if steep {
                canvas.blend(y, x, shade);
            } else {
                canvas.blend(x, y, shade);
            }
        };

        // First endpoint
        let x_end = (x0 + 0.5).floor();
        let y_end = y0 + gradient * (x_end - x0);
        let x_gap = rfpart(x0 + 0.5);
        let x_first = x_end as i64;
        let y_first = y_end.floor() as i64;
        plot(x_first, y_first, rfpart(y_end) * x_gap);
        plot(x_first, y_first + 1, fpart(y_end) * x_gap);
        let mut inter_y = y_end + gradient;

        // Second endpoint
        let x_end = (x1 + 0.5).floor();
        let y_end = y1 + gradient * (x_end - x1);
        let x_gap = fpart(x1 + 0.5);
        let x_last = x_end as i64;
        let y_last = y_end.floor() as i64;
        if x_last != x_first {
            plot(x_last, y_last, rfpart(y_end) * x_gap);
            plot(x_last, y_last + 1, fpart(y_end) * x_gap);
        }

        for x in (x_first + 1)..x_last {
            let y = inter_y.floor() as i64;
            plot(x, y, rfpart(inter_y));
            plot(x, y + 1, fpart(inter_y));
            inter_y += gradient;
        }
    }
}

/// Linear interpolation along the dominant axis with fractional alpha,
/// overwriting pixels instead of compositing. Endpoints are truncated to
/// whole pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpolated;

impl LineStrategy for Interpolated {
    fn name(&self) -> &'static str {
        "interpolated"
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_segment(&self, canvas: &mut Canvas, color: Color, from: Point, to: Point) {
        let (mut x0, mut y0) = (from.0 as i64, from.1 as i64);
        let (mut x1, mut y1) = (to.0 as i64, to.1 as i64);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x1 < x0 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        for x in x0..x1 {
            let y = (x - x0) as f64 / (x1 - x0) as f64 * (y1 - y0) as f64 + y0 as f64;
            let below = y.floor();
            let frac = y - below;
            let y = below as i64;
            let near = color.with_alpha(scaled_alpha(color.a, 1.0 - frac));
            let far = color.with_alpha(scaled_alpha(color.a, frac));
            if steep {
                canvas.set(y, x, near);
                canvas.set(y + 1, x, far);
            } else {
                canvas.set(x, y, near);
                canvas.set(x, y + 1, far);
            }
        }
    }
}

/// One full-alpha pixel per step, rounded to the nearest row or column.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestPixel;

impl LineStrategy for NearestPixel {
    fn name(&self) -> &'static str {
        "nearest"
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_segment(&self, canvas: &mut Canvas, color: Color, from: Point, to: Point) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).round() as i64;
        if steps == 0 {
            canvas.set(x0.round() as i64, y0.round() as i64, color);
            return;
        }
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            canvas.set(x.round() as i64, y.round() as i64, color);
        }
    }
}

/// Pixel coordinates of each value's vertex.
///
/// Values are spread over equal-width bands with the vertex at each band's
/// centre; the value range maps onto the full height, larger values higher.
/// Rows are clamped to the canvas, and a flat series sits on the bottom row.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn line_points(values: &[i64], size: u32) -> Vec<Point> {
    if values.is_empty() {
        return Vec::new();
    }
    let (min, max) = chart_core::extremes(values);
    let span = max as f64 - min as f64;
    let height = f64::from(size);
    let thickness = height / values.len() as f64;
    let bottom = (height - 1.0).max(0.0);

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = thickness / 2.0 + i as f64 * thickness;
            let share = if span == 0.0 {
                0.0
            } else {
                (*value as f64 - min as f64) / span
            };
            let y = (height - share * height).clamp(0.0, bottom);
            (x, y)
        })
        .collect()
}

/// Connect consecutive values with `strategy` on a fresh canvas.
///
/// A single value has no segments and leaves the canvas empty.
#[must_use]
pub fn render_line(
    size: u32,
    series: &Series,
    color: Color,
    strategy: &dyn LineStrategy,
) -> Canvas {
    let mut canvas = Canvas::new(size);
    let points = line_points(series.values(), size);
    for pair in points.windows(2) {
        strategy.draw_segment(&mut canvas, color, pair[0], pair[1]);
    }
    tracing::trace!(size, points = points.len(), strategy = strategy.name(), "line rendered");
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = Color::rgba(20, 40, 200, 128);

    fn alpha(canvas: &Canvas, x: i64, y: i64) -> u32 {
        canvas.get(x, y).map_or(0, |p| u32::from(p.a))
    }

    #[test]
    fn test_line_points_v_shape() {
        let points = line_points(&[1, 2, 1], 500);
        assert_eq!(points.len(), 3);
        assert!((points[0].0 - 500.0 / 6.0).abs() < 1e-9);
        assert!((points[1].0 - 250.0).abs() < 1e-9);
        assert_eq!(points[1].1, 0.0);
        assert_eq!(points[0].1, 499.0);
        assert_eq!(points[2].1, 499.0);
    }

    #[test]
    fn test_line_points_flat_series() {
        let points = line_points(&[4, 4, 4], 100);
        assert!(points.iter().all(|(_, y)| *y == 99.0));
    }

    #[test]
    fn test_line_points_midpoint() {
        let points = line_points(&[0, 5, 10], 100);
        assert!((points[1].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_wu_shallow_coverage_is_complementary() {
        let mut canvas = Canvas::new(64);
        AntiAliased.draw_segment(&mut canvas, INK, (10.0, 10.5), (50.0, 30.25));

        for x in 11..50 {
            let column: u32 = (0..64).map(|y| alpha(&canvas, x, y)).sum();
            assert!(
                column == 127 || column == 128,
                "column {x} has total alpha {column}"
            );
        }
        // Nothing outside the segment's span of columns
        assert_eq!((0..64).map(|y| alpha(&canvas, 5, y)).sum::<u32>(), 0);
        assert_eq!((0..64).map(|y| alpha(&canvas, 55, y)).sum::<u32>(), 0);
    }

    #[test]
    fn test_wu_steep_coverage_is_complementary() {
        let mut canvas = Canvas::new(64);
        AntiAliased.draw_segment(&mut canvas, INK, (30.25, 60.0), (20.0, 4.0));

        for y in 5..60 {
            let row: u32 = (0..64).map(|x| alpha(&canvas, x, y)).sum();
            assert!(row == 127 || row == 128, "row {y} has total alpha {row}");
        }
    }

    #[test]
    fn test_wu_endpoints_are_partial() {
        let mut canvas = Canvas::new(32);
        AntiAliased.draw_segment(&mut canvas, INK, (4.0, 8.0), (24.0, 8.0));
        // Interior pixels on an exact row get full coverage
        assert_eq!(canvas.get(10, 8), Some(INK));
        // Endpoints only cover half the pixel horizontally
        assert_eq!(alpha(&canvas, 4, 8), 64);
        assert_eq!(alpha(&canvas, 24, 8), 64);
    }

    #[test]
    fn test_wu_handles_degenerate_segment() {
        let mut canvas = Canvas::new(8);
        AntiAliased.draw_segment(&mut canvas, INK, (3.5, 3.5), (3.5, 3.5));
        assert!(canvas.painted_count() <= 2);
    }

    #[test]
    fn test_interpolated_overwrites_without_blending() {
        let mut canvas = Canvas::new(16);
        Interpolated.draw_segment(&mut canvas, INK, (0.0, 4.0), (10.0, 4.0));
        assert_eq!(canvas.get(5, 4), Some(INK));
        assert_eq!(alpha(&canvas, 5, 5), 0);
        Interpolated.draw_segment(&mut canvas, INK, (0.0, 4.0), (10.0, 4.0));
        assert_eq!(canvas.get(5, 4), Some(INK));
    }

    #[test]
    fn test_nearest_pixel_is_connected() {
        let mut canvas = Canvas::new(32);
        NearestPixel.draw_segment(&mut canvas, INK, (2.0, 2.0), (20.0, 11.0));
        for x in 2..=20 {
            let painted = (0..32).filter(|y| alpha(&canvas, x, *y) > 0).count();
            assert_eq!(painted, 1, "column {x}");
        }
    }

    #[test]
    fn test_render_line_passes_through_vertices() {
        let canvas = render_line(500, &Series::new(vec![1, 2, 1]), INK, &AntiAliased);
        assert_eq!(canvas.size(), 500);
        // The peak sits on the top row at the horizontal midline
        assert!(alpha(&canvas, 250, 0) > 0);
        // The arms reach the bottom row near the outer vertices
        assert!((80..=86).any(|x| alpha(&canvas, x, 499) > 0));
        assert!((413..=420).any(|x| alpha(&canvas, x, 499) > 0));
        // Far from the line nothing is painted
        assert_eq!(alpha(&canvas, 250, 400), 0);
    }

    #[test]
    fn test_single_value_draws_nothing() {
        let canvas = render_line(100, &Series::new(vec![42]), INK, &AntiAliased);
        assert_eq!(canvas.painted_count(), 0);
    }

    #[test]
    fn test_flat_series_draws_bottom_row() {
        let canvas = render_line(100, &Series::new(vec![3, 3, 3]), INK, &AntiAliased);
        assert_eq!(canvas.get(40, 99), Some(INK));
        assert_eq!(canvas.get(70, 99), Some(INK));
        assert_eq!(alpha(&canvas, 40, 50), 0);
    }

    #[test]
    fn test_line_style_parsing() {
        assert_eq!("wu".parse::<LineStyle>(), Ok(LineStyle::AntiAliased));
        assert_eq!("Interpolated".parse::<LineStyle>(), Ok(LineStyle::Interpolated));
        assert_eq!("nearest".parse::<LineStyle>(), Ok(LineStyle::NearestPixel));
        assert!("dotted".parse::<LineStyle>().is_err());
        assert_eq!(LineStyle::default().to_string(), "anti-aliased");
        assert_eq!(LineStyle::NearestPixel.strategy().name(), "nearest");
    }
}
