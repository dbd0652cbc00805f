//! Vertical bar chart rasterization.

use chart_core::{ColorResolver, Palette, Series};

use crate::canvas::Canvas;

/// Vertical scale shared by every bar of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarScale {
    /// Value range mapped onto the full canvas height.
    pub span: i128,
    /// Baseline distance from the bottom edge, in pixels.
    pub zero_row: i64,
}

impl BarScale {
    /// Derive the scale for `values` on a canvas of `size` pixels.
    ///
    /// - all negative: span is `-max`, baseline sits at the top (bars hang down)
    /// - mixed signs: span is `max - min`, baseline lifted by the negative share
    /// - otherwise: span is `max`, baseline at the bottom
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn for_values(values: &[i64], size: u32) -> Self {
        let (min, max) = chart_core::extremes(values);
        let (min, max) = (i128::from(min), i128::from(max));

        let span = if max < 0 {
            -max
        } else if min < 0 {
            max - min
        } else {
            max
        };

        let zero_row = if max < 0 {
            i64::from(size)
        } else if min < 0 {
            (f64::from(size) * (-min) as f64 / span as f64) as i64
        } else {
            0
        };

        Self { span, zero_row }
    }

    /// Signed bar length in pixels; zero when the span is degenerate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn length(&self, value: i64, size: u32) -> i64 {
        if self.span == 0 {
            return 0;
        }
        (f64::from(size) * value as f64 / self.span as f64) as i64
    }

    /// Canvas row the bars grow from.
    #[must_use]
    pub fn baseline_row(&self, size: u32) -> i64 {
        i64::from(size) - self.zero_row
    }
}

/// Inclusive column range of band `index` out of `count`.
///
/// Neighbouring bands share their boundary column.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn band_columns(index: usize, count: usize, size: u32) -> (i64, i64) {
    let thickness = f64::from(size) / count as f64;
    let start = (index as f64 * thickness) as i64;
    let end = (start as f64 + thickness) as i64;
    (start, end)
}

/// Paint one vertical bar per value onto a fresh canvas.
///
/// Bar `i` takes palette color `i mod len`; with an empty palette every bar
/// shares one random color.
#[must_use]
pub fn render_bar(
    size: u32,
    series: &Series,
    palette: &Palette,
    colors: &mut ColorResolver,
) -> Canvas {
    let mut canvas = Canvas::new(size);
    let values = series.values();
    let scale = BarScale::for_values(values, size);
    let baseline = scale.baseline_row(size);
    let shared = colors.random();
    let limit = i64::from(size);

    for (i, value) in values.iter().enumerate() {
        let color = palette.get_cyclic(i).unwrap_or(shared);
        let (left, right) = band_columns(i, values.len(), size);
        let length = scale.length(*value, size);

        // Half-open row range: upwards for positive, downwards for negative.
        let (top, bottom) = if length > 0 {
            (baseline.saturating_sub(length).saturating_add(1), baseline.saturating_add(1))
        } else {
            (baseline, baseline.saturating_sub(length))
        };

        for m in left.max(0)..=right.min(limit - 1) {
            for n in top.max(0)..bottom.min(limit) {
                canvas.set(m, n, color);
            }
        }
    }

    tracing::trace!(size, bars = values.len(), span = %scale.span, "bars rendered");
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::Color;

    fn column_height(canvas: &Canvas, x: i64) -> usize {
        (0..i64::from(canvas.size()))
            .filter(|y| canvas.get(x, *y).is_some_and(|p| p.a > 0))
            .count()
    }

    #[test]
    fn test_scale_all_positive() {
        let scale = BarScale::for_values(&[1, 2, 3], 100);
        assert_eq!(scale.span, 3);
        assert_eq!(scale.zero_row, 0);
        assert_eq!(scale.baseline_row(100), 100);
        assert_eq!(scale.length(3, 100), 100);
        assert_eq!(scale.length(1, 100), 33);
    }

    #[test]
    fn test_scale_mixed_signs() {
        let scale = BarScale::for_values(&[-1, 3], 100);
        assert_eq!(scale.span, 4);
        assert_eq!(scale.zero_row, 25);
        assert_eq!(scale.baseline_row(100), 75);
        assert_eq!(scale.length(-1, 100), -25);
    }

    #[test]
    fn test_scale_all_negative() {
        let scale = BarScale::for_values(&[-2, -4], 100);
        assert_eq!(scale.span, 2);
        assert_eq!(scale.zero_row, 100);
        assert_eq!(scale.baseline_row(100), 0);
    }

    #[test]
    fn test_scale_zero_span() {
        let scale = BarScale::for_values(&[0, 0], 50);
        assert_eq!(scale.span, 0);
        assert_eq!(scale.length(0, 50), 0);
    }

    #[test]
    fn test_scale_extreme_values_do_not_overflow() {
        let scale = BarScale::for_values(&[i64::MIN, i64::MAX], 64);
        assert_eq!(scale.span, i128::from(i64::MAX) - i128::from(i64::MIN));
        assert!(scale.zero_row > 0 && scale.zero_row < 64);
    }

    #[test]
    fn test_band_columns_overlap_by_one() {
        assert_eq!(band_columns(0, 3, 99), (0, 33));
        assert_eq!(band_columns(1, 3, 99), (33, 66));
        assert_eq!(band_columns(2, 3, 99), (66, 99));
    }

    #[test]
    fn test_heights_proportional() {
        let palette = Palette::new(vec![Color::rgb(200, 10, 10)]);
        let canvas = render_bar(
            100,
            &Series::new(vec![1, 2, 3]),
            &palette,
            &mut ColorResolver::seeded(0),
        );

        // Sample band centres away from the shared boundary columns
        let heights: Vec<usize> = [16, 50, 83].iter().map(|x| column_height(&canvas, *x)).collect();
        assert!(heights[0].abs_diff(33) <= 1, "{heights:?}");
        assert!(heights[1].abs_diff(66) <= 1, "{heights:?}");
        assert!(heights[2].abs_diff(100) <= 1, "{heights:?}");

        // Bars stand on the bottom edge
        assert!(canvas.get(16, 99).is_some_and(|p| p.a > 0));
        assert_eq!(canvas.get(16, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_negative_bars_hang_below_baseline() {
        let palette = Palette::new(vec![Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)]);
        let canvas = render_bar(
            100,
            &Series::new(vec![-1, 3]),
            &palette,
            &mut ColorResolver::seeded(0),
        );

        // Baseline at row 75: the negative bar occupies rows 75..100
        assert_eq!(canvas.get(25, 80), Some(Color::rgb(1, 1, 1)));
        assert_eq!(canvas.get(25, 60), Some(Color::TRANSPARENT));
        // The positive bar grows upwards from row 75
        assert_eq!(canvas.get(75, 10), Some(Color::rgb(2, 2, 2)));
        assert_eq!(canvas.get(75, 90), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_palette_cycles_across_bars() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let canvas = render_bar(
            90,
            &Series::new(vec![1, 1, 1]),
            &Palette::new(vec![red, blue]),
            &mut ColorResolver::seeded(0),
        );
        assert_eq!(canvas.get(15, 50), Some(red));
        assert_eq!(canvas.get(45, 50), Some(blue));
        assert_eq!(canvas.get(75, 50), Some(red));
    }

    #[test]
    fn test_empty_palette_shares_one_random_color() {
        let mut expected = ColorResolver::seeded(9);
        let shared = expected.random();

        let canvas = render_bar(
            60,
            &Series::new(vec![2, 3]),
            &Palette::default(),
            &mut ColorResolver::seeded(9),
        );
        assert_eq!(canvas.get(10, 59), Some(shared));
        assert_eq!(canvas.get(50, 59), Some(shared));
    }

    #[test]
    fn test_all_zero_paints_nothing() {
        let canvas = render_bar(
            40,
            &Series::new(vec![0, 0, 0]),
            &Palette::default(),
            &mut ColorResolver::seeded(0),
        );
        assert_eq!(canvas.size(), 40);
        assert_eq!(canvas.painted_count(), 0);
    }

    #[test]
    fn test_single_value_fills_canvas() {
        let canvas = render_bar(
            20,
            &Series::new(vec![7]),
            &Palette::new(vec![Color::rgb(0, 0, 0)]),
            &mut ColorResolver::seeded(0),
        );
        // The baseline row sits just below the canvas, so the top row stays clear
        assert_eq!(canvas.painted_count(), 20 * 19);
        assert_eq!(canvas.get(5, 0), Some(Color::TRANSPARENT));
        assert_eq!(canvas.get(5, 1), Some(Color::rgb(0, 0, 0)));
    }
}
