//! Angle and bounding-box math for pie sectors.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Donut hole radius as a fraction of the outer radius.
pub const DONUT_HOLE_RATIO: f64 = 0.4;

/// East, north, west and south, counter-clockwise from 3 o'clock.
pub const COMPASS_ANGLES: [f64; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

/// Inclusive pixel rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorBounds {
    /// First column.
    pub left: i64,
    /// Last column.
    pub right: i64,
    /// First row.
    pub top: i64,
    /// Last row.
    pub bottom: i64,
}

impl SectorBounds {
    /// Number of pixels covered.
    #[must_use]
    pub fn area(&self) -> i64 {
        if self.right < self.left || self.bottom < self.top {
            return 0;
        }
        (self.right - self.left + 1) * (self.bottom - self.top + 1)
    }
}

/// `atan2(y, x)` mapped into `[0, 2π)`.
///
/// `y` grows upwards, so angles sweep counter-clockwise from 3 o'clock.
#[must_use]
pub fn normalized_angle(x: f64, y: f64) -> f64 {
    let angle = y.atan2(x);
    if angle >= 0.0 {
        return angle;
    }
    // Tiny negative angles can round up to a full turn
    let wrapped = angle + TAU;
    if wrapped < TAU {
        wrapped
    } else {
        0.0
    }
}

/// Smallest canvas rectangle that can hold the sector `[start, end]` of a
/// disk of `radius` centred at `(radius, radius)`.
///
/// Starts from the two boundary points and the centre, then stretches to the
/// full radius on any axis whose compass direction the sector crosses. The
/// result is clamped to the `size` x `size` canvas.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::similar_names)]
pub fn sector_bounding_box(start: f64, end: f64, radius: f64, size: u32) -> SectorBounds {
    let xs = [
        (radius * start.cos()) as i64,
        (radius * end.cos()) as i64,
        0,
    ];
    let ys = [
        (-radius * start.sin()) as i64,
        (-radius * end.sin()) as i64,
        0,
    ];
    let (mut x_min, mut x_max) = chart_core::extremes(&xs);
    let (mut y_min, mut y_max) = chart_core::extremes(&ys);

    let full = radius as i64;
    let crosses = |compass: f64| start <= compass && end >= compass;
    if crosses(COMPASS_ANGLES[0]) {
        x_max = full;
    }
    if crosses(COMPASS_ANGLES[1]) {
        y_min = -full;
    }
    if crosses(COMPASS_ANGLES[2]) {
        x_min = -full;
    }
    if crosses(COMPASS_ANGLES[3]) {
        y_max = full;
    }

    let last = i64::from(size) - 1;
    let to_canvas = |v: i64| (v + full).clamp(0, last.max(0));
    SectorBounds {
        left: to_canvas(x_min),
        right: to_canvas(x_max),
        top: to_canvas(y_min),
        bottom: to_canvas(y_max),
    }
}
