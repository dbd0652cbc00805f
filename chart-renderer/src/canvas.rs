//! Square pixel buffer that renderers paint into.

use chart_core::Color;

/// A square RGBA pixel grid, row-major, initialised to transparent.
///
/// Coordinates are signed so renderers can hand over computed positions
/// directly; anything outside `[0, size)` is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a transparent canvas of `size` x `size` pixels.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let side = size as usize;
        Self {
            size,
            pixels: vec![Color::TRANSPARENT; side * side],
        }
    }

    /// Diagnostic canvas with the central square `[size/4, 3*size/4)` painted
    /// opaque black. Not used for charts.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn diagnostic(size: u32) -> Self {
        let mut canvas = Self::new(size);
        let from = (0.25 * f64::from(size)) as i64;
        let to = (0.75 * f64::from(size)) as i64;
        for x in from..to {
            for y in from..to {
                canvas.set(x, y, Color::BLACK);
            }
        }
        canvas
    }

    /// Edge length in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let size = i64::from(self.size);
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((y * size + x) as usize)
    }

    /// Read a pixel, or `None` outside the canvas.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite a pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite `color` over the pixel (source-over, straight alpha).
    ///
    /// On a transparent pixel the result is exactly `color`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn blend(&mut self, x: i64, y: i64, color: Color) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if color.a == 0 {
            return;
        }
        let dst = self.pixels[i];
        if dst.a == 0 || color.a == u8::MAX {
            self.pixels[i] = color;
            return;
        }

        let sa = f64::from(color.a) / 255.0;
        let da = f64::from(dst.a) / 255.0 * (1.0 - sa);
        let out_a = sa + da;
        let mix = |s: u8, d: u8| ((f64::from(s) * sa + f64::from(d) * da) / out_a).round() as u8;

        self.pixels[i] = Color::rgba(
            mix(color.r, dst.r),
            mix(color.g, dst.g),
            mix(color.b, dst.b),
            (out_a * 255.0).round() as u8,
        );
    }

    /// Number of pixels with non-zero alpha.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Row-major RGBA8 bytes, four per pixel.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(8);
        assert_eq!(canvas.size(), 8);
        assert_eq!(canvas.pixels().len(), 64);
        assert_eq!(canvas.painted_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut canvas = Canvas::new(4);
        let red = Color::rgb(255, 0, 0);
        canvas.set(1, 2, red);
        assert_eq!(canvas.get(1, 2), Some(red));
        assert_eq!(canvas.get(2, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_out_of_range_is_clipped() {
        let mut canvas = Canvas::new(4);
        canvas.set(-1, 0, Color::BLACK);
        canvas.set(4, 0, Color::BLACK);
        canvas.set(0, 4, Color::BLACK);
        canvas.blend(0, -3, Color::BLACK);
        assert_eq!(canvas.painted_count(), 0);
        assert_eq!(canvas.get(4, 4), None);
        assert_eq!(canvas.get(-1, 0), None);
    }

    #[test]
    fn test_blend_on_transparent_keeps_source() {
        let mut canvas = Canvas::new(2);
        let half = Color::rgba(10, 20, 30, 77);
        canvas.blend(0, 0, half);
        assert_eq!(canvas.get(0, 0), Some(half));
    }

    #[test]
    fn test_blend_composites_over_existing() {
        let mut canvas = Canvas::new(2);
        canvas.set(0, 0, Color::rgba(0, 0, 255, 255));
        canvas.blend(0, 0, Color::rgba(255, 0, 0, 128));

        let out = canvas.get(0, 0).expect("in range");
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 136, "red was {}", out.r);
        assert!(out.b > 120 && out.b < 136, "blue was {}", out.b);

        // Two half-transparent layers are more opaque than one
        let mut canvas = Canvas::new(1);
        canvas.blend(0, 0, Color::rgba(0, 255, 0, 128));
        canvas.blend(0, 0, Color::rgba(0, 255, 0, 128));
        let out = canvas.get(0, 0).expect("in range");
        assert_eq!(out.g, 255);
        assert!(out.a > 128);
    }

    #[test]
    fn test_diagnostic_pattern() {
        let canvas = Canvas::diagnostic(8);
        assert_eq!(canvas.get(2, 2), Some(Color::BLACK));
        assert_eq!(canvas.get(5, 5), Some(Color::BLACK));
        assert_eq!(canvas.get(6, 6), Some(Color::TRANSPARENT));
        assert_eq!(canvas.get(1, 4), Some(Color::TRANSPARENT));
        assert_eq!(canvas.painted_count(), 16);
    }

    #[test]
    fn test_rgba_bytes_layout() {
        let mut canvas = Canvas::new(2);
        canvas.set(1, 0, Color::rgba(1, 2, 3, 4));
        let bytes = canvas.to_rgba_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
    }
}
