//! Colors and the random-fallback color resolver.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartResult, Palette};

/// Alpha applied to every renderer-chosen color (half transparency).
pub const DEFAULT_ALPHA: u8 = 128;

/// An 8-bit straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black; the background of every fresh canvas.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Create a color from all four channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color with [`DEFAULT_ALPHA`].
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, DEFAULT_ALPHA)
    }

    /// Return the same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse exactly six hexadecimal digits (`rrggbb`) into a color with
    /// [`DEFAULT_ALPHA`].
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidHexColor`] if the input is not six hex digits.
    pub fn parse_hex(s: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidHexColor(s.to_string());
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Six lowercase hex digits for the RGB channels.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as an `[r, g, b, a]` array.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Produces colors from hex strings, falling back to pseudo-random colors.
///
/// The resolver owns its generator. Hosts create one per render call (or
/// seed one for reproducible output) instead of sharing global state.
#[derive(Debug, Clone)]
pub struct ColorResolver {
    rng: StdRng,
}

impl ColorResolver {
    /// Wrap an existing generator.
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Deterministic resolver; the same seed yields the same color sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Resolver seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Draw R, G and B uniformly from `[0, 255)` with [`DEFAULT_ALPHA`].
    pub fn random(&mut self) -> Color {
        Color::rgb(
            self.rng.random_range(0..255),
            self.rng.random_range(0..255),
            self.rng.random_range(0..255),
        )
    }

    /// Parse a six digit hex color, substituting a random color for anything
    /// that does not parse.
    ///
    /// This never fails. Callers wanting strict validation use
    /// [`Color::parse_hex`] first.
    pub fn from_hex(&mut self, s: &str) -> Color {
        match Color::parse_hex(s) {
            Ok(color) => color,
            Err(_) => {
                if !s.is_empty() {
                    tracing::debug!(input = s, "unparseable color, using random fallback");
                }
                self.random()
            }
        }
    }

    /// The palette entry for index `i` (cyclic), or a fresh random color when
    /// the palette is empty.
    pub fn palette_or_random(&mut self, palette: &Palette, i: usize) -> Color {
        match palette.get_cyclic(i) {
            Some(color) => color,
            None => self.random(),
        }
    }
}
