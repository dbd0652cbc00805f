//! # Chart Core
//!
//! Data model shared by the chart rasterizer and its HTTP host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 chart-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Color           │  Series / Palette        │
//! │  - RGBA8         │  - ordered values        │
//! │  - hex parsing   │  - cyclic colors         │
//! │  - resolver      │  - extremes              │
//! ├─────────────────────────────────────────────┤
//! │  ChartRequest    │  ChartKind               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Random fallback colors come from an explicitly passed [`ColorResolver`],
//! never from a process-wide generator.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod error;
pub mod request;
pub mod series;

pub use color::{Color, ColorResolver, DEFAULT_ALPHA};
pub use error::{ChartError, ChartResult};
pub use request::{ChartKind, ChartRequest};
pub use series::{extremes, Palette, Series};

/// Chart core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
