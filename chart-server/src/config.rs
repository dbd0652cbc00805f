//! Server configuration from command-line flags and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chart_renderer::{LineStyle, RendererConfig, DONUT_HOLE_RATIO};
use clap::Parser;

use crate::validation::{Limits, DEFAULT_SIZE, MAX_SIZE, MAX_VALUES};

/// Default port for the chart server.
pub const DEFAULT_PORT: u16 = 8080;

/// Command-line arguments for chart-server.
#[derive(Debug, Clone, Parser)]
#[command(name = "chart-server")]
#[command(about = "Renders bar, pie and line charts as PNG over HTTP")]
#[command(version)]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, env = "CHART_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "CHART_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Canvas size when a request names none
    #[arg(long, env = "CHART_DEFAULT_SIZE", default_value_t = DEFAULT_SIZE)]
    pub default_size: u32,

    /// Largest canvas size a request may ask for
    #[arg(long, env = "CHART_MAX_SIZE", default_value_t = MAX_SIZE)]
    pub max_size: u32,

    /// Largest number of values per chart
    #[arg(long, env = "CHART_MAX_VALUES", default_value_t = MAX_VALUES)]
    pub max_values: usize,

    /// Line drawing: anti-aliased, interpolated or nearest
    #[arg(long, env = "CHART_LINE_STYLE", default_value = "anti-aliased")]
    pub line_style: LineStyle,

    /// Donut hole radius as a fraction of the pie radius
    #[arg(long, env = "CHART_DONUT_HOLE", default_value_t = DONUT_HOLE_RATIO)]
    pub donut_hole: f64,
}

/// Chart server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Request validation limits.
    pub limits: Limits,
    /// Rasterizer settings.
    pub renderer: RendererConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerConfig {
    /// Create a configuration bound to localhost with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            limits: Limits::default(),
            renderer: RendererConfig::default(),
        }
    }

    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        // A default larger than the maximum could never be served
        let default_size = args.default_size.clamp(1, args.max_size.max(1));
        Self {
            host: args.host,
            port: args.port,
            limits: Limits {
                default_size,
                max_size: args.max_size,
                max_values: args.max_values,
            },
            renderer: RendererConfig {
                hole_ratio: args.donut_hole.clamp(0.0, 1.0),
                line_style: args.line_style,
            },
        }
    }
}
