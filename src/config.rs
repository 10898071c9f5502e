use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Two jointed rods tracing e^(iθ) + e^(iπθ) in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Simulation steps per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub tick_rate: u32,

    /// Maximum frames drawn per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Assumed cell width in pixels when the terminal does not report one
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_width: u16,

    /// Assumed cell height in pixels when the terminal does not report one
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_height: u16,

    /// Start with the debug overlay shown
    #[arg(short, long)]
    pub debug: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Settings for the render driver
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub tick_interval: Duration,
    pub frame_interval: Duration,
    /// Fallback cell size in pixels
    pub cell_size: (u16, u16),
    pub debug: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            tick_interval: Duration::from_secs_f64(1.0 / args.tick_rate as f64),
            frame_interval: Duration::from_secs_f64(1.0 / args.fps as f64),
            cell_size: (args.cell_width, args.cell_height),
            debug: args.debug,
        }
    }
}
