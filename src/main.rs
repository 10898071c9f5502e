mod config;
mod graphics;
mod math;
mod pose;
mod scheduler;
mod state;
mod trail;
mod viewport;
mod widget;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Config};
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use std::fs::File;
use std::io::{self, Stdout};

/// Raw mode plus alternate screen, undone on drop
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(out, EnterAlternateScreen, cursor::Hide).context("entering alternate screen")?;
        Ok(TerminalGuard { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Set up logging; a log file gets `info` by default, stderr only `warn`
fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Warn);
        }
    }
    builder.parse_env("RUST_LOG").init();
    Ok(())
}

/// Main function
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = Config::from(&args);
    info!(
        "starting {} {} ({:?} per tick, {:?} per frame)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.tick_interval,
        config.frame_interval
    );

    let mut guard = TerminalGuard::enter()?;
    widget::run(&mut guard.out, &config).context("running animation")?;
    drop(guard);

    info!("terminal restored, exiting");
    Ok(())
}
