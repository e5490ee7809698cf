//! Terminal digital clock
//!
//! Redraws the local time once per tick. [H] toggles 12/24 hour, [Q] quits.

mod clock;
mod keys;
mod raw_mode;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use deskutils_core::logging::{setup_logging, DEFAULT_LOG_LEVEL};
use tracing::info;

use crate::clock::{ClockConfig, ClockState, HourFormat};
use crate::keys::CrosstermKeys;

/// Terminal digital clock
#[derive(Parser, Debug)]
#[command(name = "digital_clock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Full-screen digital clock for the terminal", long_about = None)]
struct Args {
    /// Start in 12-hour mode
    #[arg(long, default_value_t = false)]
    twelve_hour: bool,

    /// Redraw interval in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let format = if args.twelve_hour {
        HourFormat::TwelveHour
    } else {
        HourFormat::TwentyFourHour
    };
    let config = ClockConfig::default()
        .with_tick(Duration::from_millis(args.tick_ms))
        .with_format(format);

    info!("Starting clock ({:?}, tick {:?})", config.format, config.tick);

    let mut state = ClockState::new(config.format);
    let mut keys = CrosstermKeys::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    clock::run(&mut state, config.tick, &mut keys, || Local::now().time(), &mut out)
        .context("Clock loop failed")?;

    Ok(())
}
