//! CLI calculator with a plain-text history log

mod history;
mod menu;
mod operation;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use deskutils_core::logging::{setup_logging, DEFAULT_LOG_LEVEL};
use deskutils_core::Prompter;
use tracing::info;

use crate::history::{History, DEFAULT_HISTORY_FILE};
use crate::menu::CalculatorConfig;

/// Menu-driven calculator
#[derive(Parser, Debug)]
#[command(name = "simple_calculator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Arithmetic calculator that logs every result", long_about = None)]
struct Args {
    /// History log file
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let config = CalculatorConfig::default().with_history_path(args.history);
    info!("Using history file {}", config.history_path.display());

    let history = History::new(config.history_path);
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    menu::run(&mut prompter, &history, || Local::now().naive_local())
        .context("Calculator menu failed")?;

    Ok(())
}
