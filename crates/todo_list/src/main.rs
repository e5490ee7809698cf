//! Flat-file to-do list manager

mod menu;
mod tasks;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use deskutils_core::logging::{setup_logging, DEFAULT_LOG_LEVEL};
use deskutils_core::Prompter;
use tracing::info;

use crate::menu::{TodoConfig, DEFAULT_TASK_FILE};
use crate::tasks::TaskList;

/// Menu-driven to-do list
#[derive(Parser, Debug)]
#[command(name = "todo_list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "To-do list stored one task per line", long_about = None)]
struct Args {
    /// Task file
    #[arg(short, long, default_value = DEFAULT_TASK_FILE)]
    file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let config = TodoConfig::default().with_path(args.file);
    let mut tasks = TaskList::load(&config.path, config.capacity)
        .with_context(|| format!("Failed to load {}", config.path.display()))?;
    info!("Loaded {} tasks from {}", tasks.len(), config.path.display());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    menu::run(&mut prompter, &mut tasks, &config.path).context("To-do menu failed")?;

    Ok(())
}
