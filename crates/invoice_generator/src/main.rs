//! Invoice Generator
//!
//! Builds invoices from `items.csv` or manual entry, stores them as
//! timestamped text files and lets past invoices be listed and viewed.

mod csv;
mod invoice;
mod menu;
mod store;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use deskutils_core::logging::{setup_logging, DEFAULT_LOG_LEVEL};
use deskutils_core::Prompter;
use tracing::info;

use crate::csv::DEFAULT_ITEMS_FILE;
use crate::menu::InvoiceConfig;
use crate::store::DEFAULT_INVOICE_DIR;

/// Flat-file invoice generator
#[derive(Parser, Debug)]
#[command(name = "invoice_generator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate, list and view plain-text invoices", long_about = None)]
struct Args {
    /// CSV file with `name,quantity,price` lines
    #[arg(long, default_value = DEFAULT_ITEMS_FILE)]
    items: PathBuf,

    /// Folder for generated invoices
    #[arg(long, default_value = DEFAULT_INVOICE_DIR)]
    dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let config = InvoiceConfig::default()
        .with_items_path(args.items)
        .with_invoice_dir(args.dir);

    std::fs::create_dir_all(&config.invoice_dir)
        .with_context(|| format!("Failed to create {}", config.invoice_dir.display()))?;
    info!("Invoices stored in {}", config.invoice_dir.display());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    menu::run(&mut prompter, &config, || Local::now().naive_local())
        .context("Invoice menu failed")?;

    Ok(())
}
