//! Shelf CLI
//!
//! Menu-driven front end for the shelf book catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelf_core::{Config, Store};

mod menu;
mod output;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "shelf - a single-user book catalog")]
#[command(version)]
struct Cli {
    /// Override the data directory (mainly for scripts and tests)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match cli.data_dir {
        Some(dir) => Config::with_data_dir(dir)?,
        None => Config::load()?,
    };

    let mut store = Store::open_with_config(config)?;
    menu::run(&mut store)
}

/// Diagnostics go to stderr and default to warnings only, so they never
/// interleave with the menu.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
