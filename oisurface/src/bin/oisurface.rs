//! Build the merged open-interest surface of one symbol and date.
//!
//! ```text
//! oisurface --config oi.toml --symbol 159915 --suffix exp20250122_date20250108 [--narrow]
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use oisurface::core::SessionKind;
use oisurface::io::load_config;
use oisurface::{init_logging, run_symbol};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "oisurface")]
#[command(about = "Smoothed open-interest scroll surface along the spot trajectory")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: PathBuf,

    /// Underlying symbol, e.g. 159915
    #[arg(long)]
    symbol: String,

    /// Expiry/date suffix of the input files, e.g. exp20250122_date20250108
    #[arg(long)]
    suffix: String,

    /// Use the narrow session cut and strike bandwidths
    #[arg(long)]
    narrow: bool,
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let kind = SessionKind::from_wide(!args.narrow);
    info!(symbol = %args.symbol, suffix = %args.suffix, session = ?kind, "starting");

    let summary = run_symbol(&config, &args.symbol, &args.suffix, kind)
        .with_context(|| format!("building surface for {} {}", args.symbol, args.suffix))?;
    println!("{}", summary.output.display());
    Ok(())
}
