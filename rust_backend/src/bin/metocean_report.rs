//! Metocean report binary.
//!
//! Loads the configured data files, builds the NSS and scatter reports and
//! writes their JSON hand-offs next to each other.
//!
//! # Usage
//!
//! ```bash
//! metocean-report project/config.toml --out project/output
//! RUST_LOG=debug metocean-report project/config.toml --skip-nss
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use metocean_rust::io::write_report_json;
use metocean_rust::preprocessing::MetoceanData;
use metocean_rust::services::{build_nss_report, build_scatter_report, nss_applicable};

#[derive(Parser)]
#[command(name = "metocean-report")]
#[command(about = "Build NSS and scatter tables from metocean time series")]
struct Args {
    /// TOML configuration file
    config: PathBuf,

    /// Output directory (defaults to the configuration's directory)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Do not build the NSS report
    #[arg(long)]
    skip_nss: bool,

    /// Do not build the scatter report
    #[arg(long)]
    skip_scatter: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let start = Instant::now();
    info!("Loading {}", args.config.display());
    let data = MetoceanData::load(&args.config)
        .with_context(|| format!("Failed to prepare data from {}", args.config.display()))?;
    let stats = &data.validation().stats;
    info!(
        "Prepared {} rows ({} columns checked, {} with gaps, {} warnings)",
        stats.total_rows,
        stats.columns_checked,
        stats.missing_values.len(),
        data.validation().warnings.len()
    );

    let out_dir = args.out.clone().unwrap_or_else(|| {
        args.config
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    if args.skip_nss {
        info!("NSS report skipped");
    } else if nss_applicable(&data) {
        let report = build_nss_report(&data).context("Failed to build NSS tables")?;
        let path = write_report_json(&report, &out_dir).context("Failed to write NSS report")?;
        info!("NSS report written to {}", path.display());
    } else {
        info!("NSS report not requested or wind/wave data disabled");
    }

    if args.skip_scatter {
        info!("Scatter report skipped");
    } else if data.config().scatter_report {
        let report = build_scatter_report(&data).context("Failed to build scatter tables")?;
        let path =
            write_report_json(&report, &out_dir).context("Failed to write scatter report")?;
        info!("Scatter report written to {}", path.display());
    } else {
        info!("Scatter report not requested");
    }

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
