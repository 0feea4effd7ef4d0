//! Metocean table engine.
//!
//! Turns synchronised wind, wave and current time series into normal
//! sea-state (NSS) tables and joint occurrence (scatter) tables.
//!
//! # Layout
//!
//! - [`config`]: TOML report configuration and capability toggles
//! - [`parsing`] / [`io`]: data file ingestion and JSON hand-off
//! - [`algorithms`]: binning, sectorisation, gamma derivation, reductions
//! - [`preprocessing`]: validation, enrichment and discretisation
//! - [`services`]: NSS and scatter table builders
//! - [`models`]: table and report structures
//!
//! # Example
//!
//! ```no_run
//! use metocean_rust::preprocessing::MetoceanData;
//! use metocean_rust::services::{build_nss_report, build_scatter_report};
//!
//! let data = MetoceanData::load("project/config.toml")?;
//! let nss = build_nss_report(&data)?;
//! let scatter = build_scatter_report(&data)?;
//! println!("{} NSS sheets, {} scatter tables", nss.sheets.len(), scatter.table_count());
//! # Ok::<(), metocean_rust::error::MetoceanError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod preprocessing;
pub mod services;

pub use error::{MetoceanError, MetoceanResult};
