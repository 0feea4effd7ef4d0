//! Parsers for metocean input files.
//!
//! - [`timeseries`]: tab-separated wind, wave, current and seawater series
//!
//! # Example
//!
//! ```no_run
//! use metocean_rust::core::Variable;
//! use metocean_rust::parsing::timeseries::{parse_timeseries_file, ColumnLayout};
//! use std::path::Path;
//!
//! let layout = ColumnLayout::new(
//!     vec![Variable::Salinity, Variable::SeaSurfaceTemperature, Variable::WaterDensity],
//!     "seawater data",
//! );
//! let water = parse_timeseries_file(Path::new("water_data.txt"), &layout)
//!     .expect("Failed to parse water data");
//! ```

pub mod timeseries;

#[cfg(test)]
mod timeseries_tests;

pub use timeseries::{parse_timeseries_file, parse_timeseries_reader, ColumnLayout};
