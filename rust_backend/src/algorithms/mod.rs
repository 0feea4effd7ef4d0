//! Discretisation and derivation algorithms.
//!
//! # Components
//!
//! - [`binning`]: continuous values to bins under a closure convention
//! - [`sectors`]: directions to compass sectors with wrap-around at north
//! - [`gamma`]: peak enhancement factor from Hs and Tp
//! - [`stats`]: `NaN`-aware mean, median and sum
//!
//! # Example
//!
//! ```
//! use metocean_rust::algorithms::{bin, sectorise};
//! use metocean_rust::config::BinClosure;
//!
//! assert_eq!(bin(7.2, 5.0, BinClosure::Left), 7.5);
//! assert_eq!(sectorise(359.0, 12, BinClosure::Left), Some(1));
//! ```

pub mod binning;
pub mod gamma;
pub mod sectors;
pub mod stats;

pub use binning::{bin, round4, BinScale};
pub use gamma::{derive_gamma, derive_gamma_column};
pub use sectors::{sectorise, SectorScale};
pub use stats::{nan_mean, nan_median, nan_sum};
