//! Core domain models for metocean time series.
//!
//! This module defines the measured variables, the sea-state and wind-level
//! groupings used to address them, and the in-memory observation dataset.

pub mod dataset;
pub mod domain;

pub use dataset::ObservationSet;
pub use domain::{SeaComponent, Variable, WindLevel};
