//! Run configuration.
//!
//! - [`options`]: closure convention, reducer and the capability set
//! - [`report_config`]: the TOML configuration file and [`ReportConfig`]

pub mod options;
pub mod report_config;

pub use options::{BinClosure, Capability, CapabilitySet, Reducer};
pub use report_config::{
    CurrentSettings, ReportConfig, SourceMetadata, WaterSettings, WaveSettings, WindSettings,
    DEFAULT_SWELL_PEAK_ENHANCEMENT,
};
