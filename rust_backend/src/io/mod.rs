//! Input loading and report output.
//!
//! [`loaders`] turns the configured data files into observation datasets;
//! [`writer`] hands finished reports to the workbook renderer as JSON.
//!
//! # Example
//!
//! ```no_run
//! use metocean_rust::config::ReportConfig;
//! use metocean_rust::io::loaders::SourceLoader;
//!
//! let config = ReportConfig::from_file("metocean.toml").expect("Failed to read config");
//! let observations = SourceLoader::load_joined(&config).expect("Failed to load");
//! println!("Loaded {} rows", observations.height());
//! ```

pub mod loaders;
pub mod writer;


pub use loaders::{DataSource, SourceLoadResult, SourceLoader};
pub use writer::{report_json_path, write_report_json};
