//! Table builders over a prepared [`MetoceanData`](crate::preprocessing::MetoceanData).
//!
//! Every builder is a pure function of the dataset; nothing here mutates it.

pub mod nss;
pub mod scatter;
pub mod scatter_report;

pub use nss::{build_nss_report, build_nss_tables, nss_applicable};
pub use scatter::{build_scatter, MAX_FILTERS};
pub use scatter_report::{build_scatter_report, scatter_catalogue, SheetPlan};
