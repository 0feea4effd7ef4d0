//! From raw observations to a discretised dataset.
//!
//! [`MetoceanData`] runs the steps in order: validation, peak enhancement
//! derivation, then discretisation into bins and sectors.

pub mod discretiser;
pub mod enricher;
pub mod pipeline;
pub mod validator;

pub use discretiser::{BinTable, DiscreteColumn, Discretisation};
pub use enricher::GammaEnricher;
pub use pipeline::MetoceanData;
pub use validator::{DatasetValidator, ValidationResult, ValidationStats};
