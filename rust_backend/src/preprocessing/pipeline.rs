use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use crate::config::{CapabilitySet, ReportConfig};
use crate::core::{ObservationSet, Variable};
use crate::error::{MetoceanError, MetoceanResult};
use crate::io::loaders::SourceLoader;
use crate::preprocessing::discretiser::{
    discretisation_plan, discretise_all, BinTable, DiscreteColumn,
};
use crate::preprocessing::enricher::GammaEnricher;
use crate::preprocessing::validator::{DatasetValidator, ValidationResult};

/// A joined, enriched and discretised dataset ready for table building.
///
/// Immutable once built; the table builders only read from it.
#[derive(Debug, Clone)]
pub struct MetoceanData {
    config: ReportConfig,
    observations: ObservationSet,
    discrete: BTreeMap<Variable, DiscreteColumn>,
    bins: BinTable,
    validation: ValidationResult,
}

impl MetoceanData {
    /// Load the configuration file and every data file it enables.
    pub fn load<P: AsRef<Path>>(config_path: P) -> MetoceanResult<Self> {
        let config = ReportConfig::from_file(config_path)?;
        Self::from_config(config)
    }

    /// Load the data files of an already parsed configuration.
    pub fn from_config(config: ReportConfig) -> MetoceanResult<Self> {
        let start = Instant::now();

        // Step 1: Load enabled sources and join them on the overlapping period
        let observations = SourceLoader::load_joined(&config)?;
        log::info!("Parsing data complete in {:.2?}", start.elapsed());

        // Step 2-4: Validate, enrich and discretise
        Self::new(config, observations)
    }

    /// Prepare an in-memory dataset.
    pub fn new(config: ReportConfig, mut observations: ObservationSet) -> MetoceanResult<Self> {
        config.validate()?;

        // Step 2: Validate
        let validation = DatasetValidator::validate(&config, &observations);
        for warning in &validation.warnings {
            log::warn!("{}", warning);
        }
        if !validation.is_valid {
            return Err(MetoceanError::Precondition(validation.errors.join("; ")));
        }

        // Step 3: Derive the peak enhancement factor (if requested)
        if let Some(wave) = &config.wave {
            GammaEnricher::new(wave).enrich(&mut observations)?;
        }

        // Step 4: Discretise into bins and sectors
        let start = Instant::now();
        let plan = discretisation_plan(&config);
        let (discrete, bins) = discretise_all(&observations, &plan, config.bin_type)?;
        log::info!(
            "Discretised {} columns of {} rows in {:.2?}",
            discrete.len(),
            observations.height(),
            start.elapsed()
        );

        Ok(Self {
            config,
            observations,
            discrete,
            bins,
            validation,
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.config.capabilities()
    }

    pub fn observations(&self) -> &ObservationSet {
        &self.observations
    }

    /// Total number of rows; the denominator of every probability.
    pub fn height(&self) -> usize {
        self.observations.height()
    }

    pub fn bins(&self) -> &BinTable {
        &self.bins
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn has_discrete(&self, variable: Variable) -> bool {
        self.discrete.contains_key(&variable)
    }

    /// Discretised column of a variable.
    pub fn discrete(&self, variable: Variable) -> MetoceanResult<&DiscreteColumn> {
        self.discrete
            .get(&variable)
            .ok_or(MetoceanError::MissingColumn(variable))
    }

    /// Raw column of a variable.
    pub fn column(&self, variable: Variable) -> MetoceanResult<&[f64]> {
        self.observations.column(variable)
    }
}
