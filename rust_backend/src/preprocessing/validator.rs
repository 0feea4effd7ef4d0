use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::core::{ObservationSet, SeaComponent, Variable};

/// Validation outcome with categorized issues and statistics.
///
/// Errors make `is_valid` false, warnings are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub columns_checked: usize,
    /// `NaN` count per column, only columns with gaps are listed.
    pub missing_values: BTreeMap<Variable, usize>,
    pub negative_values: usize,
    pub out_of_range_directions: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for joined observation datasets.
///
/// A missing table column is an error. Gaps, negative magnitudes and
/// out-of-range directions are warnings, as are missing ancillary columns.
pub struct DatasetValidator;

impl DatasetValidator {
    /// Columns the tables are built from.
    ///
    /// Gamma columns are listed only when measured; derived gamma is added
    /// later by the pipeline.
    pub fn required_columns(config: &ReportConfig) -> Vec<Variable> {
        let mut columns = Vec::new();
        if let Some(wind) = &config.wind {
            columns.extend([Variable::WindSpeed, Variable::WindDirection]);
            if wind.ten_metre {
                columns.extend([Variable::WindSpeed10m, Variable::WindDirection10m]);
            }
        }
        if let Some(wave) = &config.wave {
            let components: &[SeaComponent] = if wave.spectral {
                &SeaComponent::ALL
            } else {
                &[SeaComponent::Total]
            };
            for component in components {
                columns.extend([
                    component.hs(),
                    component.direction(),
                    component.tp(),
                    component.tz(),
                ]);
                if wave.peak_enhancement {
                    columns.push(component.gamma());
                }
            }
        }
        if let Some(current) = &config.current {
            columns.extend([
                Variable::SurfaceCurrent,
                Variable::DepthAveragedCurrent,
                Variable::CurrentDirection,
            ]);
            if current.components {
                columns.extend([
                    Variable::SurfaceCurrentTidal,
                    Variable::DepthAveragedCurrentTidal,
                    Variable::CurrentDirectionTidal,
                    Variable::SurfaceCurrentResidual,
                    Variable::DepthAveragedCurrentResidual,
                    Variable::CurrentDirectionResidual,
                ]);
            }
        }
        columns
    }

    /// Columns the sources carry but no table consumes; absence is a warning.
    pub fn ancillary_columns(config: &ReportConfig) -> Vec<Variable> {
        let mut columns = Vec::new();
        if let Some(wind) = &config.wind {
            columns.extend([Variable::AirTemperature, Variable::AirDensity]);
            if wind.ten_metre {
                columns.extend([Variable::AirTemperature10m, Variable::AirDensity10m]);
            }
        }
        if config.water.is_some() {
            columns.extend([
                Variable::Salinity,
                Variable::SeaSurfaceTemperature,
                Variable::WaterDensity,
            ]);
        }
        columns
    }

    /// Validate a dataset for a run configuration.
    pub fn validate(config: &ReportConfig, observations: &ObservationSet) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_rows = observations.height();

        if observations.is_empty() {
            result.add_error("Dataset has no rows after joining the sources".to_string());
        }

        for variable in Self::ancillary_columns(config) {
            if !observations.has_column(variable) {
                result.add_warning(format!("Missing column {}", variable));
            }
        }

        for variable in Self::required_columns(config) {
            let Ok(values) = observations.column(variable) else {
                result.add_error(format!("Missing required column {}", variable));
                continue;
            };
            result.stats.columns_checked += 1;

            let missing = values.iter().filter(|v| v.is_nan()).count();
            if missing > 0 {
                result.stats.missing_values.insert(variable, missing);
                result.add_warning(format!(
                    "Column {} has {} missing values out of {}",
                    variable,
                    missing,
                    values.len()
                ));
            }

            if variable.is_directional() {
                let outside = values
                    .iter()
                    .filter(|v| !v.is_nan() && !(0.0..=360.0).contains(*v))
                    .count();
                if outside > 0 {
                    result.stats.out_of_range_directions += outside;
                    result.add_warning(format!(
                        "Column {} has {} directions outside [0, 360]",
                        variable, outside
                    ));
                }
            } else if is_magnitude(variable) {
                let negative = values.iter().filter(|v| **v < 0.0).count();
                if negative > 0 {
                    result.stats.negative_values += negative;
                    result.add_warning(format!(
                        "Column {} has {} negative values",
                        variable, negative
                    ));
                }
            }
        }

        result
    }
}

/// Speeds, heights and periods, which cannot be negative.
fn is_magnitude(variable: Variable) -> bool {
    matches!(
        variable,
        Variable::WindSpeed
            | Variable::WindSpeed10m
            | Variable::Hs
            | Variable::Tp
            | Variable::Tz
            | Variable::HsWind
            | Variable::TpWind
            | Variable::TzWind
            | Variable::HsSwell
            | Variable::TpSwell
            | Variable::TzSwell
            | Variable::SurfaceCurrent
            | Variable::DepthAveragedCurrent
            | Variable::SurfaceCurrentTidal
            | Variable::DepthAveragedCurrentTidal
            | Variable::SurfaceCurrentResidual
            | Variable::DepthAveragedCurrentResidual
    )
}
