use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::algorithms::{BinScale, SectorScale};
use crate::config::{BinClosure, ReportConfig};
use crate::core::{ObservationSet, SeaComponent, Variable};
use crate::error::{MetoceanError, MetoceanResult};
use crate::models::Scale;

/// How one variable is discretised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discretisation {
    /// Bins of the given width, counted from the column maximum.
    Bins(f64),
    /// The given number of compass sectors.
    Sectors(u32),
}

/// A discretised column: one axis position per row, `None` where the raw
/// value is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteColumn {
    pub variable: Variable,
    pub scale: Scale,
    pub codes: Vec<Option<u32>>,
}

impl DiscreteColumn {
    pub fn from_values(variable: Variable, values: &[f64], scale: Scale) -> Self {
        DiscreteColumn {
            variable,
            scale,
            codes: values.iter().map(|v| scale.index(*v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Per-row labels (bin centers or sector numbers), `NaN` where missing.
    pub fn labels(&self) -> Vec<f64> {
        self.codes
            .iter()
            .map(|c| c.map_or(f64::NAN, |i| self.scale.label(i)))
            .collect()
    }
}

/// Ordered bin centers of every binned variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BinTable {
    scales: BTreeMap<Variable, BinScale>,
}

impl BinTable {
    pub fn insert(&mut self, variable: Variable, scale: BinScale) {
        self.scales.insert(variable, scale);
    }

    pub fn scale(&self, variable: Variable) -> Option<&BinScale> {
        self.scales.get(&variable)
    }

    /// Bin centers of a variable.
    pub fn centers(&self, variable: Variable) -> MetoceanResult<Vec<f64>> {
        self.scale(variable)
            .map(BinScale::centers)
            .ok_or(MetoceanError::MissingColumn(variable))
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.scales.keys().copied()
    }
}

/// Variables to discretise for a configuration, in a stable order.
pub fn discretisation_plan(config: &ReportConfig) -> Vec<(Variable, Discretisation)> {
    let mut plan = Vec::new();
    if let Some(wind) = &config.wind {
        plan.push((Variable::WindSpeed, Discretisation::Bins(wind.bin_size)));
        plan.push((Variable::WindDirection, Discretisation::Sectors(wind.sectors)));
        if wind.ten_metre {
            plan.push((Variable::WindSpeed10m, Discretisation::Bins(wind.bin_size)));
            plan.push((Variable::WindDirection10m, Discretisation::Sectors(wind.sectors)));
        }
    }
    if let Some(wave) = &config.wave {
        let components: &[SeaComponent] = if wave.spectral {
            &SeaComponent::ALL
        } else {
            &[SeaComponent::Total]
        };
        for component in components {
            plan.push((component.hs(), Discretisation::Bins(wave.height_bin_size)));
            plan.push((component.tp(), Discretisation::Bins(wave.period_bin_size)));
            plan.push((component.tz(), Discretisation::Bins(wave.period_bin_size)));
            plan.push((component.direction(), Discretisation::Sectors(wave.sectors)));
        }
    }
    if let Some(current) = &config.current {
        let mut groups = vec![(
            Variable::SurfaceCurrent,
            Variable::DepthAveragedCurrent,
            Variable::CurrentDirection,
        )];
        if current.components {
            groups.push((
                Variable::SurfaceCurrentTidal,
                Variable::DepthAveragedCurrentTidal,
                Variable::CurrentDirectionTidal,
            ));
            groups.push((
                Variable::SurfaceCurrentResidual,
                Variable::DepthAveragedCurrentResidual,
                Variable::CurrentDirectionResidual,
            ));
        }
        for (surface, depth_averaged, direction) in groups {
            plan.push((surface, Discretisation::Bins(current.bin_size)));
            plan.push((depth_averaged, Discretisation::Bins(current.bin_size)));
            plan.push((direction, Discretisation::Sectors(current.sectors)));
        }
    }
    plan
}

/// Discretise one variable of the dataset.
pub fn discretise(
    observations: &ObservationSet,
    variable: Variable,
    how: Discretisation,
    closure: BinClosure,
) -> MetoceanResult<DiscreteColumn> {
    let values = observations.column(variable)?;
    let scale = match how {
        Discretisation::Bins(width) => {
            Scale::Bins(BinScale::from_max(observations.max(variable)?, width, closure)?)
        }
        Discretisation::Sectors(count) => Scale::Sectors(SectorScale::new(count, closure)?),
    };
    Ok(DiscreteColumn::from_values(variable, values, scale))
}

/// Discretise every planned variable, in parallel.
pub fn discretise_all(
    observations: &ObservationSet,
    plan: &[(Variable, Discretisation)],
    closure: BinClosure,
) -> MetoceanResult<(BTreeMap<Variable, DiscreteColumn>, BinTable)> {
    let columns: Vec<DiscreteColumn> = plan
        .par_iter()
        .map(|(variable, how)| discretise(observations, *variable, *how, closure))
        .collect::<MetoceanResult<_>>()?;

    let mut bins = BinTable::default();
    let mut discrete = BTreeMap::new();
    for column in columns {
        if let Scale::Bins(scale) = column.scale {
            bins.insert(column.variable, scale);
        }
        discrete.insert(column.variable, column);
    }
    Ok((discrete, bins))
}
