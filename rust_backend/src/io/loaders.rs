use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::core::{ObservationSet, SeaComponent, Variable};
use crate::error::MetoceanResult;
use crate::parsing::timeseries::{self, ColumnLayout};

/// Input data sources of a report run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Wind,
    Wave,
    Current,
    Water,
}

impl DataSource {
    pub const ALL: [DataSource; 4] = [
        DataSource::Wind,
        DataSource::Wave,
        DataSource::Current,
        DataSource::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DataSource::Wind => "wind",
            DataSource::Wave => "wave",
            DataSource::Current => "current",
            DataSource::Water => "seawater",
        }
    }

    /// Configured data file, `None` when the source is disabled.
    pub fn file(self, config: &ReportConfig) -> Option<&Path> {
        match self {
            DataSource::Wind => config.wind.as_ref().map(|s| s.file.as_path()),
            DataSource::Wave => config.wave.as_ref().map(|s| s.file.as_path()),
            DataSource::Current => config.current.as_ref().map(|s| s.file.as_path()),
            DataSource::Water => config.water.as_ref().map(|s| s.file.as_path()),
        }
    }

    /// Column layout implied by the source toggles, `None` when disabled.
    pub fn layout(self, config: &ReportConfig) -> Option<ColumnLayout> {
        match self {
            DataSource::Wind => config.wind.as_ref().map(|wind| {
                let mut columns = vec![
                    Variable::WindSpeed,
                    Variable::WindDirection,
                    Variable::AirTemperature,
                    Variable::AirDensity,
                ];
                if wind.ten_metre {
                    columns.extend([
                        Variable::WindSpeed10m,
                        Variable::WindDirection10m,
                        Variable::AirTemperature10m,
                        Variable::AirDensity10m,
                    ]);
                }
                ColumnLayout::new(
                    columns,
                    format!("wind data with 10m = {}", wind.ten_metre),
                )
            }),
            DataSource::Wave => config.wave.as_ref().map(|wave| {
                let components: &[SeaComponent] = if wave.spectral {
                    &SeaComponent::ALL
                } else {
                    &[SeaComponent::Total]
                };
                let mut columns = Vec::new();
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
                ColumnLayout::new(
                    columns,
                    format!(
                        "wave data with spectral components = {} and peak enhancement factor = {}",
                        wave.spectral, wave.peak_enhancement
                    ),
                )
            }),
            DataSource::Current => config.current.as_ref().map(|current| {
                let mut columns = vec![
                    Variable::SurfaceCurrent,
                    Variable::DepthAveragedCurrent,
                    Variable::CurrentDirection,
                ];
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
                ColumnLayout::new(
                    columns,
                    format!("current data with components = {}", current.components),
                )
            }),
            DataSource::Water => config.water.as_ref().map(|_| {
                ColumnLayout::new(
                    vec![
                        Variable::Salinity,
                        Variable::SeaSurfaceTemperature,
                        Variable::WaterDensity,
                    ],
                    "seawater data",
                )
            }),
        }
    }
}

/// Result of loading one source file
#[derive(Debug)]
pub struct SourceLoadResult {
    pub source: DataSource,
    pub path: PathBuf,
    pub observations: ObservationSet,
    pub num_rows: usize,
}

impl SourceLoadResult {
    pub fn new(source: DataSource, path: PathBuf, observations: ObservationSet) -> Self {
        let num_rows = observations.height();
        Self {
            source,
            path,
            observations,
            num_rows,
        }
    }
}

/// Loads the configured data files
pub struct SourceLoader;

impl SourceLoader {
    /// Load one source. Returns `None` when the source is disabled.
    pub fn load(source: DataSource, config: &ReportConfig) -> MetoceanResult<Option<SourceLoadResult>> {
        let (Some(file), Some(layout)) = (source.file(config), source.layout(config)) else {
            return Ok(None);
        };
        let path = config.resolve(file);
        log::info!("Parsing {} data from {}", source.name(), path.display());

        let observations = timeseries::parse_timeseries_file(&path, &layout)?;
        log::debug!(
            "Parsed {} rows x {} columns of {} data",
            observations.height(),
            layout.columns.len(),
            source.name()
        );
        Ok(Some(SourceLoadResult::new(source, path, observations)))
    }

    /// Load every enabled source, in wind, wave, current, water order.
    pub fn load_all(config: &ReportConfig) -> MetoceanResult<Vec<SourceLoadResult>> {
        let mut loaded = Vec::new();
        for source in DataSource::ALL {
            if let Some(result) = Self::load(source, config)? {
                loaded.push(result);
            }
        }
        Ok(loaded)
    }

    /// Load every enabled source and join them on the overlapping period.
    pub fn load_joined(config: &ReportConfig) -> MetoceanResult<ObservationSet> {
        let loaded = Self::load_all(config)?;
        let sources = loaded.len();
        let joined =
            ObservationSet::inner_join(loaded.into_iter().map(|r| r.observations).collect())?;
        log::info!(
            "Joined {} sources into {} synchronised rows",
            sources,
            joined.height()
        );
        Ok(joined)
    }
}
