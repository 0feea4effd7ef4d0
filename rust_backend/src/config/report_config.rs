//! Report configuration file support.
//!
//! This module reads the run configuration from a TOML file and turns it into
//! an immutable [`ReportConfig`]. Sections that are absent or disabled switch
//! the matching data source off; the enabled sources and toggles are exposed
//! as a [`CapabilitySet`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::options::{BinClosure, Capability, CapabilitySet, Reducer};
use crate::error::{MetoceanError, MetoceanResult};

/// Constant peak enhancement factor assigned to swell when it is derived.
pub const DEFAULT_SWELL_PEAK_ENHANCEMENT: f64 = 10.0;

/// Configuration file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    project: String,
    #[serde(default)]
    bin_type: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default = "default_true")]
    nss_report: bool,
    #[serde(default = "default_true")]
    scatter_report: bool,
    #[serde(default)]
    wind: Option<WindSettings>,
    #[serde(default)]
    wave: Option<WaveSettings>,
    #[serde(default)]
    current: Option<CurrentSettings>,
    #[serde(default)]
    water: Option<WaterSettings>,
}

/// Location metadata attached to a data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub projection: Option<String>,
    #[serde(default)]
    pub easting: Option<f64>,
    #[serde(default)]
    pub northing: Option<f64>,
}

/// Wind data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_wind_file")]
    pub file: PathBuf,
    #[serde(flatten)]
    pub metadata: SourceMetadata,
    #[serde(default)]
    pub hub_height: Option<f64>,
    #[serde(default)]
    pub hub_weibull_a: Option<f64>,
    #[serde(default)]
    pub hub_weibull_k: Option<f64>,
    /// Whether the file also carries the 10 m MSL wind columns.
    #[serde(default, alias = "10m")]
    pub ten_metre: bool,
    pub bin_size: f64,
    pub sectors: u32,
}

/// Wave data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_wave_file")]
    pub file: PathBuf,
    #[serde(flatten)]
    pub metadata: SourceMetadata,
    /// Wind-sea and swell components present in the file.
    #[serde(default)]
    pub spectral: bool,
    /// Measured peak enhancement factor present in the file.
    #[serde(default)]
    pub peak_enhancement: bool,
    #[serde(default)]
    pub derive_peak_enhancement: bool,
    pub height_bin_size: f64,
    pub period_bin_size: f64,
    pub sectors: u32,
    #[serde(default = "default_swell_peak_enhancement")]
    pub swell_peak_enhancement: f64,
}

/// Current data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_current_file")]
    pub file: PathBuf,
    #[serde(flatten)]
    pub metadata: SourceMetadata,
    /// Tidal and residual components present in the file.
    #[serde(default)]
    pub components: bool,
    pub bin_size: f64,
    pub sectors: u32,
}

/// Seawater data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_water_file")]
    pub file: PathBuf,
    #[serde(flatten)]
    pub metadata: SourceMetadata,
}

fn default_true() -> bool {
    true
}

fn default_wind_file() -> PathBuf {
    PathBuf::from("wind_data.txt")
}

fn default_wave_file() -> PathBuf {
    PathBuf::from("wave_data.txt")
}

fn default_current_file() -> PathBuf {
    PathBuf::from("current_data.txt")
}

fn default_water_file() -> PathBuf {
    PathBuf::from("water_data.txt")
}

fn default_swell_peak_enhancement() -> f64 {
    DEFAULT_SWELL_PEAK_ENHANCEMENT
}

impl WindSettings {
    pub fn new(bin_size: f64, sectors: u32) -> Self {
        Self {
            enabled: true,
            file: default_wind_file(),
            metadata: SourceMetadata::default(),
            hub_height: None,
            hub_weibull_a: None,
            hub_weibull_k: None,
            ten_metre: false,
            bin_size,
            sectors,
        }
    }
}

impl WaveSettings {
    pub fn new(height_bin_size: f64, period_bin_size: f64, sectors: u32) -> Self {
        Self {
            enabled: true,
            file: default_wave_file(),
            metadata: SourceMetadata::default(),
            spectral: false,
            peak_enhancement: false,
            derive_peak_enhancement: false,
            height_bin_size,
            period_bin_size,
            sectors,
            swell_peak_enhancement: DEFAULT_SWELL_PEAK_ENHANCEMENT,
        }
    }
}

impl CurrentSettings {
    pub fn new(bin_size: f64, sectors: u32) -> Self {
        Self {
            enabled: true,
            file: default_current_file(),
            metadata: SourceMetadata::default(),
            components: false,
            bin_size,
            sectors,
        }
    }
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_water_file(),
            metadata: SourceMetadata::default(),
        }
    }
}

/// Immutable configuration of one report run.
///
/// Disabled sections are stored as `None`, so `wind.is_some()` is the same as
/// `capabilities().contains(Capability::Wind)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub project: String,
    pub bin_type: BinClosure,
    pub method: Reducer,
    pub nss_report: bool,
    pub scatter_report: bool,
    pub wind: Option<WindSettings>,
    pub wave: Option<WaveSettings>,
    pub current: Option<CurrentSettings>,
    pub water: Option<WaterSettings>,
    base_dir: PathBuf,
}

impl ReportConfig {
    /// Create a configuration with every data source disabled.
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            bin_type: BinClosure::default(),
            method: Reducer::default(),
            nss_report: true,
            scatter_report: true,
            wind: None,
            wave: None,
            current: None,
            water: None,
            base_dir: PathBuf::from("."),
        }
    }

    pub fn with_bin_type(mut self, bin_type: BinClosure) -> Self {
        self.bin_type = bin_type;
        self
    }

    pub fn with_method(mut self, method: Reducer) -> Self {
        self.method = method;
        self
    }

    pub fn with_wind(mut self, wind: WindSettings) -> Self {
        self.wind = Some(wind).filter(|w| w.enabled);
        self
    }

    pub fn with_wave(mut self, wave: WaveSettings) -> Self {
        self.wave = Some(wave).filter(|w| w.enabled);
        self
    }

    pub fn with_current(mut self, current: CurrentSettings) -> Self {
        self.current = Some(current).filter(|c| c.enabled);
        self
    }

    pub fn with_water(mut self, water: WaterSettings) -> Self {
        self.water = Some(water).filter(|w| w.enabled);
        self
    }

    /// Load the configuration from a TOML file.
    ///
    /// Relative data file paths are resolved against the directory holding
    /// the configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> MetoceanResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MetoceanError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = parent.to_path_buf();
        }
        Ok(config)
    }

    /// Parse the configuration from TOML text.
    pub fn from_toml_str(content: &str) -> MetoceanResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let file: ConfigFile = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            MetoceanError::Configuration(format!(
                "Failed to parse config at '{}': {}",
                e.path(),
                e.inner()
            ))
        })?;

        let config = ReportConfig {
            project: file.project,
            bin_type: file
                .bin_type
                .as_deref()
                .map(BinClosure::parse_or_default)
                .unwrap_or_default(),
            method: file
                .method
                .as_deref()
                .map(Reducer::parse_or_default)
                .unwrap_or_default(),
            nss_report: file.nss_report,
            scatter_report: file.scatter_report,
            wind: file.wind.filter(|w| w.enabled),
            wave: file.wave.filter(|w| w.enabled),
            current: file.current.filter(|c| c.enabled),
            water: file.water.filter(|w| w.enabled),
            base_dir: PathBuf::from("."),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that have no safe default.
    pub fn validate(&self) -> MetoceanResult<()> {
        if self.project.trim().is_empty() {
            return Err(MetoceanError::Configuration(
                "'project' must not be empty".to_string(),
            ));
        }
        if let Some(wind) = &self.wind {
            check_bin_size("wind.bin_size", wind.bin_size)?;
            check_sectors("wind.sectors", wind.sectors)?;
        }
        if let Some(wave) = &self.wave {
            check_bin_size("wave.height_bin_size", wave.height_bin_size)?;
            check_bin_size("wave.period_bin_size", wave.period_bin_size)?;
            check_sectors("wave.sectors", wave.sectors)?;
        }
        if let Some(current) = &self.current {
            check_bin_size("current.bin_size", current.bin_size)?;
            check_sectors("current.sectors", current.sectors)?;
        }
        Ok(())
    }

    /// Enabled toggles of this run.
    pub fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::empty();
        if self.nss_report {
            set.insert(Capability::NssReport);
        }
        if self.scatter_report {
            set.insert(Capability::ScatterReport);
        }
        if let Some(wind) = &self.wind {
            set.insert(Capability::Wind);
            if wind.ten_metre {
                set.insert(Capability::WindAt10m);
            }
        }
        if let Some(wave) = &self.wave {
            set.insert(Capability::Wave);
            if wave.spectral {
                set.insert(Capability::WaveSpectral);
            }
            if wave.peak_enhancement {
                set.insert(Capability::PeakEnhancement);
            }
            if wave.derive_peak_enhancement {
                set.insert(Capability::DerivePeakEnhancement);
            }
        }
        if let Some(current) = &self.current {
            set.insert(Capability::Current);
            if current.components {
                set.insert(Capability::CurrentComponents);
            }
        }
        if self.water.is_some() {
            set.insert(Capability::Water);
        }
        set
    }

    /// Resolve a data file path against the configuration directory.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.base_dir.join(file)
        }
    }

    /// Workbook name of the NSS report.
    pub fn nss_workbook_name(&self) -> String {
        format!("{}_Metocean_NSS_Tables.xlsx", self.project)
    }

    /// Workbook name of the scatter report.
    pub fn scatter_workbook_name(&self) -> String {
        format!("{}_Metocean_Scatter_Tables.xlsx", self.project)
    }
}

fn check_bin_size(key: &str, value: f64) -> MetoceanResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MetoceanError::Configuration(format!(
            "'{}' must be a positive number, got {}",
            key, value
        )))
    }
}

fn check_sectors(key: &str, value: u32) -> MetoceanResult<()> {
    if value == 0 {
        Err(MetoceanError::Configuration(format!(
            "'{}' must be at least 1",
            key
        )))
    } else {
        Ok(())
    }
}
