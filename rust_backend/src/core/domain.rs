//! Domain vocabulary for metocean time series.
//!
//! This module names every measured quantity the engine understands, groups
//! the wave quantities by sea-state component, and groups the wind quantities
//! by measurement level. Column names match the ones used in the input files
//! and in the rendered reports (`WS`, `WnD`, `Hs_W`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A measured (continuous) column of the observation dataset.
///
/// The serialized form is the short column name used by the data files and
/// report headers, e.g. `Variable::HsSwell` ↔ `"Hs_S"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    #[serde(rename = "WS")]
    WindSpeed,
    #[serde(rename = "WnD")]
    WindDirection,
    #[serde(rename = "T")]
    AirTemperature,
    #[serde(rename = "Roh")]
    AirDensity,
    #[serde(rename = "WS_10")]
    WindSpeed10m,
    #[serde(rename = "WnD_10")]
    WindDirection10m,
    #[serde(rename = "T_10")]
    AirTemperature10m,
    #[serde(rename = "Roh_10")]
    AirDensity10m,
    #[serde(rename = "Hs")]
    Hs,
    #[serde(rename = "WvD")]
    WaveDirection,
    #[serde(rename = "Tp")]
    Tp,
    #[serde(rename = "Tz")]
    Tz,
    #[serde(rename = "G")]
    Gamma,
    #[serde(rename = "Hs_W")]
    HsWind,
    #[serde(rename = "WvD_W")]
    WaveDirectionWind,
    #[serde(rename = "Tp_W")]
    TpWind,
    #[serde(rename = "Tz_W")]
    TzWind,
    #[serde(rename = "G_W")]
    GammaWind,
    #[serde(rename = "Hs_S")]
    HsSwell,
    #[serde(rename = "WvD_S")]
    WaveDirectionSwell,
    #[serde(rename = "Tp_S")]
    TpSwell,
    #[serde(rename = "Tz_S")]
    TzSwell,
    #[serde(rename = "G_S")]
    GammaSwell,
    #[serde(rename = "SV")]
    SurfaceCurrent,
    #[serde(rename = "DaV")]
    DepthAveragedCurrent,
    #[serde(rename = "CD")]
    CurrentDirection,
    #[serde(rename = "SV_Tid")]
    SurfaceCurrentTidal,
    #[serde(rename = "DaV_Tid")]
    DepthAveragedCurrentTidal,
    #[serde(rename = "CD_Tid")]
    CurrentDirectionTidal,
    #[serde(rename = "SV_Res")]
    SurfaceCurrentResidual,
    #[serde(rename = "DaV_Res")]
    DepthAveragedCurrentResidual,
    #[serde(rename = "CD_Res")]
    CurrentDirectionResidual,
    #[serde(rename = "Salt")]
    Salinity,
    #[serde(rename = "SST")]
    SeaSurfaceTemperature,
    #[serde(rename = "Roh_W")]
    WaterDensity,
}

impl Variable {
    pub const ALL: [Variable; 35] = [
        Variable::WindSpeed,
        Variable::WindDirection,
        Variable::AirTemperature,
        Variable::AirDensity,
        Variable::WindSpeed10m,
        Variable::WindDirection10m,
        Variable::AirTemperature10m,
        Variable::AirDensity10m,
        Variable::Hs,
        Variable::WaveDirection,
        Variable::Tp,
        Variable::Tz,
        Variable::Gamma,
        Variable::HsWind,
        Variable::WaveDirectionWind,
        Variable::TpWind,
        Variable::TzWind,
        Variable::GammaWind,
        Variable::HsSwell,
        Variable::WaveDirectionSwell,
        Variable::TpSwell,
        Variable::TzSwell,
        Variable::GammaSwell,
        Variable::SurfaceCurrent,
        Variable::DepthAveragedCurrent,
        Variable::CurrentDirection,
        Variable::SurfaceCurrentTidal,
        Variable::DepthAveragedCurrentTidal,
        Variable::CurrentDirectionTidal,
        Variable::SurfaceCurrentResidual,
        Variable::DepthAveragedCurrentResidual,
        Variable::CurrentDirectionResidual,
        Variable::Salinity,
        Variable::SeaSurfaceTemperature,
        Variable::WaterDensity,
    ];

    /// Short column name as it appears in data files and report headers.
    pub fn name(self) -> &'static str {
        match self {
            Variable::WindSpeed => "WS",
            Variable::WindDirection => "WnD",
            Variable::AirTemperature => "T",
            Variable::AirDensity => "Roh",
            Variable::WindSpeed10m => "WS_10",
            Variable::WindDirection10m => "WnD_10",
            Variable::AirTemperature10m => "T_10",
            Variable::AirDensity10m => "Roh_10",
            Variable::Hs => "Hs",
            Variable::WaveDirection => "WvD",
            Variable::Tp => "Tp",
            Variable::Tz => "Tz",
            Variable::Gamma => "G",
            Variable::HsWind => "Hs_W",
            Variable::WaveDirectionWind => "WvD_W",
            Variable::TpWind => "Tp_W",
            Variable::TzWind => "Tz_W",
            Variable::GammaWind => "G_W",
            Variable::HsSwell => "Hs_S",
            Variable::WaveDirectionSwell => "WvD_S",
            Variable::TpSwell => "Tp_S",
            Variable::TzSwell => "Tz_S",
            Variable::GammaSwell => "G_S",
            Variable::SurfaceCurrent => "SV",
            Variable::DepthAveragedCurrent => "DaV",
            Variable::CurrentDirection => "CD",
            Variable::SurfaceCurrentTidal => "SV_Tid",
            Variable::DepthAveragedCurrentTidal => "DaV_Tid",
            Variable::CurrentDirectionTidal => "CD_Tid",
            Variable::SurfaceCurrentResidual => "SV_Res",
            Variable::DepthAveragedCurrentResidual => "DaV_Res",
            Variable::CurrentDirectionResidual => "CD_Res",
            Variable::Salinity => "Salt",
            Variable::SeaSurfaceTemperature => "SST",
            Variable::WaterDensity => "Roh_W",
        }
    }

    /// Looks a variable up by its short column name.
    pub fn from_name(name: &str) -> Option<Variable> {
        Variable::ALL.iter().copied().find(|v| v.name() == name)
    }

    /// Whether the variable is an angle in degrees (sectorised, not binned).
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Variable::WindDirection
                | Variable::WindDirection10m
                | Variable::WaveDirection
                | Variable::WaveDirectionWind
                | Variable::WaveDirectionSwell
                | Variable::CurrentDirection
                | Variable::CurrentDirectionTidal
                | Variable::CurrentDirectionResidual
        )
    }

    /// Name of the discretised column derived from this variable
    /// (`WS_bins`, `WnD_sectors`, ...).
    pub fn discrete_name(self) -> String {
        if self.is_directional() {
            format!("{}_sectors", self.name())
        } else {
            format!("{}_bins", self.name())
        }
    }

    /// Human readable axis title used in scatter table headers.
    pub fn title(self) -> &'static str {
        match self {
            Variable::WindSpeed => "Wind Speed @ Hub Height, [m/s]",
            Variable::WindDirection => "Wind Direction @ Hub Height, [degN]",
            Variable::WindSpeed10m => "Wind Speed @ 10m MSL, [m/s]",
            Variable::WindDirection10m => "Wind Direction @ 10m MSL, [degN]",
            Variable::AirTemperature => "Air Temperature @ Hub Height, [degC]",
            Variable::AirDensity => "Air Density @ Hub Height, [kg/m3]",
            Variable::AirTemperature10m => "Air Temperature @ 10m MSL, [degC]",
            Variable::AirDensity10m => "Air Density @ 10m MSL, [kg/m3]",
            Variable::Hs => "Significant Wave Height (Totalsea), Hm0 [m]",
            Variable::Tp => "Peak Wave Period (Totalsea), Tp [s]",
            Variable::Tz => "Zero-Crossing Period (Totalsea), Tz [s]",
            Variable::WaveDirection => "Mean Wave Direction (Totalsea), [degN]",
            Variable::Gamma => "Peak Enhancement Factor (Totalsea), [-]",
            Variable::HsWind => "Significant Wave height (Windsea), Hm0 [m]",
            Variable::TpWind => "Peak Wave Period (Windsea), Tp [s]",
            Variable::TzWind => "Zero-Crossing Wave Period (Windsea), Tz [s]",
            Variable::WaveDirectionWind => "Mean Wave Direction (Windsea), [degN]",
            Variable::GammaWind => "Peak Enhancement Factor (Windsea), [-]",
            Variable::HsSwell => "Significant Wave Height (Swell), Hm0 [m]",
            Variable::TpSwell => "Peak Wave Period (Swell), Tp [s]",
            Variable::TzSwell => "Zero-Crossing Wave Period (Swell), Tz [s]",
            Variable::WaveDirectionSwell => "Mean Wave Direction (Swell), [degN]",
            Variable::GammaSwell => "Peak Enhancement Factor (Swell), [-]",
            Variable::SurfaceCurrent => "Current Surface Speed (Total), [m/s]",
            Variable::DepthAveragedCurrent => "Current Depth Averaged Speed (Total), [m/s]",
            Variable::CurrentDirection => "Mean Current Direction (Total), [DegN, going]",
            Variable::SurfaceCurrentTidal => "Current Surface Speed (Tidal), [m/s]",
            Variable::DepthAveragedCurrentTidal => "Current Depth Averaged Speed (Tidal), [m/s]",
            Variable::CurrentDirectionTidal => "Mean Current Direction (Tidal), [degN, going]",
            Variable::SurfaceCurrentResidual => "Current Surface Speed (Residual), [m/s]",
            Variable::DepthAveragedCurrentResidual => {
                "Current Depth Averaged Speed (Residual), [m/s]"
            }
            Variable::CurrentDirectionResidual => {
                "Mean Current Direction (Residual), [degN, going]"
            }
            Variable::Salinity => "Salinity, [PSU]",
            Variable::SeaSurfaceTemperature => "Sea Surface Temperature, [degC]",
            Variable::WaterDensity => "Seawater Density, [kg/m3]",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spectral decomposition of the sea state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeaComponent {
    Total,
    WindSea,
    Swell,
}

impl SeaComponent {
    pub const ALL: [SeaComponent; 3] = [SeaComponent::Total, SeaComponent::WindSea, SeaComponent::Swell];

    pub fn hs(self) -> Variable {
        match self {
            SeaComponent::Total => Variable::Hs,
            SeaComponent::WindSea => Variable::HsWind,
            SeaComponent::Swell => Variable::HsSwell,
        }
    }

    pub fn tp(self) -> Variable {
        match self {
            SeaComponent::Total => Variable::Tp,
            SeaComponent::WindSea => Variable::TpWind,
            SeaComponent::Swell => Variable::TpSwell,
        }
    }

    pub fn tz(self) -> Variable {
        match self {
            SeaComponent::Total => Variable::Tz,
            SeaComponent::WindSea => Variable::TzWind,
            SeaComponent::Swell => Variable::TzSwell,
        }
    }

    pub fn direction(self) -> Variable {
        match self {
            SeaComponent::Total => Variable::WaveDirection,
            SeaComponent::WindSea => Variable::WaveDirectionWind,
            SeaComponent::Swell => Variable::WaveDirectionSwell,
        }
    }

    pub fn gamma(self) -> Variable {
        match self {
            SeaComponent::Total => Variable::Gamma,
            SeaComponent::WindSea => Variable::GammaWind,
            SeaComponent::Swell => Variable::GammaSwell,
        }
    }

    /// Label used in scatter sheet names (`Totalsea`, `Windsea`, `Swell`).
    pub fn label(self) -> &'static str {
        match self {
            SeaComponent::Total => "Totalsea",
            SeaComponent::WindSea => "Windsea",
            SeaComponent::Swell => "Swell",
        }
    }

    /// Sheet name and table-number prefix of the NSS workbook.
    pub fn nss_sheet(self) -> (&'static str, u32) {
        match self {
            SeaComponent::Total => ("NSS Total sea", 1),
            SeaComponent::WindSea => ("NSS Wind sea", 2),
            SeaComponent::Swell => ("NSS Swell sea", 3),
        }
    }
}

/// Height at which the wind was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindLevel {
    HubHeight,
    TenMetre,
}

impl WindLevel {
    pub fn speed(self) -> Variable {
        match self {
            WindLevel::HubHeight => Variable::WindSpeed,
            WindLevel::TenMetre => Variable::WindSpeed10m,
        }
    }

    pub fn direction(self) -> Variable {
        match self {
            WindLevel::HubHeight => Variable::WindDirection,
            WindLevel::TenMetre => Variable::WindDirection10m,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            WindLevel::HubHeight => "@HH",
            WindLevel::TenMetre => "@10m",
        }
    }
}
