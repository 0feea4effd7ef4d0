use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of a bin (or sector) boundary is closed.
///
/// `Left` bins are `[lower, upper)`, `Right` bins are `(lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinClosure {
    #[default]
    Left,
    Right,
}

impl BinClosure {
    /// Parse a closure name, falling back to `Left` on anything unknown.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            log::warn!("{}; using bin_type = left", e);
            BinClosure::Left
        })
    }

    /// Header labels for the lower and upper bound columns of a table.
    pub fn bound_headers(self) -> (&'static str, &'static str) {
        match self {
            BinClosure::Left => ("Lower (>=)", "Upper (<)"),
            BinClosure::Right => ("Lower (>)", "Upper (<=)"),
        }
    }
}

impl FromStr for BinClosure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(BinClosure::Left),
            "right" => Ok(BinClosure::Right),
            other => Err(format!("Unknown bin_type: {:?}", other)),
        }
    }
}

impl fmt::Display for BinClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinClosure::Left => f.write_str("left"),
            BinClosure::Right => f.write_str("right"),
        }
    }
}

/// Central-tendency reducer applied inside each NSS cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    Mean,
    #[default]
    Median,
}

impl Reducer {
    /// Parse a method name, falling back to `Median` on anything unknown.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            log::warn!("{}; using method = median", e);
            Reducer::Median
        })
    }
}

impl FromStr for Reducer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Reducer::Mean),
            "median" => Ok(Reducer::Median),
            other => Err(format!("Unknown method: {:?}", other)),
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reducer::Mean => f.write_str("mean"),
            Reducer::Median => f.write_str("median"),
        }
    }
}

/// Feature toggles of a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Wind,
    WindAt10m,
    Wave,
    WaveSpectral,
    PeakEnhancement,
    DerivePeakEnhancement,
    Current,
    CurrentComponents,
    Water,
    NssReport,
    ScatterReport,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::Wind,
        Capability::WindAt10m,
        Capability::Wave,
        Capability::WaveSpectral,
        Capability::PeakEnhancement,
        Capability::DerivePeakEnhancement,
        Capability::Current,
        Capability::CurrentComponents,
        Capability::Water,
        Capability::NssReport,
        Capability::ScatterReport,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of enabled [`Capability`] toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet(u16);

impl CapabilitySet {
    pub fn empty() -> Self {
        CapabilitySet(0)
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn contains_all(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|c| self.contains(*c))
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = CapabilitySet::empty();
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}
