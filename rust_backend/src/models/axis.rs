use serde::{Deserialize, Serialize};

use crate::algorithms::{BinScale, SectorScale};
use crate::config::BinClosure;
use crate::core::Variable;

/// Discretisation of one variable: speed/height/period bins or compass
/// sectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scale {
    Bins(BinScale),
    Sectors(SectorScale),
}

impl Scale {
    pub fn len(&self) -> usize {
        match self {
            Scale::Bins(s) => s.len(),
            Scale::Sectors(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn closure(&self) -> BinClosure {
        match self {
            Scale::Bins(s) => s.closure(),
            Scale::Sectors(s) => s.closure(),
        }
    }

    /// Zero-based axis position of a raw value.
    pub fn index(&self, value: f64) -> Option<u32> {
        match self {
            Scale::Bins(s) => s.index(value),
            Scale::Sectors(s) => s.index(value),
        }
    }

    /// Axis labels: bin centers, or sector numbers `1..=N`.
    pub fn labels(&self) -> Vec<f64> {
        match self {
            Scale::Bins(s) => s.centers(),
            Scale::Sectors(s) => s.labels(),
        }
    }

    /// Label of the axis position `index`.
    pub fn label(&self, index: u32) -> f64 {
        match self {
            Scale::Bins(s) => s.center(index),
            Scale::Sectors(_) => f64::from(index + 1),
        }
    }

    /// Resolve a label (bin center or sector number) to its axis position.
    ///
    /// Bin centers are matched at 4-decimal precision.
    pub fn position_of(&self, label: f64) -> Option<u32> {
        match self {
            Scale::Bins(s) => s.position_of(label),
            Scale::Sectors(s) => {
                let sector = label.round();
                if (label - sector).abs() < 1e-9 && sector >= 1.0 && sector <= s.count() as f64 {
                    Some(sector as u32 - 1)
                } else {
                    None
                }
            }
        }
    }

    /// Lower and upper bounds of every axis position.
    pub fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        match self {
            Scale::Bins(s) => (0..s.len() as u32).map(|i| s.bounds(i)).unzip(),
            Scale::Sectors(s) => (1..=s.count()).map(|i| s.bounds(i)).unzip(),
        }
    }
}

/// Presentation descriptor of a table axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub variable: Variable,
    /// Discretised column name, e.g. `Hs_bins`.
    pub column: String,
    pub title: String,
    pub labels: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower_header: String,
    pub upper_header: String,
}

impl Axis {
    pub fn new(variable: Variable, scale: &Scale) -> Self {
        let (lower, upper) = scale.bounds();
        let (lower_header, upper_header) = scale.closure().bound_headers();
        Axis {
            variable,
            column: variable.discrete_name(),
            title: variable.title().to_string(),
            labels: scale.labels(),
            lower,
            upper,
            lower_header: lower_header.to_string(),
            upper_header: upper_header.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_axis() {
        let scale = Scale::Bins(BinScale::new(0.5, 3, BinClosure::Right).unwrap());
        let axis = Axis::new(Variable::Hs, &scale);
        assert_eq!(axis.column, "Hs_bins");
        assert_eq!(axis.labels, vec![0.25, 0.75, 1.25]);
        assert_eq!(axis.lower, vec![0.0, 0.5, 1.0]);
        assert_eq!(axis.upper, vec![0.5, 1.0, 1.5]);
        assert_eq!(axis.lower_header, "Lower (>)");
    }

    #[test]
    fn test_sector_axis() {
        let scale = Scale::Sectors(SectorScale::new(4, BinClosure::Left).unwrap());
        let axis = Axis::new(Variable::WindDirection, &scale);
        assert_eq!(axis.column, "WnD_sectors");
        assert_eq!(axis.labels, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(axis.lower, vec![315.0, 45.0, 135.0, 225.0]);
        assert_eq!(axis.upper, vec![45.0, 135.0, 225.0, 315.0]);
    }

    #[test]
    fn test_position_of_label() {
        let sectors = Scale::Sectors(SectorScale::new(12, BinClosure::Left).unwrap());
        assert_eq!(sectors.position_of(1.0), Some(0));
        assert_eq!(sectors.position_of(12.0), Some(11));
        assert_eq!(sectors.position_of(13.0), None);
        assert_eq!(sectors.position_of(1.5), None);

        let bins = Scale::Bins(BinScale::new(5.0, 4, BinClosure::Left).unwrap());
        assert_eq!(bins.position_of(7.5), Some(1));
        assert_eq!(bins.position_of(8.0), None);
    }
}
