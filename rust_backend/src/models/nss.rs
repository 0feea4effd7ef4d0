use serde::{Deserialize, Serialize};

use crate::core::SeaComponent;

/// Aggregate of one (wind sector, wave sector, speed bin) cell.
///
/// All four values are `NaN` when no observation falls in the cell. `gamma`
/// is also `NaN` when the dataset carries no peak enhancement factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NssCell {
    pub hs: f64,
    pub tp: f64,
    pub gamma: f64,
    pub probability: f64,
}

impl NssCell {
    pub const EMPTY: NssCell = NssCell {
        hs: f64::NAN,
        tp: f64::NAN,
        gamma: f64::NAN,
        probability: f64::NAN,
    };

    pub fn is_empty(&self) -> bool {
        self.probability.is_nan()
    }
}

impl Default for NssCell {
    fn default() -> Self {
        NssCell::EMPTY
    }
}

/// NSS grid of one sea component, indexed `[wind sector][wave sector][speed bin]`.
///
/// Sector 0 on either axis is the omnidirectional aggregate. The swell grid
/// has a single wind sector (omni) since swell does not depend on the local
/// wind direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NssTable {
    pub component: SeaComponent,
    pub cells: Vec<Vec<Vec<NssCell>>>,
}

impl NssTable {
    pub fn empty(
        component: SeaComponent,
        wind_sectors: usize,
        wave_sectors: usize,
        speed_bins: usize,
    ) -> Self {
        NssTable {
            component,
            cells: vec![vec![vec![NssCell::EMPTY; speed_bins]; wave_sectors + 1]; wind_sectors + 1],
        }
    }

    /// Number of wind sectors, omni excluded.
    pub fn wind_sectors(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Number of wave sectors, omni excluded.
    pub fn wave_sectors(&self) -> usize {
        self.cells.first().map_or(0, |w| w.len().saturating_sub(1))
    }

    pub fn speed_bins(&self) -> usize {
        self.cells
            .first()
            .and_then(|w| w.first())
            .map_or(0, Vec::len)
    }

    pub fn get(&self, wind_sector: usize, wave_sector: usize, speed_bin: usize) -> Option<&NssCell> {
        self.cells.get(wind_sector)?.get(wave_sector)?.get(speed_bin)
    }

    /// Column of cells over the speed bins for one sector pair.
    pub fn column(&self, wind_sector: usize, wave_sector: usize) -> Option<&[NssCell]> {
        self.cells
            .get(wind_sector)?
            .get(wave_sector)
            .map(Vec::as_slice)
    }
}

/// NSS grids of a report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NssTables {
    pub total: NssTable,
    pub wind: Option<NssTable>,
    pub swell: Option<NssTable>,
}

impl NssTables {
    /// Grids in workbook order: total, wind sea, swell.
    pub fn iter(&self) -> impl Iterator<Item = &NssTable> {
        std::iter::once(&self.total)
            .chain(self.wind.as_ref())
            .chain(self.swell.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_shape() {
        let table = NssTable::empty(SeaComponent::Total, 12, 8, 20);
        assert_eq!(table.wind_sectors(), 12);
        assert_eq!(table.wave_sectors(), 8);
        assert_eq!(table.speed_bins(), 20);
        assert!(table.get(12, 8, 19).unwrap().is_empty());
        assert!(table.get(13, 0, 0).is_none());
    }

    #[test]
    fn test_iter_order() {
        let tables = NssTables {
            total: NssTable::empty(SeaComponent::Total, 1, 1, 1),
            wind: Some(NssTable::empty(SeaComponent::WindSea, 1, 1, 1)),
            swell: Some(NssTable::empty(SeaComponent::Swell, 0, 1, 1)),
        };
        let order: Vec<SeaComponent> = tables.iter().map(|t| t.component).collect();
        assert_eq!(
            order,
            vec![SeaComponent::Total, SeaComponent::WindSea, SeaComponent::Swell]
        );
    }
}
