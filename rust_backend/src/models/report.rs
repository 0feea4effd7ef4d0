use serde::Serialize;

use super::nss::{NssCell, NssTable};
use super::scatter::ScatterTable;
use crate::algorithms::{round4, BinScale};
use crate::core::SeaComponent;

/// A report rendered to one workbook.
pub trait Workbook {
    /// File name of the workbook, e.g. `Demo_Metocean_NSS_Tables.xlsx`.
    fn workbook_name(&self) -> &str;
}

/// Column headers of every NSS block.
pub const NSS_COLUMN_HEADERS: [&str; 4] = ["Hs [m]", "Tp [s]", "γ [-]", "Prob [%]"];

/// Lower/middle/upper values of the wind speed bins printed beside each
/// row of NSS blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinBoundsTable {
    pub title: String,
    pub headers: [String; 3],
    pub lower: Vec<f64>,
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BinBoundsTable {
    pub fn new(title: impl Into<String>, scale: &BinScale) -> Self {
        let (lower_header, upper_header) = scale.closure().bound_headers();
        let half = scale.width() / 2.0;
        let middle = scale.centers();
        BinBoundsTable {
            title: title.into(),
            headers: [
                lower_header.to_string(),
                "Middle".to_string(),
                upper_header.to_string(),
            ],
            lower: middle.iter().map(|c| round4(c - half)).collect(),
            upper: middle.iter().map(|c| round4(c + half)).collect(),
            middle,
        }
    }
}

/// One labelled NSS table: a sector pair and its cells over the speed bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NssBlock {
    /// `Table {sheet}.{wind}.{wave}`
    pub label: String,
    /// `None` is the omnidirectional aggregate.
    pub wind_sector: Option<u32>,
    pub wave_sector: Option<u32>,
    pub cells: Vec<NssCell>,
}

/// One worksheet of the NSS workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NssSheet {
    pub name: String,
    pub number: u32,
    pub component: SeaComponent,
    pub column_headers: [&'static str; 4],
    /// Rows of blocks: omni/omni, wind sectors, wave sectors, then one row per
    /// wind sector across the wave sectors.
    pub rows: Vec<Vec<NssBlock>>,
}

impl NssSheet {
    pub fn from_table(table: &NssTable) -> Self {
        let (name, number) = table.component.nss_sheet();
        let block = |w: usize, v: usize| NssBlock {
            label: format!("Table {}.{}.{}", number, w, v),
            wind_sector: (w > 0).then_some(w as u32),
            wave_sector: (v > 0).then_some(v as u32),
            cells: table.column(w, v).map(<[NssCell]>::to_vec).unwrap_or_default(),
        };
        let wind = table.wind_sectors();
        let wave = table.wave_sectors();

        let mut rows = vec![vec![block(0, 0)]];
        rows.push((1..=wind).map(|w| block(w, 0)).collect());
        rows.push((1..=wave).map(|v| block(0, v)).collect());
        for w in 1..=wind {
            rows.push((1..=wave).map(|v| block(w, v)).collect());
        }
        rows.retain(|r| !r.is_empty());

        NssSheet {
            name: name.to_string(),
            number,
            component: table.component,
            column_headers: NSS_COLUMN_HEADERS,
            rows,
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = &NssBlock> {
        self.rows.iter().flatten()
    }
}

/// NSS workbook content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NssReport {
    pub project: String,
    pub workbook: String,
    pub speed_bins: BinBoundsTable,
    pub sheets: Vec<NssSheet>,
}

impl Workbook for NssReport {
    fn workbook_name(&self) -> &str {
        &self.workbook
    }
}

/// One worksheet of the scatter workbook: rows of tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSheet {
    pub name: String,
    pub rows: Vec<Vec<ScatterTable>>,
}

impl ScatterSheet {
    pub fn table_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn tables(&self) -> impl Iterator<Item = &ScatterTable> {
        self.rows.iter().flatten()
    }
}

/// Scatter workbook content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterReport {
    pub project: String,
    pub workbook: String,
    pub sheets: Vec<ScatterSheet>,
}

impl ScatterReport {
    pub fn sheet(&self, name: &str) -> Option<&ScatterSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn table_count(&self) -> usize {
        self.sheets.iter().map(ScatterSheet::table_count).sum()
    }
}

impl Workbook for ScatterReport {
    fn workbook_name(&self) -> &str {
        &self.workbook
    }
}
