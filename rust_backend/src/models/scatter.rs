use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use super::axis::Axis;
use crate::algorithms::nan_sum;
use crate::core::Variable;

/// Equality filter on a discretised column.
///
/// `value` is a sector number for directional variables and a bin center
/// otherwise. A value of 0 is "no filter".
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct ScatterFilter {
    pub variable: Variable,
    pub value: f64,
}

impl ScatterFilter {
    pub fn new(variable: Variable, value: f64) -> Self {
        ScatterFilter { variable, value }
    }

    pub fn is_active(&self) -> bool {
        self.value != 0.0 && !self.value.is_nan()
    }
}

/// A scatter table to build: `x` across the columns, `y` down the rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct ScatterRequest {
    pub x: Variable,
    pub y: Variable,
    #[serde(default)]
    pub filters: Vec<ScatterFilter>,
}

impl ScatterRequest {
    pub fn new(x: Variable, y: Variable) -> Self {
        ScatterRequest {
            x,
            y,
            filters: Vec::new(),
        }
    }

    pub fn filtered(mut self, variable: Variable, value: f64) -> Self {
        self.filters.push(ScatterFilter::new(variable, value));
        self
    }

    /// Filters that actually restrict the rows.
    pub fn active_filters(&self) -> impl Iterator<Item = &ScatterFilter> {
        self.filters.iter().filter(|f| f.is_active())
    }

    /// Header line naming both axes and the active filters.
    pub fn header(&self) -> String {
        let mut header = format!("{} Vs. {}", self.x.title(), self.y.title());
        let filters: Vec<String> = self
            .active_filters()
            .map(|f| format!("{} = {}", f.variable.discrete_name(), format_value(f.value)))
            .collect();
        if !filters.is_empty() {
            header.push_str(". ");
            header.push_str(&filters.join(", "));
            header.push('.');
        }
        header
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Joint occurrence probabilities indexed `[y][x]`.
///
/// Cells with no occurrence are `NaN`. Marginal totals are derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterTable {
    pub x: Axis,
    pub y: Axis,
    pub filters: Vec<ScatterFilter>,
    pub header: String,
    pub values: Vec<Vec<f64>>,
}

impl ScatterTable {
    pub fn get(&self, y: usize, x: usize) -> Option<f64> {
        self.values.get(y)?.get(x).copied()
    }

    /// Sum of each row (one per `y` label).
    pub fn row_totals(&self) -> Vec<f64> {
        self.values.iter().map(|row| nan_sum(row)).collect()
    }

    /// Sum of each column (one per `x` label).
    pub fn column_totals(&self) -> Vec<f64> {
        (0..self.x.len())
            .map(|col| nan_sum(self.values.iter().filter_map(|row| row.get(col))))
            .collect()
    }

    pub fn grand_total(&self) -> f64 {
        nan_sum(self.values.iter().flatten())
    }

    /// Whether every cell is `NaN`.
    pub fn is_blank(&self) -> bool {
        self.values.iter().flatten().all(|v| v.is_nan())
    }
}

impl Serialize for ScatterTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScatterTable", 8)?;
        state.serialize_field("header", &self.header)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("filters", &self.filters)?;
        state.serialize_field("values", &self.values)?;
        state.serialize_field("row_totals", &self.row_totals())?;
        state.serialize_field("column_totals", &self.column_totals())?;
        state.serialize_field("grand_total", &self.grand_total())?;
        state.end()
    }
}
