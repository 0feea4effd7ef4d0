//! Tab-separated time series files.
//!
//! Files have no header. Column 0 is the date as `YYYYMMDD`, column 1 the
//! time as `HHMM` (leading zeros optional), and the remaining columns hold
//! the measurements named by a [`ColumnLayout`]. Empty cells and `NaN`
//! tokens are missing values.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::{ObservationSet, Variable};
use crate::error::{MetoceanError, MetoceanResult};

/// Expected measurement columns of a file, after the date and time columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub columns: Vec<Variable>,
    /// Toggles that determined the layout, quoted in schema errors.
    pub description: String,
}

impl ColumnLayout {
    pub fn new(columns: Vec<Variable>, description: impl Into<String>) -> Self {
        Self {
            columns,
            description: description.into(),
        }
    }

    /// Total number of fields per line, date and time included.
    pub fn field_count(&self) -> usize {
        self.columns.len() + 2
    }
}

/// Parse a time series file.
pub fn parse_timeseries_file(path: &Path, layout: &ColumnLayout) -> MetoceanResult<ObservationSet> {
    let file = File::open(path).map_err(|e| MetoceanError::io(path, e))?;
    parse_timeseries_reader(file, path, layout)
}

/// Parse time series content from any reader. `source` names the input in
/// error messages.
pub fn parse_timeseries_reader<R: Read>(
    reader: R,
    source: &Path,
    layout: &ColumnLayout,
) -> MetoceanResult<ObservationSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let expected = layout.field_count();
    let mut timestamps = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); layout.columns.len()];

    for result in rdr.records() {
        let record = result.map_err(|e| MetoceanError::schema(source, e.to_string()))?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != expected {
            return Err(MetoceanError::schema(
                source,
                format!(
                    "line {}: expected {} fields for {}, found {}",
                    line,
                    expected,
                    layout.description,
                    record.len()
                ),
            ));
        }

        let timestamp = parse_timestamp(&record[0], &record[1]).ok_or_else(|| {
            MetoceanError::schema(
                source,
                format!(
                    "line {}: invalid timestamp '{} {}', expected YYYYMMDD and HHMM",
                    line,
                    &record[0],
                    &record[1]
                ),
            )
        })?;
        timestamps.push(timestamp);

        for (k, (variable, column)) in layout.columns.iter().zip(columns.iter_mut()).enumerate() {
            let raw = &record[k + 2];
            let value = parse_value(raw).ok_or_else(|| {
                MetoceanError::schema(
                    source,
                    format!("line {}: invalid {} value '{}'", line, variable, raw),
                )
            })?;
            column.push(value);
        }
    }

    ObservationSet::from_columns(timestamps, layout.columns.iter().copied().zip(columns)).map_err(
        |e| match e {
            MetoceanError::Precondition(msg) => {
                MetoceanError::Precondition(format!("{}: {}", source.display(), msg))
            }
            other => other,
        },
    )
}

/// Combine a `YYYYMMDD` date and an `HHMM` time.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y%m%d").ok()?;
    let hhmm: u32 = time.trim().parse().ok()?;
    let time = NaiveTime::from_hms_opt(hhmm / 100, hhmm % 100, 0)?;
    Some(date.and_time(time))
}

/// A measurement cell; empty and `NaN` cells are missing values.
fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    raw.parse::<f64>().ok()
}
