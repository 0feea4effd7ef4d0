//! In-memory observation dataset.
//!
//! An [`ObservationSet`] is a column store of synchronised measurements: one
//! timestamp per row, unique and increasing, and one `f64` vector per
//! [`Variable`]. Missing measurements are `NaN`.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::core::domain::Variable;
use crate::error::{MetoceanError, MetoceanResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    timestamps: Vec<NaiveDateTime>,
    columns: BTreeMap<Variable, Vec<f64>>,
}

impl ObservationSet {
    /// Builds a dataset from a timestamp index and its columns.
    ///
    /// Rows are reordered by timestamp. Duplicate timestamps and columns whose
    /// length differs from the index are rejected.
    pub fn from_columns(
        timestamps: Vec<NaiveDateTime>,
        columns: impl IntoIterator<Item = (Variable, Vec<f64>)>,
    ) -> MetoceanResult<Self> {
        let height = timestamps.len();
        let mut order: Vec<usize> = (0..height).collect();
        order.sort_by_key(|&i| timestamps[i]);

        if let Some(pair) = order.windows(2).find(|w| timestamps[w[0]] == timestamps[w[1]]) {
            return Err(MetoceanError::Precondition(format!(
                "Duplicate timestamp {} in dataset",
                timestamps[pair[0]]
            )));
        }

        let mut set = ObservationSet {
            timestamps: order.iter().map(|&i| timestamps[i]).collect(),
            columns: BTreeMap::new(),
        };
        for (variable, values) in columns {
            if values.len() != height {
                return Err(MetoceanError::Precondition(format!(
                    "Column {} has {} values but the index has {} rows",
                    variable,
                    values.len(),
                    height
                )));
            }
            let reordered = order.iter().map(|&i| values[i]).collect();
            set.insert_column(variable, reordered)?;
        }
        Ok(set)
    }

    /// Builds a dataset on a synthetic hourly index starting 2000-01-01 00:00.
    ///
    /// Useful for in-memory studies where only the statistics matter.
    pub fn with_hourly_index(
        columns: impl IntoIterator<Item = (Variable, Vec<f64>)>,
    ) -> MetoceanResult<Self> {
        let columns: Vec<(Variable, Vec<f64>)> = columns.into_iter().collect();
        let height = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or("Invalid synthetic start date")?;
        let timestamps = (0..height)
            .map(|h| start + Duration::hours(h as i64))
            .collect();
        Self::from_columns(timestamps, columns)
    }

    /// Adds or replaces a column.
    pub fn insert_column(&mut self, variable: Variable, values: Vec<f64>) -> MetoceanResult<()> {
        if values.len() != self.height() {
            return Err(MetoceanError::Precondition(format!(
                "Column {} has {} values but the dataset has {} rows",
                variable,
                values.len(),
                self.height()
            )));
        }
        self.columns.insert(variable, values);
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn has_column(&self, variable: Variable) -> bool {
        self.columns.contains_key(&variable)
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.columns.keys().copied()
    }

    pub fn column(&self, variable: Variable) -> MetoceanResult<&[f64]> {
        self.columns
            .get(&variable)
            .map(Vec::as_slice)
            .ok_or(MetoceanError::MissingColumn(variable))
    }

    /// Largest finite value of a column, ignoring `NaN`.
    pub fn max(&self, variable: Variable) -> MetoceanResult<Option<f64>> {
        Ok(self
            .column(variable)?
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v)))))
    }

    /// Joins several datasets on their timestamps, keeping only the
    /// overlapping rows.
    ///
    /// A variable may appear in only one of the inputs.
    pub fn inner_join(sets: Vec<ObservationSet>) -> MetoceanResult<ObservationSet> {
        let mut iter = sets.into_iter();
        let Some(first) = iter.next() else {
            return Ok(ObservationSet::default());
        };
        let rest: Vec<ObservationSet> = iter.collect();

        let lookups: Vec<HashMap<NaiveDateTime, usize>> = rest
            .iter()
            .map(|set| {
                set.timestamps
                    .iter()
                    .enumerate()
                    .map(|(row, ts)| (*ts, row))
                    .collect()
            })
            .collect();

        // (row in first, rows in each of the others)
        let mut matches: Vec<(usize, Vec<usize>)> = Vec::new();
        for (row, ts) in first.timestamps.iter().enumerate() {
            let others: Option<Vec<usize>> = lookups.iter().map(|l| l.get(ts).copied()).collect();
            if let Some(others) = others {
                matches.push((row, others));
            }
        }

        let mut joined = ObservationSet {
            timestamps: matches.iter().map(|(row, _)| first.timestamps[*row]).collect(),
            columns: BTreeMap::new(),
        };
        for (variable, values) in &first.columns {
            joined
                .columns
                .insert(*variable, matches.iter().map(|(row, _)| values[*row]).collect());
        }
        for (k, set) in rest.iter().enumerate() {
            for (variable, values) in &set.columns {
                if joined.columns.contains_key(variable) {
                    return Err(MetoceanError::Precondition(format!(
                        "Column {} is provided by more than one source",
                        variable
                    )));
                }
                joined
                    .columns
                    .insert(*variable, matches.iter().map(|(_, rows)| values[rows[k]]).collect());
            }
        }
        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_from_columns_sorts_rows() {
        let set = ObservationSet::from_columns(
            vec![ts(2, 0), ts(1, 0)],
            vec![(Variable::Hs, vec![2.0, 1.0])],
        )
        .unwrap();
        assert_eq!(set.timestamps(), &[ts(1, 0), ts(2, 0)]);
        assert_eq!(set.column(Variable::Hs).unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_duplicate_timestamps_rejected() {
        let result = ObservationSet::from_columns(
            vec![ts(1, 0), ts(1, 0)],
            vec![(Variable::Hs, vec![1.0, 2.0])],
        );
        assert!(matches!(result, Err(MetoceanError::Precondition(_))));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result =
            ObservationSet::from_columns(vec![ts(1, 0)], vec![(Variable::Hs, vec![1.0, 2.0])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_column() {
        let set = ObservationSet::with_hourly_index(vec![(Variable::Hs, vec![1.0])]).unwrap();
        assert!(matches!(
            set.column(Variable::Tp),
            Err(MetoceanError::MissingColumn(Variable::Tp))
        ));
    }

    #[test]
    fn test_max_ignores_nan() {
        let set =
            ObservationSet::with_hourly_index(vec![(Variable::Hs, vec![1.0, f64::NAN, 3.0])])
                .unwrap();
        assert_eq!(set.max(Variable::Hs).unwrap(), Some(3.0));
    }

    #[test]
    fn test_inner_join_keeps_overlap() {
        let wind = ObservationSet::from_columns(
            vec![ts(1, 0), ts(1, 1), ts(1, 2)],
            vec![(Variable::WindSpeed, vec![5.0, 6.0, 7.0])],
        )
        .unwrap();
        let wave = ObservationSet::from_columns(
            vec![ts(1, 1), ts(1, 2), ts(1, 3)],
            vec![(Variable::Hs, vec![1.1, 1.2, 1.3])],
        )
        .unwrap();

        let joined = ObservationSet::inner_join(vec![wind, wave]).unwrap();
        assert_eq!(joined.height(), 2);
        assert_eq!(joined.column(Variable::WindSpeed).unwrap(), &[6.0, 7.0]);
        assert_eq!(joined.column(Variable::Hs).unwrap(), &[1.1, 1.2]);
    }

    #[test]
    fn test_inner_join_rejects_shared_columns() {
        let a = ObservationSet::with_hourly_index(vec![(Variable::Hs, vec![1.0])]).unwrap();
        let b = a.clone();
        assert!(ObservationSet::inner_join(vec![a, b]).is_err());
    }
}
