use std::cmp::Ordering;

use crate::config::Reducer;

/// Arithmetic mean of the finite values, `NaN` when there are none.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Median of the non-`NaN` values, `NaN` when there are none.
///
/// An even count averages the two middle values.
pub fn nan_median(values: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let count = sorted.len();
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

/// Sum of the non-`NaN` values; 0 when all are `NaN`.
pub fn nan_sum<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().filter(|v| !v.is_nan()).sum()
}

impl Reducer {
    /// Reduce a cell's values with this method.
    pub fn reduce(self, values: &[f64]) -> f64 {
        match self {
            Reducer::Mean => nan_mean(values),
            Reducer::Median => nan_median(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_ignores_nan() {
        assert_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0);
        assert!(nan_mean(&[]).is_nan());
        assert!(nan_mean(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_median() {
        assert_eq!(nan_median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(nan_median(&[4.0, 1.0, f64::NAN, 2.0, 3.0]), 2.5);
        assert!(nan_median(&[]).is_nan());
    }

    #[test]
    fn test_sum() {
        assert_eq!(nan_sum(&[0.25, f64::NAN, 0.5]), 0.75);
        assert_eq!(nan_sum(&[f64::NAN]), 0.0);
    }

    #[test]
    fn test_reducer_dispatch() {
        let values = [1.0, 2.0, 9.0];
        assert_eq!(Reducer::Mean.reduce(&values), 4.0);
        assert_eq!(Reducer::Median.reduce(&values), 2.0);
    }
}
