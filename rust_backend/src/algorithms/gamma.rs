//! Peak enhancement factor (JONSWAP gamma) from sea-state statistics.
//!
//! Uses the DNV-GL RP-C205 rule with `x = Tp / sqrt(Hs)`:
//! gamma is 5 for `x <= 3.6`, 1 for `x >= 5` and `exp(5.75 - 1.15 x)` in
//! between.

use crate::error::{MetoceanError, MetoceanResult};

const LOWER_LIMIT: f64 = 3.6;
const UPPER_LIMIT: f64 = 5.0;

/// Gamma of a single sea state.
///
/// ## Errors
/// `Hs <= 0` and non-finite inputs cannot be derived and are reported as a
/// precondition violation.
pub fn derive_gamma(hs: f64, tp: f64) -> MetoceanResult<f64> {
    if !hs.is_finite() || !tp.is_finite() {
        return Err(MetoceanError::Precondition(format!(
            "Cannot derive peak enhancement from Hs = {}, Tp = {}",
            hs, tp
        )));
    }
    if hs <= 0.0 {
        return Err(MetoceanError::Precondition(format!(
            "Cannot derive peak enhancement from non-positive Hs = {}",
            hs
        )));
    }

    let x = tp / hs.sqrt();
    let gamma = if x <= LOWER_LIMIT {
        5.0
    } else if x >= UPPER_LIMIT {
        1.0
    } else {
        (5.75 - 1.15 * x).exp()
    };
    Ok(gamma)
}

/// Gamma for every row of a pair of columns.
///
/// Fails on the first row that cannot be derived, naming the row.
pub fn derive_gamma_column(hs: &[f64], tp: &[f64]) -> MetoceanResult<Vec<f64>> {
    if hs.len() != tp.len() {
        return Err(MetoceanError::Precondition(format!(
            "Hs has {} rows but Tp has {}",
            hs.len(),
            tp.len()
        )));
    }
    hs.iter()
        .zip(tp)
        .enumerate()
        .map(|(row, (&h, &t))| {
            derive_gamma(h, t).map_err(|e| match e {
                MetoceanError::Precondition(msg) => {
                    MetoceanError::Precondition(format!("row {}: {}", row, msg))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plateaus() {
        // x = 2
        assert_eq!(derive_gamma(4.0, 4.0).unwrap(), 5.0);
        // x = 6
        assert_eq!(derive_gamma(1.0, 6.0).unwrap(), 1.0);
    }

    #[test]
    fn test_interpolated_region() {
        let gamma = derive_gamma(1.0, 4.0).unwrap();
        assert!((gamma - (5.75_f64 - 4.6).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_continuity_at_limits() {
        let at_lower = (5.75_f64 - 1.15 * LOWER_LIMIT).exp();
        let at_upper = (5.75_f64 - 1.15 * UPPER_LIMIT).exp();
        assert!((at_lower - 5.0).abs() < 0.01);
        assert!((at_upper - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            derive_gamma(0.0, 5.0),
            Err(MetoceanError::Precondition(_))
        ));
        assert!(derive_gamma(-1.0, 5.0).is_err());
        assert!(derive_gamma(f64::NAN, 5.0).is_err());
        assert!(derive_gamma(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_column_reports_row() {
        let err = derive_gamma_column(&[1.0, 0.0], &[4.0, 4.0])
            .unwrap_err()
            .to_string();
        assert!(err.contains("row 1"), "unexpected message: {}", err);
        assert_eq!(derive_gamma_column(&[4.0], &[4.0]).unwrap(), vec![5.0]);
    }

    proptest! {
        #[test]
        fn prop_gamma_bounded(hs in 0.01..20.0f64, tp in 0.1..30.0f64) {
            let g = derive_gamma(hs, tp).unwrap();
            // exp(5.75 - 1.15 * 3.6) is 5.0028
            prop_assert!((1.0..=5.01).contains(&g));
        }

        #[test]
        fn prop_gamma_non_increasing(x1 in 3.601..5.0f64, dx in 0.0..1.4f64) {
            let x2 = (x1 + dx).min(5.0);
            let g1 = derive_gamma(1.0, x1).unwrap();
            let g2 = derive_gamma(1.0, x2).unwrap();
            prop_assert!(g2 <= g1);
        }
    }
}
