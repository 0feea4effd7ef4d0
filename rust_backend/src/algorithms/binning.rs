use serde::{Deserialize, Serialize};

use crate::config::BinClosure;
use crate::error::{MetoceanError, MetoceanResult};

/// Round to the 4 decimal places used for presentation and center matching.
pub fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// Integer key of a value at 4-decimal precision.
pub(crate) fn key4(value: f64) -> i64 {
    (value * 1e4).round() as i64
}

/// Bin center of a single value for an unbounded scale.
///
/// Returns `NaN` for a `NaN` input or a width that is not finite and
/// positive. Non-positive values map to the first bin.
pub fn bin(value: f64, width: f64, closure: BinClosure) -> f64 {
    match edge_index(value, width, closure, u32::MAX) {
        Some(idx) => round4(idx as f64 * width + width / 2.0),
        None => f64::NAN,
    }
}

/// Position of `value` among edges `k * width`, capped at `last`.
fn edge_index(value: f64, width: f64, closure: BinClosure, last: u32) -> Option<u32> {
    if value.is_nan() || !(width.is_finite() && width > 0.0) {
        return None;
    }
    if value <= 0.0 {
        return Some(0);
    }
    let ratio = value / width;
    if ratio >= last as f64 + 1.0 {
        return Some(last);
    }
    let edge = |k: i64| k as f64 * width;

    let idx = match closure {
        BinClosure::Left => {
            // greatest k with k*w <= v
            let mut k = ratio.floor() as i64;
            while k > 0 && edge(k) > value {
                k -= 1;
            }
            while edge(k + 1) <= value {
                k += 1;
            }
            k
        }
        BinClosure::Right => {
            // least k with k*w >= v is the upper edge
            let mut k = ratio.ceil() as i64;
            while k > 1 && edge(k - 1) >= value {
                k -= 1;
            }
            while edge(k) < value {
                k += 1;
            }
            k - 1
        }
    };
    Some(idx.clamp(0, last as i64) as u32)
}

/// Bin layout of one continuous variable.
///
/// Edges are `0, w, 2w, ...` strictly below the observed column maximum and
/// are compared as the products `k * w`, so assignment agrees with the
/// published edges even where `v / w` rounds the wrong way. Values beyond the
/// last edge fall into the last bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinScale {
    width: f64,
    count: u32,
    closure: BinClosure,
}

impl BinScale {
    pub fn new(width: f64, count: u32, closure: BinClosure) -> MetoceanResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(MetoceanError::Configuration(format!(
                "Bin width must be positive, got {}",
                width
            )));
        }
        Ok(BinScale {
            width,
            count: count.max(1),
            closure,
        })
    }

    /// Scale whose edges are every `k * width` strictly below `max`.
    ///
    /// A column without finite values, or with a non-positive maximum, still
    /// gets a single bin.
    pub fn from_max(max: Option<f64>, width: f64, closure: BinClosure) -> MetoceanResult<Self> {
        let mut scale = BinScale::new(width, 1, closure)?;
        let Some(max) = max.filter(|m| m.is_finite() && *m > 0.0) else {
            return Ok(scale);
        };
        let edge = |k: u64| k as f64 * width;
        let mut n = (max / width).ceil() as u64;
        while n > 0 && edge(n - 1) >= max {
            n -= 1;
        }
        while edge(n) < max {
            n += 1;
        }
        let n = u32::try_from(n).map_err(|_| {
            MetoceanError::Configuration(format!(
                "Bin width {} is too small for a maximum of {}",
                width, max
            ))
        })?;
        scale.count = n.max(1);
        Ok(scale)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn closure(&self) -> BinClosure {
        self.closure
    }

    /// Bin position of a value, `None` for `NaN`.
    pub fn index(&self, value: f64) -> Option<u32> {
        edge_index(value, self.width, self.closure, self.count.saturating_sub(1))
    }

    /// Presentation center of the bin at `index`.
    pub fn center(&self, index: u32) -> f64 {
        round4(index as f64 * self.width + self.width / 2.0)
    }

    /// Bin center of a value, `None` for `NaN`.
    pub fn bin(&self, value: f64) -> Option<f64> {
        self.index(value).map(|i| self.center(i))
    }

    /// Ordered bin centers.
    pub fn centers(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.center(i)).collect()
    }

    /// Lower and upper edge of the bin at `index`.
    pub fn bounds(&self, index: u32) -> (f64, f64) {
        (
            round4(index as f64 * self.width),
            round4((index + 1) as f64 * self.width),
        )
    }

    /// Position of a bin center, matched at 4-decimal precision.
    pub fn position_of(&self, center: f64) -> Option<u32> {
        if !center.is_finite() {
            return None;
        }
        let key = key4(center);
        (0..self.count).find(|&i| key4(self.center(i)) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_max_counts_edges_below_max() {
        let scale = BinScale::from_max(Some(10.0), 5.0, BinClosure::Left).unwrap();
        assert_eq!(scale.centers(), vec![2.5, 7.5]);

        let scale = BinScale::from_max(Some(10.1), 5.0, BinClosure::Left).unwrap();
        assert_eq!(scale.len(), 3);

        let scale = BinScale::from_max(Some(0.3), 0.1, BinClosure::Left).unwrap();
        assert_eq!(scale.len(), 3);
    }

    #[test]
    fn test_from_max_without_data() {
        let scale = BinScale::from_max(None, 0.5, BinClosure::Left).unwrap();
        assert_eq!(scale.len(), 1);
        assert_eq!(scale.centers(), vec![0.25]);
    }

    #[test]
    fn test_invalid_width() {
        assert!(BinScale::new(0.0, 3, BinClosure::Left).is_err());
        assert!(BinScale::new(f64::NAN, 3, BinClosure::Left).is_err());
    }

    #[test]
    fn test_left_closure() {
        let scale = BinScale::new(5.0, 3, BinClosure::Left).unwrap();
        assert_eq!(scale.index(0.0), Some(0));
        assert_eq!(scale.index(4.99), Some(0));
        assert_eq!(scale.index(5.0), Some(1));
        assert_eq!(scale.index(12.0), Some(2));
        assert_eq!(scale.index(100.0), Some(2));
        assert_eq!(scale.index(f64::NAN), None);
    }

    #[test]
    fn test_right_closure() {
        let scale = BinScale::new(5.0, 3, BinClosure::Right).unwrap();
        assert_eq!(scale.index(0.0), Some(0));
        assert_eq!(scale.index(5.0), Some(0));
        assert_eq!(scale.index(5.01), Some(1));
        assert_eq!(scale.index(10.0), Some(1));
        assert_eq!(scale.index(15.0), Some(2));
        assert_eq!(scale.index(99.0), Some(2));
    }

    #[test]
    fn test_edge_products_decide() {
        // 0.3 / 0.1 is 2.9999999999999996 but 3 * 0.1 is 0.30000000000000004
        let scale = BinScale::new(0.1, 10, BinClosure::Left).unwrap();
        assert_eq!(scale.index(0.3), Some(2));
        let scale = BinScale::new(0.1, 10, BinClosure::Right).unwrap();
        assert_eq!(scale.index(0.3), Some(2));
    }

    #[test]
    fn test_negative_values_clamp_to_first_bin() {
        assert_eq!(bin(-2.0, 0.5, BinClosure::Left), 0.25);
        assert_eq!(bin(-2.0, 0.5, BinClosure::Right), 0.25);
    }

    #[test]
    fn test_bin_free_function() {
        assert_eq!(bin(7.2, 5.0, BinClosure::Left), 7.5);
        assert_eq!(bin(10.0, 5.0, BinClosure::Right), 7.5);
        assert!(bin(f64::NAN, 5.0, BinClosure::Left).is_nan());
    }

    #[test]
    fn test_bin_rejects_invalid_width() {
        for closure in [BinClosure::Left, BinClosure::Right] {
            assert!(bin(1.0, -1.0, closure).is_nan());
            assert!(bin(3.0, 0.0, closure).is_nan());
            assert!(bin(3.0, f64::NAN, closure).is_nan());
            assert!(bin(3.0, f64::INFINITY, closure).is_nan());
        }
    }

    #[test]
    fn test_bounds_and_position() {
        let scale = BinScale::new(0.5, 4, BinClosure::Left).unwrap();
        assert_eq!(scale.bounds(2), (1.0, 1.5));
        assert_eq!(scale.position_of(1.25), Some(2));
        assert_eq!(scale.position_of(1.250000001), Some(2));
        assert_eq!(scale.position_of(1.3), None);
        assert_eq!(scale.position_of(f64::NAN), None);
    }

    proptest! {
        #[test]
        fn prop_bin_is_idempotent(v in 0.0..500.0f64, w in 0.05..20.0f64, right in any::<bool>()) {
            let closure = if right { BinClosure::Right } else { BinClosure::Left };
            let center = bin(v, w, closure);
            prop_assert_eq!(key4(bin(center, w, closure)), key4(center));
        }

        #[test]
        fn prop_left_index_brackets_value(v in 0.0..500.0f64, w in 0.05..20.0f64) {
            let scale = BinScale::new(w, u32::MAX, BinClosure::Left).unwrap();
            let k = scale.index(v).unwrap() as f64;
            prop_assert!(k * w <= v);
            prop_assert!((k + 1.0) * w > v);
        }

        #[test]
        fn prop_scale_index_in_range(v in -10.0..1e6f64, max in 0.1..100.0f64, w in 0.1..5.0f64) {
            let scale = BinScale::from_max(Some(max), w, BinClosure::Left).unwrap();
            let idx = scale.index(v).unwrap() as usize;
            prop_assert!(idx < scale.len());
        }
    }
}
