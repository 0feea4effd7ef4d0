//! Directional sectorisation.
//!
//! `N` sectors of width `w = 360 / N` are numbered `1..=N`. Sector 1 is
//! centred on north and wraps around 0/360: it spans `[360 - w/2, w/2)` under
//! the left convention and `(360 - w/2, w/2]` under the right one.

use serde::{Deserialize, Serialize};

use super::binning::round4;
use crate::config::BinClosure;
use crate::error::{MetoceanError, MetoceanResult};

/// Sector of an angle in degrees, `None` for `NaN`.
///
/// Angles outside `[0, 360)` are normalised first. `count` must be at least 1.
pub fn sectorise(angle: f64, count: u32, closure: BinClosure) -> Option<u32> {
    if !angle.is_finite() || count == 0 {
        return None;
    }
    let n = count as f64;
    let w = 360.0 / n;
    let a = angle.rem_euclid(360.0);

    let sector = match closure {
        BinClosure::Left => {
            if a >= 360.0 - w / 2.0 {
                1.0
            } else {
                ((a + w / 2.0) / w).floor() + 1.0
            }
        }
        BinClosure::Right => {
            if a > 360.0 - w / 2.0 {
                1.0
            } else {
                (a / w + 0.5).ceil()
            }
        }
    };
    Some(sector.clamp(1.0, n) as u32)
}

/// Sector layout of one directional variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorScale {
    count: u32,
    closure: BinClosure,
}

impl SectorScale {
    pub fn new(count: u32, closure: BinClosure) -> MetoceanResult<Self> {
        if count == 0 {
            return Err(MetoceanError::Configuration(
                "Sector count must be at least 1".to_string(),
            ));
        }
        Ok(SectorScale { count, closure })
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn width(&self) -> f64 {
        360.0 / self.count as f64
    }

    pub fn closure(&self) -> BinClosure {
        self.closure
    }

    /// Sector number (1-based) of an angle.
    pub fn sector(&self, angle: f64) -> Option<u32> {
        sectorise(angle, self.count, self.closure)
    }

    /// Zero-based axis position of an angle.
    pub fn index(&self, angle: f64) -> Option<u32> {
        self.sector(angle).map(|s| s - 1)
    }

    /// Sector numbers `1..=N`.
    pub fn labels(&self) -> Vec<f64> {
        (1..=self.count).map(f64::from).collect()
    }

    /// Angular bounds of a 1-based sector; sector 1 wraps through north.
    pub fn bounds(&self, sector: u32) -> (f64, f64) {
        let w = self.width();
        if sector <= 1 {
            (round4(360.0 - w / 2.0), round4(w / 2.0))
        } else {
            let i = (sector - 1) as f64;
            (round4(w / 2.0 + (i - 1.0) * w), round4(w / 2.0 + i * w))
        }
    }
}
