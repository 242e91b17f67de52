//! Shared helpers for the engine integration tests.

use pricegen_core::rng::RandomSource;

/// Random source that returns the same draw every time.
///
/// `uniform(lo, hi)` is `lo + fraction * (hi - lo)`, `chance` is always
/// `outcome` and `normal(mean, std_dev)` is `mean + z * std_dev`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraws {
    pub fraction: f64,
    pub outcome: bool,
    pub z: f64,
}

impl FixedDraws {
    /// Zero shock, mid-range uniforms, no events.
    pub fn neutral() -> Self {
        Self {
            fraction: 0.5,
            outcome: false,
            z: 0.0,
        }
    }
}

impl RandomSource for FixedDraws {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.fraction * (hi - lo)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.outcome
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + self.z * std_dev
    }
}
