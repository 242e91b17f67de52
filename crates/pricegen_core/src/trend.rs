//! Occasional drift updates.

use crate::params::EngineParams;
use crate::rng::RandomSource;
use crate::state::InstrumentState;

/// With probability `trend_update_probability`, replace the state's trend by
/// a uniform draw in `[-trend_bound, trend_bound]`.
///
/// Returns the new trend when it changed.
pub fn maybe_update_trend<R: RandomSource + ?Sized>(
    state: &mut InstrumentState,
    params: &EngineParams,
    rng: &mut R,
) -> Option<f64> {
    if !rng.chance(params.trend_update_probability) {
        return None;
    }
    state.trend = rng.uniform(-params.trend_bound, params.trend_bound);
    Some(state.trend)
}
