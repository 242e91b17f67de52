//! Volatility modulation.
//!
//! Every step draws its volatility from the instrument's base volatility:
//! ordinarily a ±20% jitter, and after each `event_threshold` steps a chance
//! of an elevated regime step simulating a market-news shock.

use crate::params::EngineParams;
use crate::rng::RandomSource;
use crate::state::InstrumentState;

/// Volatility used by the walk for one step, and whether it came from an
/// elevated regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepVolatility {
    /// Standard deviation of this step's shock
    pub value: f64,
    /// Whether the event check fired
    pub elevated: bool,
}

/// Compute the volatility of the next step and advance the event counter.
///
/// The counter is incremented first. Once it exceeds the threshold it is
/// reset to zero and, with probability `event_probability`, the step uses
/// `base_volatility * U(event_multiplier)`. Every other step uses
/// `base_volatility * U(jitter)`.
pub fn step_volatility<R: RandomSource + ?Sized>(
    state: &mut InstrumentState,
    base_volatility: f64,
    params: &EngineParams,
    rng: &mut R,
) -> StepVolatility {
    state.event_counter += 1;

    if state.event_counter > params.event_threshold {
        state.event_counter = 0;
        if rng.chance(params.event_probability) {
            let (lo, hi) = params.event_multiplier;
            return StepVolatility {
                value: base_volatility * rng.uniform(lo, hi),
                elevated: true,
            };
        }
    }

    let (lo, hi) = params.jitter;
    StepVolatility {
        value: base_volatility * rng.uniform(lo, hi),
        elevated: false,
    }
}
