//! Moving-average smoothing of raw steps.
//!
//! The reported price is a blend of the short moving average of raw steps and
//! the latest raw step:
//!
//! ```text
//! blended = w * mean(history) + (1 - w) * raw
//! ```
//!
//! With the defaults (`w = 0.7`, window of 5) the feed lags the raw walk by a
//! couple of steps at most.

use crate::state::InstrumentState;

/// Push `raw_step` into the state's history, blend, and store the result as
/// the state's current price.
///
/// Returns the blended price at full precision.
pub fn smooth(state: &mut InstrumentState, raw_step: f64, average_weight: f64) -> f64 {
    state.price_history.push(raw_step);
    let moving_average = state.price_history.mean();
    let blended = moving_average * average_weight + raw_step * (1.0 - average_weight);
    state.current_price = blended;
    blended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InstrumentDefinition;
    use approx::assert_relative_eq;

    fn unit_state() -> InstrumentState {
        let def = InstrumentDefinition::new("TEST", 1.0, 0.0, 0.0);
        InstrumentState::from_definition(&def, 5)
    }

    #[test]
    fn test_flat_step_keeps_price() {
        let mut state = unit_state();
        let blended = smooth(&mut state, 1.0, 0.7);

        assert_eq!(state.price_history.iter().collect::<Vec<_>>(), vec![1.0, 1.0]);
        assert_eq!(blended, 1.0);
        assert_eq!(state.current_price, 1.0);
    }

    #[test]
    fn test_blend_arithmetic() {
        let mut state = unit_state();
        // history [1.0, 1.1] -> mean 1.05 -> 0.7 * 1.05 + 0.3 * 1.1
        let blended = smooth(&mut state, 1.1, 0.7);
        assert_relative_eq!(blended, 0.735 + 0.33, epsilon = 1e-12);
        assert_relative_eq!(state.current_price, blended);
    }

    #[test]
    fn test_history_saturates_at_capacity() {
        let mut state = unit_state();
        for i in 0..12 {
            smooth(&mut state, 1.0 + i as f64 * 0.01, 0.7);
            assert!(state.price_history.len() <= 5);
        }
        assert_eq!(state.price_history.len(), 5);
        assert_relative_eq!(state.price_history.iter().next().unwrap(), 1.07, epsilon = 1e-12);
    }

    #[test]
    fn test_full_weight_on_raw_step() {
        let mut state = unit_state();
        let blended = smooth(&mut state, 1.2, 0.0);
        assert_eq!(blended, 1.2);
    }
}
