//! Live per-instrument simulation state.

use std::collections::VecDeque;

use crate::registry::InstrumentDefinition;

/// Bounded FIFO of recent raw step prices.
///
/// Pushing onto a full window evicts the oldest value. Once seeded the window
/// is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl PriceHistory {
    /// Create a window of `capacity` (at least 1) holding `seed`.
    pub fn seeded(seed: f64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut values = VecDeque::with_capacity(capacity.min(16));
        values.push_back(seed);
        Self { values, capacity }
    }

    /// Append `value`, returning the evicted value if the window was full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() >= self.capacity {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    /// Arithmetic mean of the window.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds nothing.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Maximum number of values held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

/// Mutable state of one instrument, owned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentState {
    /// Last blended price, always strictly positive
    pub current_price: f64,
    /// Current drift
    pub trend: f64,
    /// Recent raw step prices
    pub price_history: PriceHistory,
    /// Steps since the last volatility-event check
    pub event_counter: u32,
}

impl InstrumentState {
    /// Initial state for `definition`: base price, base trend, history holding
    /// the base price, counter at zero.
    pub fn from_definition(definition: &InstrumentDefinition, history_capacity: usize) -> Self {
        Self {
            current_price: definition.base_price,
            trend: definition.base_trend,
            price_history: PriceHistory::seeded(definition.base_price, history_capacity),
            event_counter: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = PriceHistory::seeded(1.0, 3);
        assert_eq!(history.push(2.0), None);
        assert_eq!(history.push(3.0), None);
        assert_eq!(history.push(4.0), Some(1.0));
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_history_mean() {
        let mut history = PriceHistory::seeded(1.0, 5);
        history.push(2.0);
        history.push(3.0);
        assert_relative_eq!(history.mean(), 2.0);
    }

    #[test]
    fn test_history_zero_capacity_is_clamped() {
        let mut history = PriceHistory::seeded(1.0, 0);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.push(2.0), Some(1.0));
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_history_large_capacity_allocates_lazily() {
        let history = PriceHistory::seeded(1.0, usize::MAX / 16);
        assert_eq!(history.capacity(), usize::MAX / 16);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_state_from_definition() {
        let def = InstrumentDefinition::new("EUR/USD", 1.1, 0.0008, 0.0001);
        let state = InstrumentState::from_definition(&def, 5);

        assert_eq!(state.current_price, 1.1);
        assert_eq!(state.trend, 0.0001);
        assert_eq!(state.event_counter, 0);
        assert_eq!(state.price_history.iter().collect::<Vec<_>>(), vec![1.1]);
        assert_eq!(state.price_history.capacity(), 5);
    }
}
