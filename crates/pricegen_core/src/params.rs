//! Tunable constants of the price-evolution algorithm.
//!
//! Every magic number of the simulator lives here so that a deployment (or a
//! test) can change it without touching the algorithm. `Default` reproduces
//! the reference behaviour of the feed.

use serde::Deserialize;

use crate::types::EngineError;

/// Longest smoothing window a configuration may request
pub const MAX_HISTORY_CAPACITY: usize = 1_000;

/// Parameters shared by all instruments of one engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Steps between two volatility-event checks
    pub event_threshold: u32,
    /// Probability that a check opens an elevated-volatility step
    pub event_probability: f64,
    /// Multiplier range applied to base volatility on an elevated step
    pub event_multiplier: (f64, f64),
    /// Multiplier range applied to base volatility on an ordinary step
    pub jitter: (f64, f64),
    /// Largest relative move allowed for one raw step
    pub max_step: f64,
    /// Length of the smoothing window
    pub history_capacity: usize,
    /// Weight of the moving average in the blended price
    pub average_weight: f64,
    /// Probability of drawing a fresh trend after a step
    pub trend_update_probability: f64,
    /// Trends are drawn from `[-trend_bound, trend_bound]`
    pub trend_bound: f64,
    /// Decimal digits of reported prices
    pub output_decimals: u32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            event_threshold: 100,
            event_probability: 0.3,
            event_multiplier: (2.0, 4.0),
            jitter: (0.8, 1.2),
            max_step: 0.05,
            history_capacity: 5,
            average_weight: 0.7,
            trend_update_probability: 0.05,
            trend_bound: 0.0003,
            output_decimals: 6,
        }
    }
}

impl EngineParams {
    /// Validate the parameter set.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_probability("event_probability", self.event_probability)?;
        check_probability("trend_update_probability", self.trend_update_probability)?;
        check_probability("average_weight", self.average_weight)?;
        check_range("event_multiplier", self.event_multiplier)?;
        check_range("jitter", self.jitter)?;

        if !(self.max_step > 0.0 && self.max_step < 1.0) {
            return Err(EngineError::InvalidParameter(format!(
                "max_step must be in (0, 1), got {}",
                self.max_step
            )));
        }
        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(EngineError::InvalidParameter(format!(
                "history_capacity must be in [1, {}], got {}",
                MAX_HISTORY_CAPACITY, self.history_capacity
            )));
        }
        if !(self.trend_bound.is_finite() && self.trend_bound >= 0.0) {
            return Err(EngineError::InvalidParameter(format!(
                "trend_bound must be finite and non-negative, got {}",
                self.trend_bound
            )));
        }
        if self.output_decimals > 15 {
            return Err(EngineError::InvalidParameter(format!(
                "output_decimals must be at most 15, got {}",
                self.output_decimals
            )));
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), EngineError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

fn check_range(name: &str, (lo, hi): (f64, f64)) -> Result<(), EngineError> {
    if lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter(format!(
            "{name} must satisfy 0 < lo <= hi, got ({lo}, {hi})"
        )))
    }
}
