//! Random-walk step generator.
//!
//! Discretised drift-plus-shock process:
//!
//! ```text
//! S' = S * (1 + μ + ε),   ε ~ N(0, σ)
//! ```
//!
//! with the relative move `|S' - S| / S` capped at `max_step`. The cap keeps
//! every raw step strictly positive as long as `max_step < 1`.

use crate::rng::RandomSource;
use crate::types::EngineError;

/// Apply an already-drawn shock to `previous_price` and clamp the move.
///
/// # Errors
///
/// Returns `EngineError::NonPositivePrice` if `previous_price` is zero,
/// negative or not finite.
///
/// # Examples
/// ```
/// use pricegen_core::walk::apply_step;
///
/// // +1% drift, no shock
/// let next = apply_step(100.0, 0.0, 0.01, 0.05).unwrap();
/// assert!((next - 101.0).abs() < 1e-12);
///
/// // a +20% shock is capped at +5%
/// let capped = apply_step(100.0, 0.2, 0.0, 0.05).unwrap();
/// assert!((capped - 105.0).abs() < 1e-12);
/// ```
pub fn apply_step(
    previous_price: f64,
    shock: f64,
    trend: f64,
    max_step: f64,
) -> Result<f64, EngineError> {
    if !(previous_price.is_finite() && previous_price > 0.0) {
        return Err(EngineError::NonPositivePrice {
            instrument: String::new(),
            value: previous_price,
        });
    }

    let change = trend + shock;
    let candidate = previous_price * (1.0 + change);
    let relative_move = (candidate - previous_price).abs() / previous_price;

    // NaN shocks fail the comparison; treat them as a flat step.
    if relative_move.is_nan() {
        return Ok(previous_price);
    }
    if relative_move > max_step {
        let direction = if candidate > previous_price { 1.0 } else { -1.0 };
        return Ok(previous_price * (1.0 + direction * max_step));
    }
    Ok(candidate)
}

/// Draw a shock from `N(0, volatility)` and step `previous_price`.
///
/// # Errors
///
/// - `EngineError::NonPositivePrice` for a degenerate `previous_price`
/// - `EngineError::InvalidParameter` for a negative or non-finite volatility
pub fn step_price<R: RandomSource + ?Sized>(
    previous_price: f64,
    volatility: f64,
    trend: f64,
    max_step: f64,
    rng: &mut R,
) -> Result<f64, EngineError> {
    if !(volatility.is_finite() && volatility >= 0.0) {
        return Err(EngineError::InvalidParameter(format!(
            "volatility must be finite and non-negative, got {volatility}"
        )));
    }
    let shock = rng.normal(0.0, volatility);
    apply_step(previous_price, shock, trend, max_step)
}
