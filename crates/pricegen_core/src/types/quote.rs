//! Output types produced at the engine boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One generated price for one instrument.
///
/// `price` is already rounded for external reporting; the engine keeps full
/// precision internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Instrument identifier, e.g. `"EUR/USD"`
    pub instrument: String,
    /// Rounded blended price
    pub price: f64,
    /// Generation instant
    pub timestamp: DateTime<Utc>,
}

impl PriceQuote {
    /// Create a quote stamped with the given instant.
    pub fn new(instrument: impl Into<String>, price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            instrument: instrument.into(),
            price,
            timestamp,
        }
    }
}

/// Round `value` to `decimals` decimal digits (half away from zero).
///
/// # Examples
/// ```
/// use pricegen_core::types::round_price;
///
/// assert_eq!(round_price(1.23456789, 6), 1.234568);
/// assert_eq!(round_price(0.0011, 6), 0.0011);
/// ```
pub fn round_price(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
