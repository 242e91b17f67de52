//! Error types for structured error handling.
//!
//! This module provides:
//! - `EngineError`: Errors from registry lookups, parameter validation and price stepping

use thiserror::Error;

/// Categorised price engine errors.
///
/// The only failure a caller should ever see in normal operation is
/// `UnknownInstrument`. The remaining variants guard registry construction,
/// parameter validation and arithmetic degeneracy.
///
/// # Examples
/// ```
/// use pricegen_core::types::EngineError;
///
/// let err = EngineError::UnknownInstrument("XYZ/ABC".to_string());
/// assert_eq!(format!("{}", err), "Unknown instrument: XYZ/ABC");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Instrument identifier is not registered.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Previous price was zero, negative or not finite.
    #[error("Non-positive price {value} for {instrument}")]
    NonPositivePrice {
        /// Instrument being stepped (empty when stepping outside the engine)
        instrument: String,
        /// The offending price
        value: f64,
    },

    /// Instrument definition rejected at registry construction.
    #[error("Invalid instrument: {0}")]
    InvalidInstrument(String),

    /// Instrument identifier registered twice.
    #[error("Duplicate instrument: {0}")]
    DuplicateInstrument(String),

    /// Engine parameter or step input outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
