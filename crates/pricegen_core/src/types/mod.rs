//! Shared engine types.
//!
//! - `error`: Structured error type for every engine operation
//! - `quote`: Rounded price quotes handed to the outside world

pub mod error;
pub mod quote;

pub use error::EngineError;
pub use quote::{round_price, PriceQuote};
