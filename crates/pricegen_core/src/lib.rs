//! # pricegen_core: Stochastic Price Engine for the Simulated FX Feed
//!
//! ## Role
//!
//! pricegen_core is the kernel of the price generator. It owns the
//! per-instrument simulation state and advances it on demand:
//! - Static instrument table (`registry`)
//! - Tunable algorithm constants (`params`)
//! - Injectable, seedable randomness (`rng`)
//! - Volatility modulation with rare elevated regimes (`volatility`)
//! - Clamped drift-plus-shock random walk (`walk`)
//! - Moving-average smoothing (`smoothing`)
//! - Occasional drift updates (`trend`)
//! - The composing [`PriceEngine`] (`engine`)
//!
//! The crate performs no I/O. A host (see `pricegen_server`) calls
//! [`PriceEngine::generate_all`] once per request.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricegen_core::{EngineParams, InstrumentDefinition, InstrumentRegistry, PriceEngine};
//! use pricegen_core::rng::EngineRng;
//!
//! let registry = InstrumentRegistry::new(vec![
//!     InstrumentDefinition::new("GBP/USD", 1.27, 0.0007, 0.0),
//! ])
//! .unwrap();
//! let mut engine = PriceEngine::new(registry, EngineParams::default(), EngineRng::from_seed(7)).unwrap();
//!
//! let price = engine.generate("GBP/USD").unwrap();
//! assert!(price > 0.0);
//! assert!(engine.generate("XYZ/ABC").is_err());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod params;
pub mod registry;
pub mod rng;
pub mod smoothing;
pub mod state;
pub mod trend;
pub mod types;
pub mod volatility;
pub mod walk;

pub use engine::PriceEngine;
pub use params::EngineParams;
pub use registry::{InstrumentDefinition, InstrumentRegistry};
pub use state::{InstrumentState, PriceHistory};
pub use types::{EngineError, PriceQuote};
