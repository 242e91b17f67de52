//! Instrument registry.
//!
//! Static, insertion-ordered table of the instruments the feed quotes. The
//! registry is fixed for the lifetime of an engine.

use serde::{Deserialize, Serialize};

use crate::types::EngineError;

/// Static definition of one quoted instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDefinition {
    /// Identifier, e.g. `"EUR/USD"`
    #[serde(rename = "instrument", alias = "id")]
    pub id: String,
    /// Starting price
    pub base_price: f64,
    /// Standard deviation of one step's shock before modulation
    pub base_volatility: f64,
    /// Drift in force until the first trend update
    pub base_trend: f64,
}

impl InstrumentDefinition {
    /// Create a definition without validation.
    pub fn new(id: impl Into<String>, base_price: f64, base_volatility: f64, base_trend: f64) -> Self {
        Self {
            id: id.into(),
            base_price,
            base_volatility,
            base_trend,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidInstrument(
                "identifier must not be empty".to_string(),
            ));
        }
        if !(self.base_price.is_finite() && self.base_price > 0.0) {
            return Err(EngineError::InvalidInstrument(format!(
                "{}: base price must be positive, got {}",
                self.id, self.base_price
            )));
        }
        if !(self.base_volatility.is_finite() && self.base_volatility >= 0.0) {
            return Err(EngineError::InvalidInstrument(format!(
                "{}: base volatility must be non-negative, got {}",
                self.id, self.base_volatility
            )));
        }
        if !self.base_trend.is_finite() {
            return Err(EngineError::InvalidInstrument(format!(
                "{}: base trend must be finite",
                self.id
            )));
        }
        Ok(())
    }
}

/// Ordered collection of instrument definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentRegistry {
    definitions: Vec<InstrumentDefinition>,
}

impl InstrumentRegistry {
    /// Build a registry, keeping the given order.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidInstrument` for an empty id or a non-positive,
    ///   non-finite base price / volatility / trend
    /// - `EngineError::DuplicateInstrument` if an id appears twice
    pub fn new(definitions: Vec<InstrumentDefinition>) -> Result<Self, EngineError> {
        for (i, def) in definitions.iter().enumerate() {
            def.validate()?;
            if definitions[..i].iter().any(|d| d.id == def.id) {
                return Err(EngineError::DuplicateInstrument(def.id.clone()));
            }
        }
        Ok(Self { definitions })
    }

    /// The three FX crosses quoted by the demo feed.
    pub fn fx_default() -> Self {
        Self {
            definitions: vec![
                InstrumentDefinition::new("EUR/USD", 1.1000, 0.0008, 0.0001),
                InstrumentDefinition::new("ARG/USD", 0.0012, 0.0030, -0.0002),
                InstrumentDefinition::new("ARG/EUR", 0.0011, 0.0025, -0.0001),
            ],
        }
    }

    /// Identifiers in registry order.
    pub fn list_instruments(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.id.as_str()).collect()
    }

    /// Static definition of `id`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownInstrument` if `id` is not registered.
    pub fn base_definition(&self, id: &str) -> Result<&InstrumentDefinition, EngineError> {
        self.definitions
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| EngineError::UnknownInstrument(id.to_string()))
    }

    /// All definitions in registry order.
    pub fn definitions(&self) -> &[InstrumentDefinition] {
        &self.definitions
    }

    /// Number of registered instruments.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self::fx_default()
    }
}
