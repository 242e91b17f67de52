//! Price engine composition.
//!
//! [`PriceEngine`] owns the registry, the live state of every instrument and
//! the random source. One call to [`PriceEngine::generate`] runs, for one
//! instrument:
//!
//! 1. volatility modulation ([`crate::volatility`])
//! 2. the clamped random-walk step ([`crate::walk`])
//! 3. moving-average smoothing ([`crate::smoothing`])
//! 4. the occasional trend update ([`crate::trend`])
//!
//! The 5% bound applies to the raw step only; the blended price lags the walk
//! and may drift past it over consecutive calls.
//!
//! The engine takes `&mut self` and performs no I/O. Hosts serving concurrent
//! requests wrap it in a lock.

use std::collections::HashMap;

use chrono::Utc;

use crate::params::EngineParams;
use crate::registry::InstrumentRegistry;
use crate::rng::{EngineRng, RandomSource};
use crate::smoothing::smooth;
use crate::state::InstrumentState;
use crate::trend::maybe_update_trend;
use crate::types::{round_price, EngineError, PriceQuote};
use crate::volatility::step_volatility;
use crate::walk::step_price;

/// Stateful simulator of a set of instruments.
///
/// # Examples
///
/// ```
/// use pricegen_core::PriceEngine;
///
/// let mut engine = PriceEngine::seeded(42);
/// let quotes = engine.generate_all().unwrap();
///
/// assert_eq!(quotes.len(), 3);
/// assert_eq!(quotes[0].instrument, "EUR/USD");
/// assert!(quotes.iter().all(|q| q.price > 0.0));
/// ```
pub struct PriceEngine<R: RandomSource = EngineRng> {
    registry: InstrumentRegistry,
    params: EngineParams,
    states: HashMap<String, InstrumentState>,
    rng: R,
}

impl PriceEngine<EngineRng> {
    /// Default FX registry and parameters, entropy-seeded.
    pub fn with_defaults() -> Self {
        Self::from_parts(
            InstrumentRegistry::fx_default(),
            EngineParams::default(),
            EngineRng::from_entropy(),
        )
    }

    /// Default FX registry and parameters with a reproducible seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_parts(
            InstrumentRegistry::fx_default(),
            EngineParams::default(),
            EngineRng::from_seed(seed),
        )
    }
}

impl<R: RandomSource> PriceEngine<R> {
    /// Build an engine, initialising one state per registered instrument.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidParameter` if `params` fail validation.
    pub fn new(
        registry: InstrumentRegistry,
        params: EngineParams,
        rng: R,
    ) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self::from_parts(registry, params, rng))
    }

    fn from_parts(registry: InstrumentRegistry, params: EngineParams, rng: R) -> Self {
        let states = registry
            .definitions()
            .iter()
            .map(|def| {
                (
                    def.id.clone(),
                    InstrumentState::from_definition(def, params.history_capacity),
                )
            })
            .collect();

        Self {
            registry,
            params,
            states,
            rng,
        }
    }

    /// Advance `instrument` by one step and return its rounded price.
    ///
    /// # Errors
    ///
    /// - `EngineError::UnknownInstrument` if `instrument` is not registered;
    ///   no state is touched
    /// - `EngineError::NonPositivePrice` if the stored price has degenerated
    pub fn generate(&mut self, instrument: &str) -> Result<f64, EngineError> {
        let base_volatility = self.registry.base_definition(instrument)?.base_volatility;
        let state = self
            .states
            .get_mut(instrument)
            .ok_or_else(|| EngineError::UnknownInstrument(instrument.to_string()))?;

        let previous_price = state.current_price;
        if !(previous_price.is_finite() && previous_price > 0.0) {
            return Err(EngineError::NonPositivePrice {
                instrument: instrument.to_string(),
                value: previous_price,
            });
        }

        let volatility = step_volatility(state, base_volatility, &self.params, &mut self.rng);
        if volatility.elevated {
            tracing::debug!(
                instrument = %instrument,
                volatility = volatility.value,
                "Elevated volatility step"
            );
        }

        let raw_step = step_price(
            previous_price,
            volatility.value,
            state.trend,
            self.params.max_step,
            &mut self.rng,
        )
        .map_err(|err| match err {
            EngineError::NonPositivePrice { value, .. } => EngineError::NonPositivePrice {
                instrument: instrument.to_string(),
                value,
            },
            other => other,
        })?;

        let blended = smooth(state, raw_step, self.params.average_weight);

        if let Some(trend) = maybe_update_trend(state, &self.params, &mut self.rng) {
            tracing::debug!(instrument = %instrument, trend, "Trend updated");
        }

        tracing::trace!(
            instrument = %instrument,
            previous_price,
            raw_step,
            blended,
            volatility = volatility.value,
            "Price generated"
        );

        Ok(round_price(blended, self.params.output_decimals))
    }

    /// Advance every instrument once, in registry order.
    ///
    /// # Errors
    ///
    /// Fails as a whole on the first instrument that fails.
    pub fn generate_all(&mut self) -> Result<Vec<PriceQuote>, EngineError> {
        let ids: Vec<String> = self
            .registry
            .list_instruments()
            .into_iter()
            .map(str::to_string)
            .collect();

        ids.into_iter()
            .map(|id| {
                let price = self.generate(&id)?;
                Ok(PriceQuote::new(id, price, Utc::now()))
            })
            .collect()
    }

    /// Identifiers in registry order.
    pub fn list_instruments(&self) -> Vec<&str> {
        self.registry.list_instruments()
    }

    /// The registry this engine simulates.
    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    /// Live state of `instrument`, if registered.
    pub fn state(&self, instrument: &str) -> Option<&InstrumentState> {
        self.states.get(instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InstrumentDefinition;
    use crate::rng::FixedDraws;
    use approx::assert_relative_eq;

    fn unit_engine(draws: FixedDraws) -> PriceEngine<FixedDraws> {
        let registry =
            InstrumentRegistry::new(vec![InstrumentDefinition::new("UNIT", 1.0, 0.001, 0.0)])
                .unwrap();
        PriceEngine::new(registry, EngineParams::default(), draws).unwrap()
    }

    #[test]
    fn test_initial_states_from_registry() {
        let engine = PriceEngine::seeded(1);
        for id in engine.list_instruments() {
            let def = engine.registry().base_definition(id).unwrap();
            let state = engine.state(id).unwrap();
            assert_eq!(state.current_price, def.base_price);
            assert_eq!(state.trend, def.base_trend);
            assert_eq!(state.event_counter, 0);
            assert_eq!(state.price_history.len(), 1);
        }
    }

    #[test]
    fn test_zero_shock_step_is_exact() {
        let mut engine = unit_engine(FixedDraws::neutral());
        let price = engine.generate("UNIT").unwrap();

        assert_eq!(price, 1.0);
        let state = engine.state("UNIT").unwrap();
        assert_eq!(state.price_history.iter().collect::<Vec<_>>(), vec![1.0, 1.0]);
        assert_eq!(state.current_price, 1.0);
        assert_eq!(state.event_counter, 1);
        assert_eq!(state.trend, 0.0);
    }

    #[test]
    fn test_positive_shock_blends_with_history() {
        // z = 1, volatility = 0.001 * U(0.8, 1.2) at midpoint
        let mut engine = unit_engine(FixedDraws {
            fraction: 0.5,
            outcome: false,
            z: 1.0,
        });
        engine.generate("UNIT").unwrap();

        let state = engine.state("UNIT").unwrap();
        let raw = 1.0 * (1.0 + 0.001);
        let expected = (1.0 + raw) / 2.0 * 0.7 + raw * (1.0 - 0.7);
        assert_relative_eq!(state.current_price, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_instrument_does_not_mutate() {
        let mut engine = PriceEngine::seeded(3);
        let before: Vec<InstrumentState> = engine
            .list_instruments()
            .iter()
            .map(|id| engine.state(id).unwrap().clone())
            .collect();

        assert_eq!(
            engine.generate("XYZ/ABC"),
            Err(EngineError::UnknownInstrument("XYZ/ABC".to_string()))
        );

        let after: Vec<InstrumentState> = engine
            .list_instruments()
            .iter()
            .map(|id| engine.state(id).unwrap().clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let params = EngineParams {
            average_weight: 2.0,
            ..Default::default()
        };
        let result = PriceEngine::new(InstrumentRegistry::fx_default(), params, FixedDraws::neutral());
        assert!(matches!(result, Err(EngineError::InvalidParameter(_))));
    }

    #[test]
    fn test_new_rejects_oversized_history() {
        let params = EngineParams {
            history_capacity: usize::MAX / 16,
            ..Default::default()
        };
        let result = PriceEngine::new(InstrumentRegistry::fx_default(), params, EngineRng::from_seed(1));
        assert!(matches!(result, Err(EngineError::InvalidParameter(_))));
    }

    #[test]
    fn test_generate_all_registry_order() {
        let mut engine = PriceEngine::seeded(5);
        for _ in 0..10 {
            let quotes = engine.generate_all().unwrap();
            let ids: Vec<&str> = quotes.iter().map(|q| q.instrument.as_str()).collect();
            assert_eq!(ids, vec!["EUR/USD", "ARG/USD", "ARG/EUR"]);
        }
    }

    #[test]
    fn test_generate_all_empty_registry() {
        let registry = InstrumentRegistry::new(Vec::new()).unwrap();
        let mut engine =
            PriceEngine::new(registry, EngineParams::default(), FixedDraws::neutral()).unwrap();
        assert!(engine.generate_all().unwrap().is_empty());
    }

    #[test]
    fn test_reported_price_is_rounded_state_is_not() {
        let mut engine = unit_engine(FixedDraws {
            fraction: 0.5,
            outcome: false,
            z: 0.123_456_789,
        });
        let price = engine.generate("UNIT").unwrap();
        let state_price = engine.state("UNIT").unwrap().current_price;

        assert_eq!(price, round_price(state_price, 6));
        assert_ne!(price, state_price);
    }

    #[test]
    fn test_same_seed_same_prices() {
        let mut a = PriceEngine::seeded(77);
        let mut b = PriceEngine::seeded(77);
        for _ in 0..50 {
            let pa: Vec<f64> = a.generate_all().unwrap().iter().map(|q| q.price).collect();
            let pb: Vec<f64> = b.generate_all().unwrap().iter().map(|q| q.price).collect();
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_forced_events_and_trend_updates() {
        let mut engine = unit_engine(FixedDraws {
            fraction: 1.0,
            outcome: true,
            z: 0.0,
        });
        for _ in 0..101 {
            engine.generate("UNIT").unwrap();
        }
        let state = engine.state("UNIT").unwrap();
        assert_eq!(state.event_counter, 0);
        assert_relative_eq!(state.trend, 0.0003, epsilon = 1e-12);
    }
}
