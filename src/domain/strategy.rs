//! Signal strategies and the explicit strategy registry.
//!
//! Strategies are looked up by identifier through a registry built at
//! startup; an unknown identifier is a hard error, never a silent fallback
//! to a default.

use std::collections::BTreeMap;

use super::error::QuantlabError;
use super::ohlcv::Bar;
use super::signal::{self, SignalSeries};

pub const MA_CROSS: &str = "ma_cross";

pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 50;

/// A strategy turns a bar series into a long/flat signal stream.
pub trait SignalStrategy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn generate(&self, bars: &[Bar]) -> SignalSeries;

    /// Bars required for the strategy to produce meaningful output; callers
    /// reject shorter series before invoking the engine.
    fn min_bars(&self) -> usize;
}

/// Parameters a factory may draw from; strategies ignore fields they do not
/// use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
        }
    }
}

/// Moving-average-cross strategy: long while the short average sits above
/// the long average.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaCrossStrategy {
    pub short_window: usize,
    pub long_window: usize,
}

impl MaCrossStrategy {
    pub fn new(short_window: usize, long_window: usize) -> Result<Self, QuantlabError> {
        if short_window == 0 || short_window >= long_window {
            return Err(QuantlabError::InvalidWindows {
                short_window,
                long_window,
            });
        }
        Ok(MaCrossStrategy {
            short_window,
            long_window,
        })
    }
}

impl SignalStrategy for MaCrossStrategy {
    fn name(&self) -> &'static str {
        MA_CROSS
    }

    fn generate(&self, bars: &[Bar]) -> SignalSeries {
        signal::generate_signals(bars, self.short_window, self.long_window)
    }

    fn min_bars(&self) -> usize {
        2 * self.long_window
    }
}

type StrategyFactory = fn(&StrategyParams) -> Result<Box<dyn SignalStrategy>, QuantlabError>;

/// Identifier → constructor map, populated once at startup.
pub struct StrategyRegistry {
    factories: BTreeMap<&'static str, StrategyFactory>,
}

impl StrategyRegistry {
    /// Registry with every built-in strategy.
    pub fn builtin() -> Self {
        let mut factories: BTreeMap<&'static str, StrategyFactory> = BTreeMap::new();
        factories.insert(MA_CROSS, |params| {
            Ok(Box::new(MaCrossStrategy::new(
                params.short_window,
                params.long_window,
            )?))
        });
        StrategyRegistry { factories }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    pub fn create(
        &self,
        name: &str,
        params: &StrategyParams,
    ) -> Result<Box<dyn SignalStrategy>, QuantlabError> {
        match self.factories.get(name) {
            Some(factory) => factory(params),
            None => Err(QuantlabError::UnknownStrategy {
                name: name.to_string(),
                known: self.names().join(", "),
            }),
        }
    }
}
