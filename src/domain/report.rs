//! Backtest result object in its outward-facing shape.
//!
//! Performance metrics are rounded to 4 decimal places and prices (closes,
//! moving averages, event prices, equity values) to 2 on the way out.
//! Missing values serialize as `null`; arrays always keep the same length
//! as `dates`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::backtest::{self, BacktestRun};
use super::error::QuantlabError;
use super::ohlcv::Bar;
use super::strategy::SignalStrategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_return: f64,
    pub annual_return: f64,
    pub max_drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMarker {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityMarker {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub dates: Vec<NaiveDate>,
    pub close_prices: Vec<f64>,
    pub short_ma: Vec<Option<f64>>,
    pub long_ma: Vec<Option<f64>>,
    pub buy_signals: Vec<SignalMarker>,
    pub sell_signals: Vec<SignalMarker>,
    pub equity_curve: Vec<EquityMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub performance: PerformanceSummary,
    pub chart_data: ChartData,
}

impl BacktestReport {
    /// The zeroed fallback: all metrics 0, all series empty.
    pub fn empty() -> Self {
        BacktestReport {
            performance: PerformanceSummary {
                total_return: 0.0,
                annual_return: 0.0,
                max_drawdown: 0.0,
            },
            chart_data: ChartData {
                dates: Vec::new(),
                close_prices: Vec::new(),
                short_ma: Vec::new(),
                long_ma: Vec::new(),
                buy_signals: Vec::new(),
                sell_signals: Vec::new(),
                equity_curve: Vec::new(),
            },
        }
    }
}

/// Run a strategy backtest and shape the result object. An unusable series
/// (empty, unordered dates, non-finite closes) degrades to the zeroed
/// report with a logged diagnostic instead of propagating across the
/// boundary; those are the only faults caught here.
pub fn run_backtest(
    bars: &[Bar],
    strategy: &dyn SignalStrategy,
    initial_capital: f64,
) -> BacktestReport {
    if let Err(err) = backtest::check_input(bars) {
        debug_assert!(err.is_data_fault());
        error!(strategy = strategy.name(), %err, "backtest degraded to empty result");
        return BacktestReport::empty();
    }

    let run = backtest::run(bars, strategy, initial_capital);
    from_run(bars, &run)
}

fn from_run(bars: &[Bar], run: &BacktestRun) -> BacktestReport {
    let performance = PerformanceSummary {
        total_return: round4(run.performance.total_return),
        annual_return: round4(run.performance.annual_return),
        max_drawdown: round4(run.performance.max_drawdown),
    };

    let chart_data = ChartData {
        dates: bars.iter().map(|b| b.date).collect(),
        close_prices: bars.iter().map(|b| round2(b.close)).collect(),
        short_ma: round2_series(&run.signals.short_ma),
        long_ma: round2_series(&run.signals.long_ma),
        buy_signals: markers(&run.buy_events),
        sell_signals: markers(&run.sell_events),
        equity_curve: run
            .states
            .iter()
            .map(|s| EquityMarker {
                date: s.date,
                value: round2(s.total_equity),
            })
            .collect(),
    };

    BacktestReport {
        performance,
        chart_data,
    }
}

fn markers(events: &[backtest::TradeEvent]) -> Vec<SignalMarker> {
    events
        .iter()
        .map(|e| SignalMarker {
            date: e.date,
            price: round2(e.price),
        })
        .collect()
}

fn round2_series(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| v.filter(|x| x.is_finite()).map(round2))
        .collect()
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Reject a report-shaped request error early; kept here so adapters share
/// one definition of "enough data" with the domain.
pub fn require_min_bars(bars: &[Bar], minimum: usize) -> Result<(), QuantlabError> {
    if bars.len() < minimum {
        return Err(QuantlabError::InsufficientData {
            bars: bars.len(),
            minimum,
        });
    }
    Ok(())
}
