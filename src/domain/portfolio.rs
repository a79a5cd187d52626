//! Per-bar portfolio accounting for the long/flat unit-position model.

use chrono::NaiveDate;

use super::ohlcv::Bar;
use super::signal::SignalSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// State derived for one bar of the forward pass. `total_equity` is always
/// `cash + holdings_value`; `drawdown` is relative to the running peak and
/// never positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub date: NaiveDate,
    pub cash: f64,
    pub holdings_value: f64,
    pub total_equity: f64,
    pub running_peak: f64,
    pub drawdown: f64,
}

/// Walk the signal series once, reinvesting at close: one notional unit is
/// held while long, cash moves by close price on each position change.
pub fn walk(bars: &[Bar], signals: &SignalSeries, initial_capital: f64) -> Vec<PortfolioState> {
    debug_assert_eq!(bars.len(), signals.len());

    let mut states = Vec::with_capacity(bars.len());
    let mut cash = initial_capital;
    let mut peak = f64::NEG_INFINITY;

    for (i, bar) in bars.iter().enumerate() {
        cash -= signals.position_changes[i] as f64 * bar.close;
        let holdings_value = signals.signals[i].as_i8() as f64 * bar.close;
        let total_equity = cash + holdings_value;

        if total_equity > peak {
            peak = total_equity;
        }
        let drawdown = if peak != 0.0 {
            (total_equity - peak) / peak
        } else {
            0.0
        };

        states.push(PortfolioState {
            date: bar.date,
            cash,
            holdings_value,
            total_equity,
            running_peak: peak,
            drawdown,
        });
    }

    states
}

pub fn equity_curve(states: &[PortfolioState]) -> Vec<EquityPoint> {
    states
        .iter()
        .map(|s| EquityPoint {
            date: s.date,
            value: s.total_equity,
        })
        .collect()
}
