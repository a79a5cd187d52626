//! Backtest engine: one forward pass over a signal stream.

use chrono::NaiveDate;

use super::error::QuantlabError;
use super::metrics::Performance;
use super::ohlcv::{self, Bar};
use super::portfolio::{self, PortfolioState};
use super::signal::SignalSeries;
use super::strategy::SignalStrategy;

/// A synthetic fill extracted from the position-change stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub date: NaiveDate,
    pub price: f64,
}

/// Everything one backtest invocation derives; nothing outlives the call.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRun {
    pub initial_capital: f64,
    pub signals: SignalSeries,
    pub states: Vec<PortfolioState>,
    pub performance: Performance,
    pub buy_events: Vec<TradeEvent>,
    pub sell_events: Vec<TradeEvent>,
}

/// Reject series the accounting pass cannot process. These are the only
/// faults the report boundary converts into the zeroed fallback; anything
/// else propagates.
pub fn check_input(bars: &[Bar]) -> Result<(), QuantlabError> {
    if bars.is_empty() {
        return Err(QuantlabError::EmptySeries);
    }
    ohlcv::check_ascending(bars)?;
    ohlcv::check_finite_closes(bars)?;
    Ok(())
}

/// Run the strategy over a validated series. Callers are expected to have
/// applied `check_input` (and the caller-side request validation) first;
/// `run` itself never panics on short input, it just produces a quiet run.
pub fn run(
    bars: &[Bar],
    strategy: &dyn SignalStrategy,
    initial_capital: f64,
) -> BacktestRun {
    let signals = strategy.generate(bars);
    let states = portfolio::walk(bars, &signals, initial_capital);
    let performance = Performance::compute(&states, initial_capital);

    let mut buy_events = Vec::new();
    let mut sell_events = Vec::new();
    for (i, bar) in bars.iter().enumerate() {
        let change = signals.position_changes[i];
        if change > 0 {
            buy_events.push(TradeEvent {
                date: bar.date,
                price: bar.close,
            });
        } else if change < 0 {
            sell_events.push(TradeEvent {
                date: bar.date,
                price: bar.close,
            });
        }
    }

    BacktestRun {
        initial_capital,
        signals,
        states,
        performance,
        buy_events,
        sell_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::MaCrossStrategy;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<Bar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn check_input_rejects_empty() {
        assert!(matches!(
            check_input(&[]).unwrap_err(),
            QuantlabError::EmptySeries
        ));
    }

    #[test]
    fn check_input_rejects_unordered_dates() {
        let mut bars = make_bars(&[100.0, 101.0, 102.0]);
        bars.swap(1, 2);
        assert!(matches!(
            check_input(&bars).unwrap_err(),
            QuantlabError::UnorderedDates { .. }
        ));
    }

    #[test]
    fn check_input_rejects_nan_close() {
        let mut bars = make_bars(&[100.0, 101.0]);
        bars[1].close = f64::NAN;
        assert!(matches!(
            check_input(&bars).unwrap_err(),
            QuantlabError::NonNumeric { .. }
        ));
    }

    #[test]
    fn flat_prices_produce_zero_metrics_and_no_events() {
        let bars = make_bars(&[100.0; 30]);
        let strategy = MaCrossStrategy::new(2, 5).unwrap();
        let run = run(&bars, &strategy, 10_000.0);

        assert!((run.performance.total_return - 0.0).abs() < f64::EPSILON);
        assert!((run.performance.max_drawdown - 0.0).abs() < f64::EPSILON);
        assert!(run.buy_events.is_empty());
        assert!(run.sell_events.is_empty());
    }

    #[test]
    fn uptrend_buys_once_and_profits() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64) * 2.0).collect();
        let bars = make_bars(&prices);
        let strategy = MaCrossStrategy::new(2, 5).unwrap();
        let run = run(&bars, &strategy, 10_000.0);

        assert_eq!(run.buy_events.len(), 1);
        assert!(run.sell_events.is_empty());
        assert!(run.performance.total_return > 0.0);

        // buy fires at the first evaluated bar of a monotonic uptrend
        assert_eq!(run.buy_events[0].date, bars[5].date);
        assert!((run.buy_events[0].price - bars[5].close).abs() < f64::EPSILON);
    }

    #[test]
    fn events_pair_with_position_changes() {
        let mut prices: Vec<f64> = (0..15).map(|i| 100.0 + (i as f64) * 2.0).collect();
        prices.extend((0..15).map(|i| 128.0 - (i as f64) * 3.0));
        let bars = make_bars(&prices);
        let strategy = MaCrossStrategy::new(2, 5).unwrap();
        let run = run(&bars, &strategy, 10_000.0);

        let changes_up = run
            .signals
            .position_changes
            .iter()
            .filter(|&&c| c > 0)
            .count();
        let changes_down = run
            .signals
            .position_changes
            .iter()
            .filter(|&&c| c < 0)
            .count();
        assert_eq!(run.buy_events.len(), changes_up);
        assert_eq!(run.sell_events.len(), changes_down);
        assert!(!run.buy_events.is_empty());
        assert!(!run.sell_events.is_empty());
    }

    #[test]
    fn round_trip_equity_reflects_trade_pnl() {
        // flat, then a clean rise, then a fall back: one buy, one sell
        let mut prices = vec![100.0; 8];
        prices.extend([104.0, 108.0, 112.0, 116.0, 120.0]);
        prices.extend([110.0, 100.0, 90.0, 80.0, 70.0]);
        let bars = make_bars(&prices);
        let strategy = MaCrossStrategy::new(2, 5).unwrap();
        let run = run(&bars, &strategy, 1_000.0);

        assert_eq!(run.buy_events.len(), 1);
        assert_eq!(run.sell_events.len(), 1);

        let pnl = run.sell_events[0].price - run.buy_events[0].price;
        let final_equity = run.states.last().unwrap().total_equity;
        assert!((final_equity - (1_000.0 + pnl)).abs() < 1e-9);
    }

    #[test]
    fn run_is_deterministic() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 13) as f64).collect();
        let bars = make_bars(&prices);
        let strategy = MaCrossStrategy::new(3, 8).unwrap();

        let a = run(&bars, &strategy, 10_000.0);
        let b = run(&bars, &strategy, 10_000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn inverted_windows_do_not_panic_the_engine() {
        // precondition violation: the caller should have rejected this, but
        // the engine itself must stay total
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&prices);
        let strategy = MaCrossStrategy {
            short_window: 10,
            long_window: 5,
        };
        let run = run(&bars, &strategy, 10_000.0);
        assert_eq!(run.states.len(), 20);
    }
}
