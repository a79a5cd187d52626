//! MACD (Moving Average Convergence Divergence).
//!
//! MACD line = EMA(fast) - EMA(slow)
//! Signal line = EMA(MACD line, signal)
//! Histogram = MACD line - signal line
//!
//! The EMAs are seeded from the first observation, so all three outputs are
//! defined from index 0.

use super::rolling;
use super::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue, close_values};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[Bar],
    fast: usize,
    slow: usize,
    signal_window: usize,
) -> IndicatorSeries {
    let kind = IndicatorKind::Macd {
        fast,
        slow,
        signal: signal_window,
    };

    let closes = close_values(bars);
    let ema_fast = rolling::ema(&closes, fast);
    let ema_slow = rolling::ema(&closes, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(&f, &s)| f - s)
        .collect();
    let signal_line = rolling::ema(&macd_line, signal_window);

    let points = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let line = macd_line[i];
            let signal = signal_line[i];
            IndicatorPoint {
                date: bar.date,
                value: IndicatorValue::Macd {
                    line: line.is_finite().then_some(line),
                    signal: signal.is_finite().then_some(signal),
                    histogram: (line - signal).is_finite().then_some(line - signal),
                },
            }
        })
        .collect();

    IndicatorSeries { kind, points }
}

pub fn calculate_macd_default(bars: &[Bar]) -> IndicatorSeries {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
