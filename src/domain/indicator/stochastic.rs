//! Stochastic oscillator.
//!
//! %K = 100 × (close - min(low, k_window)) / (max(high, k_window) - min(low, k_window)),
//! clipped to [0, 100]. A zero high-low range leaves %K undefined for that
//! bar rather than pinned to a bound. %D is the strict SMA of %K over
//! d_window, so it is missing wherever its window contains a missing %K.

use super::rolling;
use super::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_K_WINDOW: usize = 14;
pub const DEFAULT_D_WINDOW: usize = 3;

pub fn calculate_stochastic(bars: &[Bar], k_window: usize, d_window: usize) -> IndicatorSeries {
    let kind = IndicatorKind::Stochastic { k_window, d_window };

    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let lowest = rolling::rolling_min(&lows, k_window);
    let highest = rolling::rolling_max(&highs, k_window);

    let k: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let range = highest[i] - lowest[i];
            if !range.is_finite() || range == 0.0 {
                f64::NAN
            } else {
                (100.0 * (bar.close - lowest[i]) / range).clamp(0.0, 100.0)
            }
        })
        .collect();

    let d = rolling::rolling_mean(&k, d_window);

    let points = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            value: IndicatorValue::Stochastic {
                k: k[i].is_finite().then_some(k[i]),
                d: d[i].is_finite().then_some(d[i]),
            },
        })
        .collect();

    IndicatorSeries { kind, points }
}

pub fn calculate_stochastic_default(bars: &[Bar]) -> IndicatorSeries {
    calculate_stochastic(bars, DEFAULT_K_WINDOW, DEFAULT_D_WINDOW)
}
