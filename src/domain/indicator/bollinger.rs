//! Bollinger Bands.
//!
//! Middle: strict SMA over the window.
//! Upper/lower: middle ± multiplier × rolling sample standard deviation
//! (ddof = 1) over the same window.
//! Warmup: first (window-1) points are missing.

use super::rolling;
use super::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue, close_values};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_STDDEV_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[Bar],
    window: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let kind = IndicatorKind::Bollinger {
        window,
        stddev_mult_x100,
    };
    let mult = stddev_mult_x100 as f64 / 100.0;

    let closes = close_values(bars);
    let middle = rolling::rolling_mean(&closes, window);
    let stddev = rolling::rolling_std(&closes, window);

    let points = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = if middle[i].is_finite() && stddev[i].is_finite() {
                let width = mult * stddev[i];
                IndicatorValue::Bollinger {
                    upper: Some(middle[i] + width),
                    middle: Some(middle[i]),
                    lower: Some(middle[i] - width),
                }
            } else {
                IndicatorValue::Bollinger {
                    upper: None,
                    middle: None,
                    lower: None,
                }
            };
            IndicatorPoint {
                date: bar.date,
                value,
            }
        })
        .collect();

    IndicatorSeries { kind, points }
}

pub fn calculate_bollinger_default(bars: &[Bar]) -> IndicatorSeries {
    calculate_bollinger(bars, DEFAULT_WINDOW, DEFAULT_STDDEV_MULT_X100)
}
