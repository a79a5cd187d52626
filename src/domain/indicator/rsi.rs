//! RSI (Relative Strength Index).
//!
//! Average gain and average loss are simple rolling means of the raw per-bar
//! deltas over the window (not Wilder's smoothing). The delta at index 0 is
//! undefined, so the first `window` points are missing. When the average
//! loss is zero and the average gain positive, RSI saturates at 100; a
//! window with neither gains nor losses has no defined value.

use super::rolling;
use super::{IndicatorKind, IndicatorSeries, close_values, simple_series};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_WINDOW: usize = 14;

pub fn calculate_rsi(bars: &[Bar], window: usize) -> IndicatorSeries {
    let closes = close_values(bars);
    let n = closes.len();

    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        if delta.is_finite() {
            gains[i] = if delta > 0.0 { delta } else { 0.0 };
            losses[i] = if delta < 0.0 { -delta } else { 0.0 };
        }
    }

    let avg_gain = rolling::rolling_mean(&gains, window);
    let avg_loss = rolling::rolling_mean(&losses, window);

    let values: Vec<f64> = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| rsi_value(gain, loss))
        .collect();

    simple_series(IndicatorKind::Rsi(window), bars, values)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return f64::NAN;
    }
    if avg_loss == 0.0 {
        // gain/0 saturates; 0/0 has no defined value
        return if avg_gain > 0.0 { 100.0 } else { f64::NAN };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
