//! ATR (Average True Range).
//!
//! True range at index 0 uses only high-low (no previous close); afterwards
//! it is max(high-low, |high-prev_close|, |low-prev_close|). ATR is the
//! strict simple rolling mean of true range, so the first (window-1) points
//! are missing.

use super::rolling;
use super::{IndicatorKind, IndicatorSeries, simple_series};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_WINDOW: usize = 14;

pub fn calculate_atr(bars: &[Bar], window: usize) -> IndicatorSeries {
    let mut tr = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            tr.push(bar.high - bar.low);
        } else {
            tr.push(bar.true_range(bars[i - 1].close));
        }
    }

    let values = rolling::rolling_mean(&tr, window);
    simple_series(IndicatorKind::Atr(window), bars, values)
}
