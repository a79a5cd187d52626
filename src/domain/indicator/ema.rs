//! Exponential moving average.
//!
//! alpha = 2/(window+1), seeded from the first close, so the series has no
//! warm-up gap: every point is defined from index 0.

use super::rolling;
use super::{IndicatorKind, IndicatorSeries, close_values, simple_series};
use crate::domain::ohlcv::Bar;

pub fn calculate_ema(bars: &[Bar], window: usize) -> IndicatorSeries {
    let values = rolling::ema(&close_values(bars), window);
    simple_series(IndicatorKind::Ema(window), bars, values)
}
