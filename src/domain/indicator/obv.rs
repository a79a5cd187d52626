//! OBV (On-Balance Volume).
//!
//! OBV[0] = 0
//! close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
//! close[i] < close[i-1]: OBV[i] = OBV[i-1] - volume[i]
//! otherwise: OBV[i] = OBV[i-1]
//!
//! A non-finite close or volume carries the running value forward unchanged
//! (logged, never an error), so degraded rows cannot break the cumulation.
//! Every output point is defined; empty input yields an empty series.

use tracing::warn;

use super::{IndicatorKind, IndicatorSeries, simple_series};
use crate::domain::ohlcv::Bar;

pub fn calculate_obv(bars: &[Bar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut obv = 0.0_f64;
    let mut degraded = 0usize;

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            let prev_close = bars[i - 1].close;
            if bar.close.is_finite() && prev_close.is_finite() && bar.volume.is_finite() {
                if bar.close > prev_close {
                    obv += bar.volume;
                } else if bar.close < prev_close {
                    obv -= bar.volume;
                }
            } else {
                degraded += 1;
            }
        }
        values.push(obv);
    }

    if degraded > 0 {
        warn!(
            indicator = "OBV",
            degraded, "non-finite rows carried forward in cumulation"
        );
    }

    simple_series(IndicatorKind::Obv, bars, values)
}
