//! Volume-derived indicators: VMA, VR and MFI.

use super::rolling;
use super::{IndicatorKind, IndicatorSeries, simple_series, volume_values};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_VMA_WINDOW: usize = 5;
pub const DEFAULT_VR_WINDOW: usize = 5;
pub const DEFAULT_MFI_WINDOW: usize = 14;

/// Volume moving average: lenient SMA of volume (min_periods=1), so early
/// points are means of whatever history exists.
pub fn calculate_vma(bars: &[Bar], window: usize) -> IndicatorSeries {
    let values = rolling::rolling_mean_lenient(&volume_values(bars), window);
    simple_series(IndicatorKind::Vma(window), bars, values)
}

/// Volume ratio: current volume over the mean of the `window` volumes that
/// precede it (the current bar is excluded from the average). Missing for
/// the first `window` bars and wherever the prior-window mean is zero or
/// non-finite.
pub fn calculate_vr(bars: &[Bar], window: usize) -> IndicatorSeries {
    let volumes = volume_values(bars);
    let n = volumes.len();
    let mut values = vec![f64::NAN; n];

    if window > 0 {
        for i in window..n {
            let prior = &volumes[i - window..i];
            if prior.iter().any(|v| !v.is_finite()) || !volumes[i].is_finite() {
                continue;
            }
            let mean = prior.iter().sum::<f64>() / window as f64;
            if mean != 0.0 {
                values[i] = volumes[i] / mean;
            }
        }
    }

    simple_series(IndicatorKind::Vr(window), bars, values)
}

/// Money flow index. Typical price TP = (high+low+close)/3; raw money flow
/// MF = TP × volume; positive flow where TP rose against the previous bar,
/// negative flow where it fell. Strict rolling sums over the window, so the
/// first (window-1) points are missing. A window with no negative flow
/// saturates at 100; a window with no flow at all has no defined value.
pub fn calculate_mfi(bars: &[Bar], window: usize) -> IndicatorSeries {
    let n = bars.len();
    let tp: Vec<f64> = bars.iter().map(|b| b.typical_price()).collect();

    let mut pos_flow = vec![0.0_f64; n];
    let mut neg_flow = vec![0.0_f64; n];
    for i in 1..n {
        let dtp = tp[i] - tp[i - 1];
        let mf = tp[i] * bars[i].volume;
        if !dtp.is_finite() || !mf.is_finite() {
            pos_flow[i] = f64::NAN;
            neg_flow[i] = f64::NAN;
        } else if dtp > 0.0 {
            pos_flow[i] = mf;
        } else if dtp < 0.0 {
            neg_flow[i] = mf.abs();
        }
    }

    let pos_sum = rolling::rolling_sum(&pos_flow, window);
    let neg_sum = rolling::rolling_sum(&neg_flow, window);

    let values: Vec<f64> = pos_sum
        .iter()
        .zip(&neg_sum)
        .map(|(&pos, &neg)| mfi_value(pos, neg))
        .collect();

    simple_series(IndicatorKind::Mfi(window), bars, values)
}

fn mfi_value(pos_sum: f64, neg_sum: f64) -> f64 {
    if !pos_sum.is_finite() || !neg_sum.is_finite() {
        return f64::NAN;
    }
    if neg_sum == 0.0 {
        return if pos_sum > 0.0 { 100.0 } else { f64::NAN };
    }
    let ratio = pos_sum / neg_sum;
    100.0 - 100.0 / (1.0 + ratio)
}
