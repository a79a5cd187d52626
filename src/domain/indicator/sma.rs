//! Simple moving averages over close prices.
//!
//! Two modes exist and are selected per call site:
//! - `calculate_sma`: strict, the first (window-1) points are missing.
//! - `calculate_pma`: lenient, partial-window means from the first bar
//!   (min_periods=1); this is the variant the moving-average-cross signal
//!   uses.

use tracing::warn;

use super::rolling;
use super::{IndicatorKind, IndicatorSeries, close_values, simple_series};
use crate::domain::ohlcv::Bar;

pub fn calculate_sma(bars: &[Bar], window: usize) -> IndicatorSeries {
    if window == 0 {
        warn!(indicator = "SMA", "window of 0 requested, series is all-missing");
    }
    let values = rolling::rolling_mean(&close_values(bars), window);
    simple_series(IndicatorKind::Sma(window), bars, values)
}

pub fn calculate_pma(bars: &[Bar], window: usize) -> IndicatorSeries {
    if window == 0 {
        warn!(indicator = "PMA", "window of 0 requested, series is all-missing");
    }
    let values = rolling::rolling_mean_lenient(&close_values(bars), window);
    simple_series(IndicatorKind::Pma(window), bars, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<Bar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn sma_strict_warmup_count() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let series = calculate_sma(&bars, 3);
        let values = series.simple_values();

        assert_eq!(values.len(), 5);
        assert_eq!(values.iter().filter(|v| v.is_none()).count(), 2);
        assert!((values[2].unwrap() - 11.0).abs() < 1e-12);
        assert!((values[4].unwrap() - 13.0).abs() < 1e-12);
    }

    #[test]
    fn sma_window_larger_than_series_is_all_missing() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let series = calculate_sma(&bars, 20);
        assert!(series.simple_values().iter().all(|v| v.is_none()));
    }

    #[test]
    fn pma_defined_everywhere() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let series = calculate_pma(&bars, 20);
        let values = series.simple_values();

        assert!(values.iter().all(|v| v.is_some()));
        assert!((values[0].unwrap() - 10.0).abs() < 1e-12);
        assert!((values[4].unwrap() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn pma_full_window_matches_strict_sma() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let pma = calculate_pma(&bars, 5).simple_values();
        let sma = calculate_sma(&bars, 5).simple_values();
        assert_eq!(pma[4], sma[4]);
        assert!((pma[4].unwrap() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(calculate_sma(&[], 5).points.is_empty());
        assert!(calculate_pma(&[], 5).points.is_empty());
    }

    #[test]
    fn dates_align_with_input() {
        let bars = make_bars(&[10.0, 11.0]);
        let series = calculate_sma(&bars, 2);
        assert_eq!(series.points[0].date, bars[0].date);
        assert_eq!(series.points[1].date, bars[1].date);
    }
}
