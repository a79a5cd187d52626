//! Ichimoku Cloud.
//!
//! Conversion line: (max(high, conv) + min(low, conv)) / 2
//! Base line: same over the base period.
//! Leading span A: (conversion + base) / 2 shifted forward by displacement
//! bars, i.e. the value at index i was computed at i - displacement.
//! Leading span B: midpoint over the span-B period, shifted the same way.
//! Lagging span: low shifted backward, so the value at index i is
//! low[i + displacement], missing for the final displacement bars.

use super::rolling;
use super::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_CONVERSION: usize = 9;
pub const DEFAULT_BASE: usize = 26;
pub const DEFAULT_SPAN_B: usize = 52;
pub const DEFAULT_DISPLACEMENT: usize = 26;

pub fn calculate_ichimoku(
    bars: &[Bar],
    conversion_window: usize,
    base_window: usize,
    span_b_window: usize,
    displacement: usize,
) -> IndicatorSeries {
    let kind = IndicatorKind::Ichimoku {
        conversion: conversion_window,
        base: base_window,
        span_b: span_b_window,
        displacement,
    };

    let n = bars.len();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let conversion = midline(&highs, &lows, conversion_window);
    let base = midline(&highs, &lows, base_window);
    let span_b_raw = midline(&highs, &lows, span_b_window);

    let span_a_raw: Vec<f64> = conversion
        .iter()
        .zip(&base)
        .map(|(&c, &b)| (c + b) / 2.0)
        .collect();

    let points = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let span_a = shifted_back(&span_a_raw, i, displacement);
            let span_b = shifted_back(&span_b_raw, i, displacement);
            let lagging = if i + displacement < n {
                let v = lows[i + displacement];
                v.is_finite().then_some(v)
            } else {
                None
            };
            IndicatorPoint {
                date: bar.date,
                value: IndicatorValue::Ichimoku {
                    conversion: finite(conversion[i]),
                    base: finite(base[i]),
                    span_a,
                    span_b,
                    lagging,
                },
            }
        })
        .collect();

    IndicatorSeries { kind, points }
}

pub fn calculate_ichimoku_default(bars: &[Bar]) -> IndicatorSeries {
    calculate_ichimoku(
        bars,
        DEFAULT_CONVERSION,
        DEFAULT_BASE,
        DEFAULT_SPAN_B,
        DEFAULT_DISPLACEMENT,
    )
}

/// (rolling max of highs + rolling min of lows) / 2
fn midline(highs: &[f64], lows: &[f64], window: usize) -> Vec<f64> {
    let hi = rolling::rolling_max(highs, window);
    let lo = rolling::rolling_min(lows, window);
    hi.iter().zip(&lo).map(|(&h, &l)| (h + l) / 2.0).collect()
}

fn shifted_back(raw: &[f64], index: usize, displacement: usize) -> Option<f64> {
    index
        .checked_sub(displacement)
        .map(|j| raw[j])
        .and_then(finite)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
