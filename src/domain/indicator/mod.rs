//! Technical indicator implementations.
//!
//! Types for representing indicator values and series:
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorValue`: enum for different indicator output shapes
//! - `IndicatorKind`: indicator identity + parameters (serves as a map key)
//! - `IndicatorSeries`: a date-aligned series of indicator values
//!
//! Every calculation returns one output point per input bar; a value that is
//! undefined (warm-up, zero denominator, degraded input) is `None`, never
//! zero. Empty input always produces an empty series.

pub mod rolling;

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod macd;
pub mod bollinger;
pub mod atr;
pub mod stochastic;
pub mod obv;
pub mod volume;
pub mod ichimoku;

use chrono::NaiveDate;
use std::fmt;

use super::ohlcv::Bar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(Option<f64>),
    Macd {
        line: Option<f64>,
        signal: Option<f64>,
        histogram: Option<f64>,
    },
    Stochastic {
        k: Option<f64>,
        d: Option<f64>,
    },
    Bollinger {
        upper: Option<f64>,
        middle: Option<f64>,
        lower: Option<f64>,
    },
    Ichimoku {
        conversion: Option<f64>,
        base: Option<f64>,
        span_a: Option<f64>,
        span_b: Option<f64>,
        lagging: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Pma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        window: usize,
        stddev_mult_x100: u32,
    },
    Atr(usize),
    Stochastic {
        k_window: usize,
        d_window: usize,
    },
    Obv,
    Vma(usize),
    Vr(usize),
    Mfi(usize),
    Ichimoku {
        conversion: usize,
        base: usize,
        span_b: usize,
        displacement: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Extract the scalar values of a single-valued series; multi-valued
    /// points yield `None`.
    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| match p.value {
                IndicatorValue::Simple(v) => v,
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(window) => write!(f, "SMA({})", window),
            IndicatorKind::Pma(window) => write!(f, "PMA({})", window),
            IndicatorKind::Ema(window) => write!(f, "EMA({})", window),
            IndicatorKind::Rsi(window) => write!(f, "RSI({})", window),
            IndicatorKind::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorKind::Bollinger {
                window,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", window, mult)
            }
            IndicatorKind::Atr(window) => write!(f, "ATR({})", window),
            IndicatorKind::Stochastic { k_window, d_window } => {
                write!(f, "STOCHASTIC({},{})", k_window, d_window)
            }
            IndicatorKind::Obv => write!(f, "OBV"),
            IndicatorKind::Vma(window) => write!(f, "VMA({})", window),
            IndicatorKind::Vr(window) => write!(f, "VR({})", window),
            IndicatorKind::Mfi(window) => write!(f, "MFI({})", window),
            IndicatorKind::Ichimoku {
                conversion,
                base,
                span_b,
                displacement,
            } => write!(
                f,
                "ICHIMOKU({},{},{},{})",
                conversion, base, span_b, displacement
            ),
        }
    }
}

/// Compute the series for an indicator requested by kind.
pub fn compute(bars: &[Bar], kind: &IndicatorKind) -> IndicatorSeries {
    match *kind {
        IndicatorKind::Sma(window) => sma::calculate_sma(bars, window),
        IndicatorKind::Pma(window) => sma::calculate_pma(bars, window),
        IndicatorKind::Ema(window) => ema::calculate_ema(bars, window),
        IndicatorKind::Rsi(window) => rsi::calculate_rsi(bars, window),
        IndicatorKind::Macd { fast, slow, signal } => {
            macd::calculate_macd(bars, fast, slow, signal)
        }
        IndicatorKind::Bollinger {
            window,
            stddev_mult_x100,
        } => bollinger::calculate_bollinger(bars, window, stddev_mult_x100),
        IndicatorKind::Atr(window) => atr::calculate_atr(bars, window),
        IndicatorKind::Stochastic { k_window, d_window } => {
            stochastic::calculate_stochastic(bars, k_window, d_window)
        }
        IndicatorKind::Obv => obv::calculate_obv(bars),
        IndicatorKind::Vma(window) => volume::calculate_vma(bars, window),
        IndicatorKind::Vr(window) => volume::calculate_vr(bars, window),
        IndicatorKind::Mfi(window) => volume::calculate_mfi(bars, window),
        IndicatorKind::Ichimoku {
            conversion,
            base,
            span_b,
            displacement,
        } => ichimoku::calculate_ichimoku(bars, conversion, base, span_b, displacement),
    }
}

/// Wrap a raw value column (NaN = missing) into a date-aligned simple series.
pub(crate) fn simple_series(kind: IndicatorKind, bars: &[Bar], values: Vec<f64>) -> IndicatorSeries {
    debug_assert_eq!(bars.len(), values.len());
    let points = bars
        .iter()
        .zip(values)
        .map(|(bar, v)| IndicatorPoint {
            date: bar.date,
            value: IndicatorValue::Simple(v.is_finite().then_some(v)),
        })
        .collect();
    IndicatorSeries { kind, points }
}

pub(crate) fn close_values(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

pub(crate) fn volume_values(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}
