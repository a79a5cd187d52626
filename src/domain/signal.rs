//! Long/flat signal generation from a short/long moving-average pair.
//!
//! The averages are lenient price moving averages, so they are defined from
//! the first bar; evaluation nonetheless starts at index `long_window` and
//! every earlier bar is Flat. (Two variants of this rule exist in the wild,
//! starting at the short or at the long window; this engine evaluates from
//! the long window.)

use super::indicator::sma::calculate_pma;
use super::ohlcv::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Flat = 0,
    Long = 1,
}

impl Signal {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// Per-bar signal state plus the moving averages it was derived from.
/// `position_changes[i]` is `signals[i] - signals[i-1]`: +1 opens a long
/// (buy at close), -1 closes it (sell at close); index 0 is always 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    pub short_ma: Vec<Option<f64>>,
    pub long_ma: Vec<Option<f64>>,
    pub signals: Vec<Signal>,
    pub position_changes: Vec<i8>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Compare the lenient short/long close-price averages bar by bar.
/// Callers guarantee `0 < short_window < long_window`; violating that does
/// not panic, it just produces a signal stream that never goes long sooner
/// than `long_window`.
pub fn generate_signals(bars: &[Bar], short_window: usize, long_window: usize) -> SignalSeries {
    let short_ma = calculate_pma(bars, short_window).simple_values();
    let long_ma = calculate_pma(bars, long_window).simple_values();

    let mut signals = Vec::with_capacity(bars.len());
    for i in 0..bars.len() {
        let signal = if i >= long_window {
            match (short_ma[i], long_ma[i]) {
                (Some(short), Some(long)) if short > long => Signal::Long,
                _ => Signal::Flat,
            }
        } else {
            Signal::Flat
        };
        signals.push(signal);
    }

    let mut position_changes = Vec::with_capacity(bars.len());
    for i in 0..signals.len() {
        if i == 0 {
            position_changes.push(0);
        } else {
            position_changes.push(signals[i].as_i8() - signals[i - 1].as_i8());
        }
    }

    SignalSeries {
        short_ma,
        long_ma,
        signals,
        position_changes,
    }
}
