//! Chart-ready indicator panel: the volume/price indicator bundle computed
//! for one symbol at once.
//!
//! Every array has the same length as the input series; missing values
//! serialize as `null`. Per-window series are flattened into keys like
//! `pma_20` and `vma_5`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::indicator::{obv, sma, volume};
use super::ohlcv::Bar;
use super::report::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPanel {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    pub obv: Vec<Option<f64>>,
    pub vr: Vec<Option<f64>>,
    pub mfi: Vec<Option<f64>>,
    #[serde(flatten)]
    pub vma: BTreeMap<String, Vec<Option<f64>>>,
    #[serde(flatten)]
    pub pma: BTreeMap<String, Vec<Option<f64>>>,
}

/// Compute the panel for the requested price and volume MA windows. VR and
/// MFI use their default windows; OBV has none.
pub fn indicator_panel(bars: &[Bar], ma_windows: &[usize], vma_windows: &[usize]) -> IndicatorPanel {
    let mut vma = BTreeMap::new();
    for &window in vma_windows {
        vma.insert(
            format!("vma_{}", window),
            volume::calculate_vma(bars, window).simple_values(),
        );
    }

    let mut pma = BTreeMap::new();
    for &window in ma_windows {
        pma.insert(
            format!("pma_{}", window),
            sma::calculate_pma(bars, window).simple_values(),
        );
    }

    IndicatorPanel {
        dates: bars.iter().map(|b| b.date).collect(),
        close: bars.iter().map(|b| round2(b.close)).collect(),
        volume: bars.iter().map(|b| b.volume).collect(),
        obv: obv::calculate_obv(bars).simple_values(),
        vr: volume::calculate_vr(bars, volume::DEFAULT_VR_WINDOW).simple_values(),
        mfi: volume::calculate_mfi(bars, volume::DEFAULT_MFI_WINDOW).simple_values(),
        vma,
        pma,
    }
}
