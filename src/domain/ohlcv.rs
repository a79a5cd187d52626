//! OHLCV bar representation.

use chrono::NaiveDate;

use super::error::QuantlabError;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Verify the series invariant every rolling computation relies on: dates
/// strictly ascending (which also rules out duplicates).
pub fn check_ascending(bars: &[Bar]) -> Result<(), QuantlabError> {
    for i in 1..bars.len() {
        if bars[i].date <= bars[i - 1].date {
            return Err(QuantlabError::UnorderedDates { position: i });
        }
    }
    Ok(())
}

/// Verify close prices are finite; the backtest's accounting cannot recover
/// from a NaN flowing into the cumulative cash sum.
pub fn check_finite_closes(bars: &[Bar]) -> Result<(), QuantlabError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() {
            return Err(QuantlabError::NonNumeric {
                column: "close",
                position: i,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000.0,
        }
    }

    fn bar_on(day: u32) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            ..sample_bar()
        }
    }

    #[test]
    fn typical_price() {
        let bar = sample_bar();
        let expected = (110.0 + 90.0 + 105.0) / 3.0;
        assert!((bar.typical_price() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_hl_dominates() {
        let bar = sample_bar();
        // high-low=20, |high-100|=10, |low-100|=10 → 20
        assert!((bar.true_range(100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bar = sample_bar();
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((bar.true_range(70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_down() {
        let bar = sample_bar();
        // high-low=20, |110-130|=20, |90-130|=40 → 40
        assert!((bar.true_range(130.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ascending_dates_pass() {
        let bars = vec![bar_on(1), bar_on(2), bar_on(3)];
        assert!(check_ascending(&bars).is_ok());
    }

    #[test]
    fn duplicate_date_rejected() {
        let bars = vec![bar_on(1), bar_on(2), bar_on(2)];
        let err = check_ascending(&bars).unwrap_err();
        assert!(matches!(err, QuantlabError::UnorderedDates { position: 2 }));
    }

    #[test]
    fn descending_date_rejected() {
        let bars = vec![bar_on(5), bar_on(3)];
        assert!(check_ascending(&bars).is_err());
    }

    #[test]
    fn nan_close_rejected() {
        let mut bars = vec![bar_on(1), bar_on(2)];
        bars[1].close = f64::NAN;
        let err = check_finite_closes(&bars).unwrap_err();
        assert!(matches!(
            err,
            QuantlabError::NonNumeric {
                column: "close",
                position: 1
            }
        ));
    }

    #[test]
    fn empty_series_passes_checks() {
        assert!(check_ascending(&[]).is_ok());
        assert!(check_finite_closes(&[]).is_ok());
    }
}
