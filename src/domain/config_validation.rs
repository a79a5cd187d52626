//! Caller-side request validation.
//!
//! These checks run in the adapter/CLI layer before the core is invoked:
//! the engine itself assumes windows and capital were validated and only
//! guards what its own accounting depends on.

use chrono::NaiveDate;

use super::error::QuantlabError;
use super::strategy::{DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW, MA_CROSS};
use crate::ports::config_port::ConfigPort;

/// One fully-parsed backtest request.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub short_window: usize,
    pub long_window: usize,
    pub initial_capital: f64,
    pub strategy: String,
}

impl BacktestRequest {
    /// Bars the data layer must supply before the engine runs.
    pub fn min_bars(&self) -> usize {
        2 * self.long_window
    }
}

pub fn backtest_request_from_config(
    config: &dyn ConfigPort,
) -> Result<BacktestRequest, QuantlabError> {
    let start_date = require_date(config, "start_date")?;
    let end_date = require_date(config, "end_date")?;

    let short_window = require_positive_int(config, "short_window", DEFAULT_SHORT_WINDOW)?;
    let long_window = require_positive_int(config, "long_window", DEFAULT_LONG_WINDOW)?;

    let initial_capital = config.get_double("backtest", "initial_capital", 100_000.0);
    let strategy = config
        .get_string("backtest", "strategy")
        .unwrap_or_else(|| MA_CROSS.to_string());

    Ok(BacktestRequest {
        start_date,
        end_date,
        short_window,
        long_window,
        initial_capital,
        strategy,
    })
}

/// Reject inverted or future-dated ranges; shared by the backtest and
/// indicator request paths.
pub fn validate_date_range(
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), QuantlabError> {
    if start_date > end_date {
        return Err(QuantlabError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "start_date must not be after end_date".into(),
        });
    }
    if end_date > today {
        return Err(QuantlabError::ConfigInvalid {
            section: "backtest".into(),
            key: "end_date".into(),
            reason: "end_date must not be in the future".into(),
        });
    }
    Ok(())
}

/// Reject a request the core must never see: inverted dates, dates in the
/// future, inverted windows, non-positive capital.
pub fn validate_backtest_request(
    request: &BacktestRequest,
    today: NaiveDate,
) -> Result<(), QuantlabError> {
    validate_date_range(request.start_date, request.end_date, today)?;
    if request.short_window == 0 || request.short_window >= request.long_window {
        return Err(QuantlabError::InvalidWindows {
            short_window: request.short_window,
            long_window: request.long_window,
        });
    }
    if request.initial_capital <= 0.0 {
        return Err(QuantlabError::ConfigInvalid {
            section: "backtest".into(),
            key: "initial_capital".into(),
            reason: "initial_capital must be positive".into(),
        });
    }
    Ok(())
}

/// The `[backtest]` date range, for request paths that need nothing else.
pub fn date_range_from_config(
    config: &dyn ConfigPort,
) -> Result<(NaiveDate, NaiveDate), QuantlabError> {
    Ok((
        require_date(config, "start_date")?,
        require_date(config, "end_date")?,
    ))
}

fn require_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, QuantlabError> {
    let value = config
        .get_string("backtest", key)
        .ok_or_else(|| QuantlabError::ConfigMissing {
            section: "backtest".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| QuantlabError::ConfigInvalid {
        section: "backtest".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn require_positive_int(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<usize, QuantlabError> {
    let value = config.get_int("backtest", key, default as i64);
    if value <= 0 {
        return Err(QuantlabError::ConfigInvalid {
            section: "backtest".into(),
            key: key.into(),
            reason: "must be a positive integer".into(),
        });
    }
    Ok(value as usize)
}
