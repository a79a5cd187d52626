//! Performance statistics derived from the portfolio walk.

use super::portfolio::PortfolioState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Performance {
    pub total_return: f64,
    pub annual_return: f64,
    pub max_drawdown: f64,
}

impl Performance {
    pub fn zeroed() -> Self {
        Performance {
            total_return: 0.0,
            annual_return: 0.0,
            max_drawdown: 0.0,
        }
    }

    /// Compute from a completed walk. Annualization uses the actual calendar
    /// span between the first and last bar (irregular calendars included),
    /// compounding over 365-day years; a single-bar series has no span and
    /// annualizes to 0.
    pub fn compute(states: &[PortfolioState], initial_capital: f64) -> Self {
        let (Some(first), Some(last)) = (states.first(), states.last()) else {
            return Performance::zeroed();
        };

        let total_return = if initial_capital > 0.0 {
            (last.total_equity - initial_capital) / initial_capital
        } else {
            0.0
        };

        let elapsed_days = (last.date - first.date).num_days();
        let annual_return = if elapsed_days > 0 && 1.0 + total_return > 0.0 {
            (1.0 + total_return).powf(365.0 / elapsed_days as f64) - 1.0
        } else {
            0.0
        };

        let max_drawdown = states
            .iter()
            .map(|s| s.drawdown)
            .fold(0.0_f64, f64::min);

        Performance {
            total_return,
            annual_return,
            max_drawdown,
        }
    }
}
