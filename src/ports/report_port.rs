//! Report output port trait.

use crate::domain::error::QuantlabError;
use crate::domain::panel::IndicatorPanel;
use crate::domain::report::BacktestReport;
use std::path::Path;

/// Port for writing result objects. Implementations own the output format;
/// `None` as the path means the adapter's default sink (e.g. stdout).
pub trait ReportPort {
    fn write_backtest(
        &self,
        report: &BacktestReport,
        output_path: Option<&Path>,
    ) -> Result<(), QuantlabError>;

    fn write_panel(
        &self,
        panel: &IndicatorPanel,
        output_path: Option<&Path>,
    ) -> Result<(), QuantlabError>;
}
