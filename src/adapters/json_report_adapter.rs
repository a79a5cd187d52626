//! JSON report adapter: serializes result objects to a file or stdout.

use crate::domain::error::QuantlabError;
use crate::domain::panel::IndicatorPanel;
use crate::domain::report::BacktestReport;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    fn write_value<T: Serialize>(
        &self,
        value: &T,
        output_path: Option<&Path>,
    ) -> Result<(), QuantlabError> {
        let json = serde_json::to_string_pretty(value).map_err(|e| QuantlabError::DataLoad {
            reason: format!("JSON serialization error: {}", e),
        })?;

        match output_path {
            Some(path) => fs::write(path, json.as_bytes())?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

impl ReportPort for JsonReportAdapter {
    fn write_backtest(
        &self,
        report: &BacktestReport,
        output_path: Option<&Path>,
    ) -> Result<(), QuantlabError> {
        self.write_value(report, output_path)
    }

    fn write_panel(
        &self,
        panel: &IndicatorPanel,
        output_path: Option<&Path>,
    ) -> Result<(), QuantlabError> {
        self.write_value(panel, output_path)
    }
}
