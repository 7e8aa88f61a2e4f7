//! JSON report adapter implementing ReportPort.
//!
//! Serializes the whole [`AnalysisReport`]. Missing series slots and
//! non-finite numbers come out as `null`.

use std::fs;

use crate::domain::error::RiskscopeError;
use crate::domain::report::AnalysisReport;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter {
    pretty: bool,
}

impl JsonReportAdapter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn render(&self, report: &AnalysisReport) -> Result<String, RiskscopeError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| RiskscopeError::Report {
            reason: format!("failed to serialize report: {e}"),
        })
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), RiskscopeError> {
        let content = self.render(report)?;
        fs::write(output_path, content).map_err(|e| RiskscopeError::Report {
            reason: format!("failed to write {output_path}: {e}"),
        })?;
        tracing::info!(path = output_path, title = %report.title, "wrote json report");
        Ok(())
    }
}
