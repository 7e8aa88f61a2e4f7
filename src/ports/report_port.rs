//! Report output port trait.

use crate::domain::error::RiskscopeError;
use crate::domain::report::AnalysisReport;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), RiskscopeError>;
}
