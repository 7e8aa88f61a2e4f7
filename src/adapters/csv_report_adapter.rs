//! CSV report adapter implementing ReportPort.
//!
//! Each non-empty report section becomes one CSV table; tables are separated
//! by a blank line. Missing series slots are written as empty cells.

use std::collections::BTreeSet;
use std::fs;

use crate::domain::error::RiskscopeError;
use crate::domain::report::AnalysisReport;
use crate::ports::report_port::ReportPort;

fn report_err(e: impl std::fmt::Display) -> RiskscopeError {
    RiskscopeError::Report {
        reason: e.to_string(),
    }
}

fn fmt_value(v: f64) -> String {
    if v.is_finite() { v.to_string() } else { String::new() }
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, RiskscopeError> {
    let bytes = wtr.into_inner().map_err(report_err)?;
    String::from_utf8(bytes).map_err(report_err)
}

fn summaries_table(report: &AnalysisReport) -> Result<String, RiskscopeError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "curve",
        "total_return_pct",
        "volatility_pct",
        "max_drawdown_pct",
        "sharpe",
        "calmar",
    ])
    .map_err(report_err)?;
    for entry in &report.summaries {
        let mut row = vec![entry.name.clone()];
        match &entry.summary {
            Some(s) => row.extend(
                [
                    s.total_return_pct,
                    s.volatility_pct,
                    s.max_drawdown_pct,
                    s.sharpe,
                    s.calmar,
                ]
                .map(fmt_value),
            ),
            None => row.extend(std::iter::repeat_n(String::new(), 5)),
        }
        wtr.write_record(&row).map_err(report_err)?;
    }
    finish(wtr)
}

fn series_table(report: &AnalysisReport) -> Result<String, RiskscopeError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["index".to_string()];
    header.extend(report.series.iter().map(|s| s.name.clone()));
    wtr.write_record(&header).map_err(report_err)?;

    for i in 0..report.series_len() {
        let mut row = vec![i.to_string()];
        row.extend(report.series.iter().map(|s| {
            s.values
                .get(i)
                .copied()
                .flatten()
                .map(fmt_value)
                .unwrap_or_default()
        }));
        wtr.write_record(&row).map_err(report_err)?;
    }
    finish(wtr)
}

fn frontier_table(report: &AnalysisReport) -> Result<String, RiskscopeError> {
    let params: BTreeSet<&String> = report
        .frontier
        .iter()
        .flat_map(|c| c.indicators.keys())
        .collect();
    let extras: BTreeSet<&String> = report
        .frontier
        .iter()
        .flat_map(|c| c.extra.keys())
        .collect();

    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["id".to_string()];
    header.extend(params.iter().map(|p| format!("param.{p}")));
    header.extend(["profit", "sharpe", "max_dd"].map(String::from));
    header.extend(extras.iter().map(|e| e.to_string()));
    wtr.write_record(&header).map_err(report_err)?;

    for c in &report.frontier {
        let mut row = vec![c.id.clone().unwrap_or_default()];
        row.extend(
            params
                .iter()
                .map(|p| c.indicators.get(*p).copied().map(fmt_value).unwrap_or_default()),
        );
        row.extend([c.profit, c.sharpe, c.max_dd].map(fmt_value));
        row.extend(
            extras
                .iter()
                .map(|e| c.extra.get(*e).copied().map(fmt_value).unwrap_or_default()),
        );
        wtr.write_record(&row).map_err(report_err)?;
    }
    finish(wtr)
}

fn attribution_table(report: &AnalysisReport) -> Result<String, RiskscopeError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["parameter", "coefficient", "weight"])
        .map_err(report_err)?;
    for a in &report.attribution {
        wtr.write_record([
            a.parameter_key.clone(),
            fmt_value(a.coefficient),
            fmt_value(a.normalized_weight),
        ])
        .map_err(report_err)?;
    }
    finish(wtr)
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Renders every non-empty section, in a fixed order.
    pub fn render(&self, report: &AnalysisReport) -> Result<String, RiskscopeError> {
        let mut tables = Vec::new();
        if !report.summaries.is_empty() {
            tables.push(summaries_table(report)?);
        }
        if !report.series.is_empty() {
            tables.push(series_table(report)?);
        }
        if !report.frontier.is_empty() {
            tables.push(frontier_table(report)?);
        }
        if !report.attribution.is_empty() {
            tables.push(attribution_table(report)?);
        }
        Ok(tables.join("\n"))
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), RiskscopeError> {
        let content = self.render(report)?;
        fs::write(output_path, content).map_err(|e| RiskscopeError::Report {
            reason: format!("failed to write {output_path}: {e}"),
        })?;
        tracing::info!(path = output_path, title = %report.title, "wrote csv report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attribution::Attribution;
    use crate::domain::candidate::CandidateResult;
    use crate::domain::performance::PerformanceSummary;
    use crate::domain::report::NamedSeries;
    use std::collections::BTreeMap;

    #[test]
    fn series_with_missing_slots() {
        let report = AnalysisReport::new("rolling")
            .with_series(NamedSeries::new("sharpe", vec![None, Some(1.5), Some(2.0)]))
            .with_series(NamedSeries::new("mdd", vec![None, None]));
        let out = CsvReportAdapter::new().render(&report).unwrap();
        assert_eq!(out, "index,sharpe,mdd\n0,,\n1,1.5,\n2,2,\n");
    }

    #[test]
    fn attribution_rows() {
        let report = AnalysisReport::new("attr").with_attribution(vec![Attribution {
            parameter_key: "fast".into(),
            coefficient: -0.5,
            normalized_weight: 1.0,
        }]);
        let out = CsvReportAdapter::new().render(&report).unwrap();
        assert_eq!(out, "parameter,coefficient,weight\nfast,-0.5,1\n");
    }

    #[test]
    fn frontier_columns_union() {
        let mut a = CandidateResult::new(
            BTreeMap::from([("fast".to_string(), 5.0)]),
            10.0,
            1.0,
            2.0,
        );
        a.id = Some("a".into());
        let mut b = CandidateResult::new(
            BTreeMap::from([("slow".to_string(), 20.0)]),
            8.0,
            f64::NAN,
            1.0,
        );
        b.extra.insert("winrate".into(), 0.5);
        let report = AnalysisReport::new("pareto").with_frontier(vec![a, b]);
        let out = CsvReportAdapter::new().render(&report).unwrap();
        assert_eq!(
            out,
            "id,param.fast,param.slow,profit,sharpe,max_dd,winrate\n\
             a,5,,10,1,2,\n\
             ,,20,8,,1,0.5\n"
        );
    }

    #[test]
    fn sections_separated_by_blank_line() {
        let summary = PerformanceSummary {
            total_return_pct: 10.0,
            volatility_pct: 20.0,
            max_drawdown_pct: 5.0,
            sharpe: 1.0,
            calmar: 2.0,
        };
        let report = AnalysisReport::new("metrics")
            .with_summary("eq", Some(summary))
            .with_summary("short", None)
            .with_series(NamedSeries::new("eq", vec![Some(100.0)]));
        let out = CsvReportAdapter::new().render(&report).unwrap();
        assert_eq!(
            out,
            "curve,total_return_pct,volatility_pct,max_drawdown_pct,sharpe,calmar\n\
             eq,10,20,5,1,2\n\
             short,,,,,\n\
             \n\
             index,eq\n\
             0,100\n"
        );
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let report = AnalysisReport::new("x").with_series(NamedSeries::new("a", vec![Some(1.0)]));
        CsvReportAdapter::new()
            .write(&report, path.to_str().unwrap())
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "index,a\n0,1\n");
    }
}
