//! Report model handed to [`ReportPort`](crate::ports::report_port::ReportPort)
//! implementations.

use super::attribution::Attribution;
use super::candidate::CandidateResult;
use super::performance::PerformanceSummary;
use serde::Serialize;

/// An index-aligned output series. `None` marks a missing slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Wraps a dense curve; non-finite entries become missing slots.
    pub fn from_curve(name: impl Into<String>, curve: &[f64]) -> Self {
        Self::new(
            name,
            curve
                .iter()
                .map(|v| if v.is_finite() { Some(*v) } else { None })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSummary {
    pub name: String,
    pub summary: Option<PerformanceSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<CurveSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<NamedSeries>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frontier: Vec<CandidateResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attribution: Vec<Attribution>,
}

impl AnalysisReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(
        mut self,
        name: impl Into<String>,
        summary: Option<PerformanceSummary>,
    ) -> Self {
        self.summaries.push(CurveSummary {
            name: name.into(),
            summary,
        });
        self
    }

    pub fn with_series(mut self, series: NamedSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_frontier(mut self, frontier: Vec<CandidateResult>) -> Self {
        self.frontier = frontier;
        self
    }

    pub fn with_attribution(mut self, attribution: Vec<Attribution>) -> Self {
        self.attribution = attribution;
        self
    }

    /// Length of the longest series.
    pub fn series_len(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_curve_marks_gaps() {
        let s = NamedSeries::from_curve("eq", &[1.0, f64::NAN, 3.0]);
        assert_eq!(s.values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn builder_collects_sections() {
        let report = AnalysisReport::new("rolling")
            .with_series(NamedSeries::new("a", vec![None, Some(1.0)]))
            .with_series(NamedSeries::new("b", vec![Some(2.0)]));
        assert_eq!(report.title, "rolling");
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series_len(), 2);
        assert!(report.frontier.is_empty());
    }
}
