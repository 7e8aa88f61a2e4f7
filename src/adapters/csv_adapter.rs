//! CSV file data adapter.
//!
//! Curves files carry one curve per column under a header of curve names.
//! Candidates files carry one evaluated configuration per row; see
//! [`CsvAdapter::fetch_candidates`] for the column conventions.

use crate::domain::candidate::CandidateResult;
use crate::domain::error::RiskscopeError;
use crate::domain::portfolio::NamedCurve;
use crate::ports::data_port::DataPort;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const LABEL_COLUMNS: [&str; 4] = ["index", "date", "time", "timestamp"];
const PARAM_PREFIX: &str = "param.";

/// Display path, header row and data rows of one file.
type CsvTable = (String, csv::StringRecord, Vec<csv::StringRecord>);

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, source: &str) -> PathBuf {
        self.base_path.join(source)
    }

    fn read_records(&self, source: &str) -> Result<CsvTable, RiskscopeError> {
        let path = self.csv_path(source);
        let shown = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| RiskscopeError::DataRead {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| RiskscopeError::DataParse {
                path: shown.clone(),
                row: 0,
                reason: e.to_string(),
            })?
            .clone();

        let mut records = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| RiskscopeError::DataParse {
                path: shown.clone(),
                row: i + 1,
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        if headers.is_empty() || records.is_empty() {
            return Err(RiskscopeError::NoData {
                source_name: shown,
            });
        }
        tracing::debug!(path = %shown, rows = records.len(), "read csv");
        Ok((shown, headers, records))
    }
}

/// Empty, `NaN` and non-numeric cells all read as a gap.
fn parse_curve_cell(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.parse::<f64>().ok()).unwrap_or(f64::NAN)
}

/// `Ok(None)` for an empty cell, an error for anything non-numeric.
fn parse_candidate_cell(
    cell: Option<&str>,
    path: &str,
    row: usize,
    column: &str,
) -> Result<Option<f64>, RiskscopeError> {
    match cell {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<f64>().map(Some).map_err(|e| RiskscopeError::DataParse {
            path: path.to_string(),
            row,
            reason: format!("invalid {column} value {raw:?}: {e}"),
        }),
    }
}

impl DataPort for CsvAdapter {
    fn fetch_curves(&self, source: &str) -> Result<Vec<NamedCurve>, RiskscopeError> {
        let (_, headers, records) = self.read_records(source)?;

        let skip_label = headers
            .get(0)
            .is_some_and(|h| LABEL_COLUMNS.contains(&h.to_lowercase().as_str()));
        let first = usize::from(skip_label);

        let curves: Vec<NamedCurve> = headers
            .iter()
            .enumerate()
            .skip(first)
            .map(|(col, name)| {
                let values = records
                    .iter()
                    .map(|r| parse_curve_cell(r.get(col)))
                    .collect();
                NamedCurve::new(name, values)
            })
            .collect();

        if curves.is_empty() {
            return Err(RiskscopeError::NoData {
                source_name: self.csv_path(source).display().to_string(),
            });
        }
        Ok(curves)
    }

    /// Column conventions:
    /// - `id`: optional row label
    /// - `profit`, `sharpe`, `max_dd` (or `maxDD`, `max_drawdown`): scores,
    ///   NaN when empty
    /// - `param.<name>`: parameter value; an empty cell means the row does
    ///   not carry that parameter
    /// - anything else: extra numeric score, skipped when empty
    fn fetch_candidates(&self, source: &str) -> Result<Vec<CandidateResult>, RiskscopeError> {
        let (path, headers, records) = self.read_records(source)?;

        let mut candidates = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let row = i + 1;
            let mut candidate = CandidateResult {
                profit: f64::NAN,
                sharpe: f64::NAN,
                max_dd: f64::NAN,
                ..CandidateResult::default()
            };
            let mut indicators = BTreeMap::new();

            for (col, header) in headers.iter().enumerate() {
                let cell = record.get(col);
                if header == "id" {
                    candidate.id = cell.filter(|c| !c.is_empty()).map(String::from);
                    continue;
                }
                let value = parse_candidate_cell(cell, &path, row, header)?;
                match header {
                    "profit" => candidate.profit = value.unwrap_or(f64::NAN),
                    "sharpe" => candidate.sharpe = value.unwrap_or(f64::NAN),
                    "max_dd" | "maxDD" | "max_drawdown" => {
                        candidate.max_dd = value.unwrap_or(f64::NAN)
                    }
                    other => {
                        let Some(v) = value else { continue };
                        match other.strip_prefix(PARAM_PREFIX) {
                            Some(name) => {
                                indicators.insert(name.to_string(), v);
                            }
                            None => {
                                candidate.extra.insert(other.to_string(), v);
                            }
                        }
                    }
                }
            }

            candidate.indicators = indicators;
            candidates.push(candidate);
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn adapter_with(files: &[(&str, &str)]) -> (TempDir, CsvAdapter) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        (dir, adapter)
    }

    #[test]
    fn curves_skip_label_column_and_read_gaps() {
        let (_dir, adapter) = adapter_with(&[(
            "curves.csv",
            "date,alpha,beta\n2024-01-01,100,200\n2024-01-02,,210\n2024-01-03,NaN,n/a\n",
        )]);
        let curves = adapter.fetch_curves("curves.csv").unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].name, "alpha");
        assert_eq!(curves[0].values[0], 100.0);
        assert!(curves[0].values[1].is_nan());
        assert!(curves[0].values[2].is_nan());
        assert_eq!(&curves[1].values[..2], &[200.0, 210.0]);
        assert!(curves[1].values[2].is_nan());
    }

    #[test]
    fn curves_without_label_column() {
        let (_dir, adapter) = adapter_with(&[("c.csv", "only\n1\n2\n")]);
        let curves = adapter.fetch_curves("c.csv").unwrap();
        assert_eq!(curves, vec![NamedCurve::new("only", vec![1.0, 2.0])]);
    }

    #[test]
    fn ragged_rows_pad_with_gaps() {
        let (_dir, adapter) = adapter_with(&[("c.csv", "a,b\n1,2\n3\n")]);
        let curves = adapter.fetch_curves("c.csv").unwrap();
        assert_eq!(curves[0].values, vec![1.0, 3.0]);
        assert!(curves[1].values[1].is_nan());
    }

    #[test]
    fn fetch_curve_by_name() {
        let (_dir, adapter) = adapter_with(&[("c.csv", "a,b\n1,2\n")]);
        assert_eq!(adapter.fetch_curve("c.csv", "b").unwrap().values, vec![2.0]);
        assert!(matches!(
            adapter.fetch_curve("c.csv", "z"),
            Err(RiskscopeError::NoData { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let (_dir, adapter) = adapter_with(&[]);
        assert!(matches!(
            adapter.fetch_curves("nope.csv"),
            Err(RiskscopeError::DataRead { .. })
        ));
    }

    #[test]
    fn header_only_is_no_data() {
        let (_dir, adapter) = adapter_with(&[("c.csv", "a,b\n")]);
        assert!(matches!(
            adapter.fetch_curves("c.csv"),
            Err(RiskscopeError::NoData { .. })
        ));
    }

    #[test]
    fn candidates_map_columns() {
        let (_dir, adapter) = adapter_with(&[(
            "cands.csv",
            "id,param.fast,param.slow,profit,sharpe,maxDD,winrate\n\
             run-1,10,50,1200.5,1.4,8.0,0.55\n\
             run-2,12,,900,1.1,6.5,\n",
        )]);
        let cands = adapter.fetch_candidates("cands.csv").unwrap();
        assert_eq!(cands.len(), 2);

        assert_eq!(cands[0].id.as_deref(), Some("run-1"));
        assert_eq!(cands[0].indicators["fast"], 10.0);
        assert_eq!(cands[0].indicators["slow"], 50.0);
        assert_eq!(cands[0].profit, 1200.5);
        assert_eq!(cands[0].sharpe, 1.4);
        assert_eq!(cands[0].max_dd, 8.0);
        assert_eq!(cands[0].extra["winrate"], 0.55);

        assert!(!cands[1].indicators.contains_key("slow"));
        assert!(!cands[1].extra.contains_key("winrate"));
    }

    #[test]
    fn candidates_missing_score_is_nan() {
        let (_dir, adapter) = adapter_with(&[("c.csv", "param.x,profit\n1,\n")]);
        let cands = adapter.fetch_candidates("c.csv").unwrap();
        assert!(cands[0].profit.is_nan());
        assert!(cands[0].sharpe.is_nan());
    }

    #[test]
    fn candidates_reject_non_numeric() {
        let (_dir, adapter) = adapter_with(&[("c.csv", "param.x,profit\nfast,1\n")]);
        assert!(matches!(
            adapter.fetch_candidates("c.csv"),
            Err(RiskscopeError::DataParse { row: 1, .. })
        ));
    }
}
