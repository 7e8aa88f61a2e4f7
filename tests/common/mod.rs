#![allow(dead_code)]

use riskscope::domain::candidate::CandidateResult;
use riskscope::domain::error::RiskscopeError;
pub use riskscope::domain::portfolio::NamedCurve;
use riskscope::ports::data_port::DataPort;
use std::collections::{BTreeMap, HashMap};

pub struct MockDataPort {
    pub curves: HashMap<String, Vec<NamedCurve>>,
    pub candidates: HashMap<String, Vec<CandidateResult>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            curves: HashMap::new(),
            candidates: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_curves(mut self, source: &str, curves: Vec<NamedCurve>) -> Self {
        self.curves.insert(source.to_string(), curves);
        self
    }

    pub fn with_candidates(mut self, source: &str, candidates: Vec<CandidateResult>) -> Self {
        self.candidates.insert(source.to_string(), candidates);
        self
    }

    pub fn with_error(mut self, source: &str, reason: &str) -> Self {
        self.errors.insert(source.to_string(), reason.to_string());
        self
    }

    fn check_error(&self, source: &str) -> Result<(), RiskscopeError> {
        match self.errors.get(source) {
            Some(reason) => Err(RiskscopeError::DataRead {
                path: source.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl DataPort for MockDataPort {
    fn fetch_curves(&self, source: &str) -> Result<Vec<NamedCurve>, RiskscopeError> {
        self.check_error(source)?;
        self.curves
            .get(source)
            .cloned()
            .ok_or_else(|| RiskscopeError::NoData {
                source_name: source.to_string(),
            })
    }

    fn fetch_candidates(&self, source: &str) -> Result<Vec<CandidateResult>, RiskscopeError> {
        self.check_error(source)?;
        self.candidates
            .get(source)
            .cloned()
            .ok_or_else(|| RiskscopeError::NoData {
                source_name: source.to_string(),
            })
    }
}

/// Equity curve compounding `returns` from `start`.
pub fn compound(start: f64, returns: &[f64]) -> Vec<f64> {
    let mut equity = vec![start];
    for r in returns {
        let last = equity[equity.len() - 1];
        equity.push(last * (1.0 + r));
    }
    equity
}

/// Deterministic alternating returns around `drift` with amplitude `swing`.
pub fn wobble_returns(n: usize, drift: f64, swing: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let sign = if i % 3 == 0 { -1.0 } else { 1.0 };
            drift + sign * swing * (1.0 + (i % 5) as f64 / 5.0)
        })
        .collect()
}

pub fn make_curve(name: &str, n: usize, drift: f64, swing: f64) -> NamedCurve {
    NamedCurve::new(name, compound(100.0, &wobble_returns(n, drift, swing)))
}

pub fn make_candidate(
    params: &[(&str, f64)],
    profit: f64,
    sharpe: f64,
    max_dd: f64,
) -> CandidateResult {
    let indicators: BTreeMap<String, f64> = params
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
    CandidateResult::new(indicators, profit, sharpe, max_dd)
}

/// Grid over `fast` and `slow` where profit depends strongly on `fast`
/// and weakly on `slow`.
pub fn sample_grid() -> Vec<CandidateResult> {
    let mut out = Vec::new();
    for fast in [5.0, 10.0, 15.0, 20.0] {
        for slow in [50.0, 100.0, 150.0] {
            let profit = 40.0 * fast + 0.5 * slow + (fast * slow) % 7.0;
            let sharpe = 0.05 * fast + 0.001 * slow;
            let max_dd = 30.0 - fast * 0.5 + slow * 0.02;
            out.push(make_candidate(&[("fast", fast), ("slow", slow)], profit, sharpe, max_dd));
        }
    }
    out
}
