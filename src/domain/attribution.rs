//! Ridge-regression parameter attribution.
//!
//! Ranks which parameters move an outcome score across a batch of evaluated
//! configurations. Parameters and the score are z-scored, a ridge model
//! `β = (XᵗX + λI)⁻¹ Xᵗy` is fitted, and each parameter's weight is its
//! `|β|` relative to the largest. This is a linear proxy for influence, not a
//! causal estimate.
//!
//! A sample that lacks a parameter (or carries a non-finite value for it) is
//! left out of that parameter's mean and std, and contributes 0 to that
//! column after standardization. The score column is handled the same way.

use super::candidate::{CandidateResult, Scored};
use super::linalg;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use std::collections::HashSet;

/// Denominators below this are treated as zero when normalizing weights.
const WEIGHT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribution {
    pub parameter_key: String,
    pub coefficient: f64,
    pub normalized_weight: f64,
}

/// Mean and population std over the finite entries, std floored to 1 when
/// the column has no spread.
struct ZScore {
    mean: f64,
    std: f64,
}

impl ZScore {
    fn fit(values: &[Option<f64>]) -> Self {
        let finite: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return Self { mean: 0.0, std: 1.0 };
        }
        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let std = (finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        let std = if std > 0.0 { std } else { 1.0 };
        Self { mean, std }
    }

    fn apply(&self, value: Option<f64>) -> f64 {
        match value {
            Some(v) if v.is_finite() => (v - self.mean) / self.std,
            _ => 0.0,
        }
    }
}

/// Parameter keys across all samples, in first-seen order.
pub fn parameter_keys(samples: &[CandidateResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for sample in samples {
        for key in sample.indicators.keys() {
            if seen.insert(key.as_str()) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Fits the ridge model and returns one entry per parameter key, sorted by
/// descending weight. Returns an empty vec when there are no samples or no
/// parameter keys.
pub fn ridge_attribution(
    samples: &[CandidateResult],
    score_key: &str,
    lambda: f64,
) -> Vec<Attribution> {
    if samples.is_empty() {
        return Vec::new();
    }
    let keys = parameter_keys(samples);
    if keys.is_empty() {
        tracing::debug!(samples = samples.len(), "no parameter keys, nothing to attribute");
        return Vec::new();
    }

    let columns: Vec<Vec<Option<f64>>> = keys
        .iter()
        .map(|k| samples.iter().map(|s| s.indicators.get(k).copied()).collect())
        .collect();
    let scalers: Vec<ZScore> = columns.iter().map(|c| ZScore::fit(c)).collect();

    let raw_y: Vec<Option<f64>> = samples.iter().map(|s| s.score(score_key)).collect();
    let y_scaler = ZScore::fit(&raw_y);
    let y = DVector::from_iterator(raw_y.len(), raw_y.iter().map(|v| y_scaler.apply(*v)));
    let x = DMatrix::from_fn(samples.len(), keys.len(), |row, col| {
        scalers[col].apply(columns[col][row])
    });

    let beta = linalg::ridge_coefficients(&x, &y, lambda);

    let max_abs = beta.iter().map(|b| b.abs()).fold(0.0_f64, f64::max);
    let denom = if max_abs > WEIGHT_EPSILON { max_abs } else { 1.0 };

    let mut out: Vec<Attribution> = keys
        .into_iter()
        .zip(beta.iter().copied())
        .map(|(parameter_key, coefficient)| Attribution {
            parameter_key,
            coefficient,
            normalized_weight: coefficient.abs() / denom,
        })
        .collect();
    out.sort_by(|a, b| b.normalized_weight.total_cmp(&a.normalized_weight));
    out
}
