//! Combining several strategy curves into one weighted portfolio curve.

use super::{returns, risk};
use std::collections::BTreeMap;

/// One named column of an equity-curve file.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCurve {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedCurve {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

pub type Weights = BTreeMap<String, f64>;

/// Clamps negative weights to 0 and rescales so the weights sum to 1.
///
/// If nothing positive is left the input comes back unchanged.
pub fn normalize_weights(weights: &Weights) -> Weights {
    let total: f64 = weights.values().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return weights.clone();
    }
    weights
        .iter()
        .map(|(k, w)| (k.clone(), w.max(0.0) / total))
        .collect()
}

/// Inverse-volatility weights, normalized to sum to 1.
///
/// A curve with no return dispersion gets weight 0. Returns an empty map
/// when every curve is flat.
pub fn risk_parity_weights(curves: &[NamedCurve]) -> Weights {
    let inverse_vol: Weights = curves
        .iter()
        .map(|c| {
            let finite: Vec<f64> = c
                .values
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect();
            let s = risk::std(&returns::compute(&finite));
            (c.name.clone(), if s > 0.0 { 1.0 / s } else { 0.0 })
        })
        .collect();

    let total: f64 = inverse_vol.values().sum();
    if total <= 0.0 {
        return Weights::new();
    }
    inverse_vol
        .into_iter()
        .map(|(k, v)| (k, v / total))
        .collect()
}

/// Weighted sum of curves, index by index.
///
/// Curves without a weight count as weight 0. At each index only curves with
/// a finite value contribute; if their weights sum to 0 the slot is a gap
/// (NaN). The result is as long as the longest curve.
pub fn combine(curves: &[NamedCurve], weights: &Weights) -> Vec<f64> {
    let len = curves.iter().map(|c| c.values.len()).max().unwrap_or(0);
    (0..len)
        .map(|i| {
            let mut sum = 0.0;
            let mut weight_sum = 0.0;
            for curve in curves {
                let w = weights.get(&curve.name).copied().unwrap_or(0.0);
                if let Some(&v) = curve.values.get(i) {
                    if v.is_finite() {
                        sum += w * v;
                        weight_sum += w;
                    }
                }
            }
            if weight_sum > 0.0 { sum } else { f64::NAN }
        })
        .collect()
}
