//! Period returns derived from an equity curve.
//!
//! `r[i] = equity[i+1] / equity[i] - 1`, taken only over consecutive pairs
//! where both values are finite and the earlier one is nonzero. Pairs that
//! fail that test are gaps and are dropped, so the output can be shorter
//! than `equity.len() - 1`.

pub fn compute(equity: &[f64]) -> Vec<f64> {
    equity
        .windows(2)
        .filter_map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if prev.is_finite() && curr.is_finite() && prev != 0.0 {
                Some(curr / prev - 1.0)
            } else {
                None
            }
        })
        .collect()
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
