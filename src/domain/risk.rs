//! Scalar risk metrics over equity curves and return series.
//!
//! Every function degrades to a neutral value (0) on degenerate input rather
//! than producing NaN or infinity.

use super::returns;

/// Population standard deviation (divides by n). Empty input yields 0.
pub fn std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Most negative drawdown from the running peak, as a fraction (`-0.25` is a
/// 25% decline). Non-finite entries are skipped. While the peak is not
/// positive the drawdown is taken as 0.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for &value in equity.iter().filter(|v| v.is_finite()) {
        if value > peak {
            peak = value;
        }
        let dd = if peak > 0.0 { value / peak - 1.0 } else { 0.0 };
        if dd < max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

/// Annualized Sharpe ratio of a return series.
///
/// The annual `risk_free_rate` is spread evenly across `periods_per_year`.
/// Returns 0 when the excess returns have no dispersion.
pub fn sharpe(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    let per_period_rf = risk_free_rate / periods_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - per_period_rf).collect();

    let stddev = std(&excess);
    if stddev == 0.0 {
        return 0.0;
    }
    periods_per_year.sqrt() * returns::mean(&excess) / stddev
}

/// Annualized mean period return over the magnitude of the max drawdown.
pub fn calmar(equity: &[f64], periods_per_year: f64) -> f64 {
    let mdd = max_drawdown(equity).abs();
    if mdd == 0.0 {
        return 0.0;
    }
    let annual_return = returns::mean(&returns::compute(equity)) * periods_per_year;
    annual_return / mdd
}

pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    std(returns) * periods_per_year.sqrt()
}
