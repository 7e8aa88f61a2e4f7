//! Headline performance figures for a single equity curve.

use super::{returns, risk};
use serde::Serialize;

/// Percent-denominated summary of a curve, as shown in portfolio reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_return_pct: f64,
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe: f64,
    pub calmar: f64,
}

/// Summarizes the finite values of `equity`.
///
/// Needs at least three finite values; anything shorter gives `None`.
pub fn summarize(
    equity: &[f64],
    risk_free_rate: f64,
    periods_per_year: f64,
) -> Option<PerformanceSummary> {
    let clean: Vec<f64> = equity.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.len() <= 2 {
        return None;
    }

    let rets = returns::compute(&clean);
    let first = clean[0];
    let last = clean[clean.len() - 1];
    let total_return_pct = if first != 0.0 {
        (last / first - 1.0) * 100.0
    } else {
        0.0
    };

    Some(PerformanceSummary {
        total_return_pct,
        volatility_pct: risk::annualized_volatility(&rets, periods_per_year) * 100.0,
        max_drawdown_pct: risk::max_drawdown(&clean).abs() * 100.0,
        sharpe: risk::sharpe(&rets, risk_free_rate, periods_per_year),
        calmar: risk::calmar(&clean, periods_per_year),
    })
}
