//! Rolling Sharpe and rolling max drawdown series over an equity curve.

use super::returns;
use super::risk;
use super::rolling::rolling;

/// Rolling annualized Sharpe (zero risk-free rate) over `window` returns.
///
/// The returns series is one element shorter than the curve it came from, so
/// a leading `None` is prepended: for a gap-free curve, slot `i` covers the
/// returns ending at equity index `i`. Slot 0 is always `None`.
pub fn rolling_sharpe(equity: &[f64], window: usize, periods_per_year: f64) -> Vec<Option<f64>> {
    if equity.is_empty() {
        return Vec::new();
    }
    let rets = returns::compute(equity);
    let mut out = Vec::with_capacity(rets.len() + 1);
    out.push(None);
    out.extend(rolling(&rets, window, |chunk| {
        risk::sharpe(chunk, 0.0, periods_per_year)
    }));
    out
}

/// Rolling max drawdown, as a positive percentage, over `window` equity values.
pub fn rolling_max_drawdown_pct(equity: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(equity, window, |chunk| risk::max_drawdown(chunk).abs() * 100.0)
}
