//! Volatility targeting: rescale a curve's period returns so that realized
//! annualized volatility tracks a target level.

use super::risk;
use super::rolling::rolling;

/// Rebuilds `equity` with each period return scaled by
/// `target_annual_vol / trailing_vol`.
///
/// `trailing_vol` is the population std of the `lookback` returns ending at
/// that period, annualized by `sqrt(periods_per_year)`. Periods before the
/// lookback fills, or with zero trailing vol, are flat. Unlike
/// [`returns::compute`](super::returns::compute), a gap step is kept as a 0%
/// return so indices stay aligned.
///
/// Curves shorter than `lookback + 2` are returned unchanged.
pub fn volatility_target_equity(
    equity: &[f64],
    target_annual_vol: f64,
    lookback: usize,
    periods_per_year: f64,
) -> Vec<f64> {
    if equity.len() < lookback.saturating_add(2) {
        tracing::debug!(
            len = equity.len(),
            lookback,
            "curve too short for volatility targeting, passing through"
        );
        return equity.to_vec();
    }

    let rets: Vec<f64> = equity
        .windows(2)
        .map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if prev.is_finite() && curr.is_finite() && prev != 0.0 {
                curr / prev - 1.0
            } else {
                0.0
            }
        })
        .collect();

    let annualizer = periods_per_year.sqrt();
    let trailing_vol = rolling(&rets, lookback, |chunk| risk::std(chunk) * annualizer);

    let mut out = Vec::with_capacity(equity.len());
    out.push(equity[0]);
    let mut prev = equity[0];
    for (ret, vol) in rets.iter().zip(&trailing_vol) {
        let scale = match vol {
            Some(v) if v.is_finite() && *v != 0.0 => target_annual_vol / v,
            _ => 0.0,
        };
        prev *= 1.0 + ret * scale;
        out.push(prev);
    }
    out
}
