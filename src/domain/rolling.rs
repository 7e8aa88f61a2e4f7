//! Fixed-size trailing window aggregation.
//!
//! ROLLING(n)[i] = f(values[i+1-n ..= i])
//! Warmup: the first (n-1) slots are `None`.

/// Applies `aggregate` to every full trailing window of `window` elements.
///
/// The output always has `values.len()` slots. A window of 0 never fills, so
/// every slot is `None`.
pub fn rolling<T, R, F>(values: &[T], window: usize, mut aggregate: F) -> Vec<Option<R>>
where
    F: FnMut(&[T]) -> R,
{
    let mut out: Vec<Option<R>> = Vec::with_capacity(values.len());
    if window == 0 || window > values.len() {
        out.resize_with(values.len(), || None);
        return out;
    }

    out.resize_with(window - 1, || None);
    out.extend(values.windows(window).map(|chunk| Some(aggregate(chunk))));
    out
}
