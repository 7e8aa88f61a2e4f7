//! Dense linear algebra for the attribution fit.
//!
//! Sizes are bounded by the number of distinct parameter keys, so nothing
//! here is tuned for large inputs.

use nalgebra::{DMatrix, DVector};

/// Pivots smaller than this in magnitude are replaced by it (sign kept).
/// Near-singular systems therefore produce large but finite entries.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Ridge coefficients `(XᵗX + λI)⁻¹ Xᵗy` for an `n × p` design matrix.
pub fn ridge_coefficients(x: &DMatrix<f64>, y: &DVector<f64>, lambda: f64) -> DVector<f64> {
    let p = x.ncols();
    let xtx = x.tr_mul(x) + DMatrix::<f64>::identity(p, p) * lambda;
    let xty = x.tr_mul(y);
    invert(&xtx) * xty
}

/// Inverse of a square matrix by Gauss-Jordan elimination on `[A | I]`.
///
/// Each column is pivoted on the first row (at or below the diagonal) with
/// the largest magnitude entry.
pub fn invert(a: &DMatrix<f64>) -> DMatrix<f64> {
    let n = a.nrows();
    let mut aug = DMatrix::<f64>::zeros(n, 2 * n);
    aug.view_mut((0, 0), (n, n)).copy_from(a);
    aug.view_mut((0, n), (n, n)).fill_with_identity();

    for col in 0..n {
        let mut pivot_row = col;
        for r in col + 1..n {
            if aug[(r, col)].abs() > aug[(pivot_row, col)].abs() {
                pivot_row = r;
            }
        }
        aug.swap_rows(col, pivot_row);

        let mut pivot = aug[(col, col)];
        if !(pivot.abs() >= PIVOT_EPSILON) {
            tracing::debug!(col, pivot, "near-zero pivot, flooring");
            pivot = if pivot.is_sign_negative() {
                -PIVOT_EPSILON
            } else {
                PIVOT_EPSILON
            };
        }
        let mut row = aug.row_mut(col);
        row /= pivot;

        let pivot_vals = aug.row(col).clone_owned();
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = aug[(r, col)];
            if factor == 0.0 {
                continue;
            }
            let mut target = aug.row_mut(r);
            target -= &pivot_vals * factor;
        }
    }

    aug.columns(n, n).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_identity(m: &DMatrix<f64>) {
        let identity = DMatrix::<f64>::identity(m.nrows(), m.ncols());
        assert!((m - identity).amax() < 1e-9, "not identity: {m}");
    }

    #[test]
    fn invert_diagonal() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let inv = invert(&a);
        assert_relative_eq!(inv[(0, 0)], 0.5);
        assert_relative_eq!(inv[(1, 1)], 0.25);
        assert_eq!(inv[(0, 1)], 0.0);
    }

    #[test]
    fn invert_needs_row_swap() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_identity(&(&a * invert(&a)));
    }

    #[test]
    fn invert_general_3x3() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 1.0, 3.0, 0.5, 2.0, 0.5, 5.0]);
        assert_identity(&(&a * invert(&a)));
    }

    #[test]
    fn invert_singular_stays_finite() {
        let a = DMatrix::from_element(2, 2, 1.0);
        assert!(invert(&a).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn invert_empty() {
        assert!(invert(&DMatrix::zeros(0, 0)).is_empty());
    }

    #[test]
    fn ridge_recovers_exact_fit() {
        // y = 2·x0 - x1 with orthogonal columns
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0, -1.0]);
        let y = DVector::from_vec(vec![1.0, 3.0, -3.0, -1.0]);
        let beta = ridge_coefficients(&x, &y, 0.0);
        assert_relative_eq!(beta[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(beta[1], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn ridge_penalty_shrinks_coefficients() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0, -1.0]);
        let y = DVector::from_vec(vec![1.0, 3.0, -3.0, -1.0]);
        // XᵗX = 4I, so each coefficient scales by 4 / (4 + λ).
        let beta = ridge_coefficients(&x, &y, 4.0);
        assert_relative_eq!(beta[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(beta[1], -0.5, epsilon = 1e-12);
    }
}
