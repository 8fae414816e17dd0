//! Ordinary least squares solver.
//!
//! The diagnostic regression solves `minimize Σ (y_i - x_i^T β)^2` for a tall
//! design matrix (many grid rows, two columns: intercept and slope).
//!
//! Implementation choices:
//! - SVD solve, which stays robust for tall systems and near-collinear
//!   columns. (Nalgebra's `QR::solve` targets square systems and will panic
//!   for non-square matrices.)
//! - The parameter dimension is tiny, so SVD cost is irrelevant here.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // A degenerate grid (all x equal) makes the slope column a multiple of
    // the intercept column; try progressively looser tolerances before
    // giving up.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_exact_line() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_minimizes_residual_on_noisy_data() {
        // y = x with one perturbed point; the fit splits the disagreement.
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let y = DVector::from_row_slice(&[0.0, 1.0, 2.0, 4.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        // Closed form for this system: intercept -0.2, slope 1.3.
        assert!((beta[0] + 0.2).abs() < 1e-10);
        assert!((beta[1] - 1.3).abs() < 1e-10);
    }
}
