//! Regression diagnostic: a joint OLS fit of the training input against all
//! four outputs, reported as per-output coefficients and R².
//!
//! This exists purely as a descriptive check of how linear the training data
//! is; the selection/mapping pipeline never consumes it. The outputs share
//! one design matrix (`[1, x]`), so the joint fit is solved one output column
//! at a time.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Diagnostic, OutputFit, TRAIN_OUTPUT_COUNT, TrainingTable};
use crate::error::{AppError, EXIT_NUMERIC, EXIT_SHAPE};
use crate::math::solve_least_squares;

/// Fit the diagnostic regression on a training table.
pub fn fit_diagnostic(train: &TrainingTable) -> Result<Diagnostic, AppError> {
    if train.len() < 2 {
        return Err(AppError::new(
            EXIT_SHAPE,
            "Diagnostic regression needs at least 2 training rows.",
        ));
    }

    let n = train.len();
    let mut design = DMatrix::zeros(n, 2);
    for (i, r) in train.rows.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = r.x;
    }

    let mut outputs = Vec::with_capacity(TRAIN_OUTPUT_COUNT);
    for m in 0..TRAIN_OUTPUT_COUNT {
        let y = DVector::from_iterator(n, train.rows.iter().map(|r| r.y[m]));
        let beta = solve_least_squares(&design, &y).ok_or_else(|| {
            AppError::new(
                EXIT_NUMERIC,
                format!("Diagnostic regression is singular for output y{}.", m + 1),
            )
        })?;

        let fit = OutputFit {
            intercept: beta[0],
            slope: beta[1],
            r_squared: r_squared(&design, &y, &beta),
        };
        outputs.push(fit);
    }

    let mean_r_squared =
        outputs.iter().map(|f| f.r_squared).sum::<f64>() / outputs.len() as f64;

    Ok(Diagnostic {
        outputs,
        mean_r_squared,
    })
}

/// Predicted value of one fitted output at `x`.
pub fn predict(fit: &OutputFit, x: f64) -> f64 {
    fit.intercept + fit.slope * x
}

/// Coefficient of determination: `1 - ss_res / ss_tot`.
///
/// A constant output column has `ss_tot = 0`; the score is then 1 when the
/// fit reproduces the constant and 0 otherwise.
fn r_squared(design: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>) -> f64 {
    let predicted = design * beta;
    let ss_res: f64 = y
        .iter()
        .zip(predicted.iter())
        .map(|(obs, fit)| (obs - fit) * (obs - fit))
        .sum();

    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|obs| (obs - mean) * (obs - mean)).sum();

    if ss_tot <= f64::EPSILON {
        return if ss_res <= f64::EPSILON { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainRow;

    fn linear_train() -> TrainingTable {
        // y1 = 2 + 3x, y2 = -x, y3 = 0.5 + x, y4 = 4 (constant).
        TrainingTable {
            rows: (0..10)
                .map(|i| {
                    let x = i as f64;
                    TrainRow {
                        x,
                        y: [2.0 + 3.0 * x, -x, 0.5 + x, 4.0],
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn recovers_linear_coefficients_exactly() {
        let diag = fit_diagnostic(&linear_train()).unwrap();

        let f = &diag.outputs[0];
        assert!((f.intercept - 2.0).abs() < 1e-9);
        assert!((f.slope - 3.0).abs() < 1e-9);
        assert!((f.r_squared - 1.0).abs() < 1e-9);

        let f = &diag.outputs[1];
        assert!((f.slope + 1.0).abs() < 1e-9);

        assert!((diag.mean_r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_output_scores_one_when_reproduced() {
        let diag = fit_diagnostic(&linear_train()).unwrap();
        let f = &diag.outputs[3];
        assert!(f.slope.abs() < 1e-9);
        assert!((f.intercept - 4.0).abs() < 1e-9);
        assert!((f.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn noisy_data_scores_below_one() {
        let mut train = linear_train();
        // Perturb one row of y1 away from the line.
        train.rows[5].y[0] += 10.0;

        let diag = fit_diagnostic(&train).unwrap();
        assert!(diag.outputs[0].r_squared < 1.0);
        assert!(diag.outputs[0].r_squared > 0.5);
    }

    #[test]
    fn too_few_rows_is_rejected() {
        let train = TrainingTable {
            rows: vec![TrainRow {
                x: 0.0,
                y: [0.0; 4],
            }],
        };
        let err = fit_diagnostic(&train).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn predict_evaluates_the_fitted_line() {
        let fit = OutputFit {
            intercept: 1.0,
            slope: 2.0,
            r_squared: 1.0,
        };
        assert!((predict(&fit, 3.0) - 7.0).abs() < 1e-12);
    }
}
