//! Training-error scoring of catalogue candidates.
//!
//! Scoring pools all four training outputs against each candidate column in
//! one pass:
//!
//! ```text
//! score[c] = Σ_rows Σ_m (train[row][m] - candidate[row][c])²
//! ```
//!
//! so one selection is made for the whole training table rather than one per
//! output column. The per-output alternative would produce four independent
//! subsets; the pooled policy is the documented behavior of this tool, and
//! the selector's worst-case error statistic is defined consistently with it
//! (see `fit::selection`).

use crate::domain::{CandidateScore, CandidateTable, TrainingTable, X_MATCH_TOL};
use crate::error::{AppError, EXIT_NUMERIC, EXIT_SHAPE};

/// Score every candidate column against the training table.
///
/// Pure; fails fast if the tables do not share a grid.
pub fn score_candidates(
    train: &TrainingTable,
    catalogue: &CandidateTable,
) -> Result<Vec<CandidateScore>, AppError> {
    validate_shared_grid(train, catalogue)?;

    let mut scores = Vec::with_capacity(catalogue.candidate_count());
    for index in 0..catalogue.candidate_count() {
        let mut sse = 0.0;
        for (row, r) in train.rows.iter().enumerate() {
            let value = catalogue.value(row, index);
            for y in r.y {
                let d = y - value;
                sse += d * d;
            }
        }

        if !sse.is_finite() {
            return Err(AppError::new(
                EXIT_NUMERIC,
                format!("Non-finite training score for candidate {index}."),
            ));
        }
        scores.push(CandidateScore { index, sse });
    }

    Ok(scores)
}

/// Ensure training table and catalogue are defined on the same grid.
pub fn validate_shared_grid(
    train: &TrainingTable,
    catalogue: &CandidateTable,
) -> Result<(), AppError> {
    if train.is_empty() {
        return Err(AppError::new(EXIT_SHAPE, "Training table is empty."));
    }
    if train.len() != catalogue.len() {
        return Err(AppError::new(
            EXIT_SHAPE,
            format!(
                "Row count mismatch: training has {} rows, catalogue has {}.",
                train.len(),
                catalogue.len()
            ),
        ));
    }

    for (row, r) in train.rows.iter().enumerate() {
        let gx = catalogue.x[row];
        if (r.x - gx).abs() > X_MATCH_TOL {
            return Err(AppError::new(
                EXIT_SHAPE,
                format!(
                    "Grid mismatch at row {row}: training x={} vs catalogue x={gx}.",
                    r.x
                ),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainRow;

    fn train(rows: &[(f64, [f64; 4])]) -> TrainingTable {
        TrainingTable {
            rows: rows.iter().map(|&(x, y)| TrainRow { x, y }).collect(),
        }
    }

    fn catalogue(x: &[f64], columns: &[&[f64]]) -> CandidateTable {
        CandidateTable {
            x: x.to_vec(),
            names: (1..=columns.len()).map(|i| format!("f{i}")).collect(),
            columns: columns.iter().map(|c| c.to_vec()).collect(),
        }
    }

    #[test]
    fn pooled_score_sums_all_outputs_and_rows() {
        let train = train(&[(0.0, [1.0, 1.0, 1.0, 1.0]), (1.0, [2.0, 2.0, 2.0, 2.0])]);
        // Candidate 0 matches exactly; candidate 1 is off by 1 everywhere.
        let cat = catalogue(&[0.0, 1.0], &[&[1.0, 2.0], &[2.0, 3.0]]);

        let scores = score_candidates(&train, &cat).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].index, 0);
        assert!((scores[0].sse - 0.0).abs() < 1e-12);
        // 8 pooled terms, each deviation 1.
        assert!((scores[1].sse - 8.0).abs() < 1e-12);
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let train = train(&[(0.0, [0.0; 4])]);
        let cat = catalogue(&[0.0, 1.0], &[&[0.0, 0.0]]);

        let err = score_candidates(&train, &cat).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn grid_mismatch_is_rejected() {
        let train = train(&[(0.0, [0.0; 4]), (1.0, [0.0; 4])]);
        let cat = catalogue(&[0.0, 1.5], &[&[0.0, 0.0]]);

        let err = score_candidates(&train, &cat).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
