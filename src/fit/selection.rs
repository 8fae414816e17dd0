//! Subset selection from scored candidates.
//!
//! Selection rules:
//! 1. Rank the catalogue by pooled training score, ascending; ties keep
//!    catalogue order (stable sort, so lower index wins).
//! 2. Take the first [`SELECTED_COUNT`] candidates.
//! 3. For each selected candidate, record its worst-case single-row training
//!    error: the maximum over training rows of the root-sum-of-squares
//!    deviation of that row's four outputs from the candidate's value. This
//!    is the same metric the mapping engine evaluates per test row, so the
//!    admission threshold `sqrt(2) * worst_error` compares like with like.

use std::cmp::Ordering;

use crate::domain::{
    CandidateTable, SELECTED_COUNT, SelectedCandidate, Selection, TrainingTable,
};
use crate::error::{AppError, EXIT_SHAPE};
use crate::fit::score::score_candidates;
use crate::math::deviation_to_value;

/// Score the catalogue and pick the best-fitting subset.
pub fn select_candidates(
    train: &TrainingTable,
    catalogue: &CandidateTable,
) -> Result<Selection, AppError> {
    let scores = score_candidates(train, catalogue)?;

    if catalogue.candidate_count() < SELECTED_COUNT {
        return Err(AppError::new(
            EXIT_SHAPE,
            format!(
                "Catalogue has {} candidates; selection needs at least {SELECTED_COUNT}.",
                catalogue.candidate_count()
            ),
        ));
    }

    let mut ranked = scores.clone();
    // `scores` is in catalogue order, so a stable sort on the score alone
    // breaks ties by index ascending.
    ranked.sort_by(|a, b| a.sse.partial_cmp(&b.sse).unwrap_or(Ordering::Equal));

    let chosen = ranked[..SELECTED_COUNT]
        .iter()
        .map(|s| SelectedCandidate {
            index: s.index,
            worst_error: worst_row_error(train, catalogue, s.index),
        })
        .collect();

    Ok(Selection { chosen, scores })
}

/// Largest single-row deviation of a candidate over the training table.
pub fn worst_row_error(train: &TrainingTable, catalogue: &CandidateTable, index: usize) -> f64 {
    train
        .rows
        .iter()
        .enumerate()
        .map(|(row, r)| deviation_to_value(&r.y, catalogue.value(row, index)))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainRow;

    fn constant_train(n: usize, level: f64) -> TrainingTable {
        TrainingTable {
            rows: (0..n)
                .map(|i| TrainRow {
                    x: i as f64,
                    y: [level; 4],
                })
                .collect(),
        }
    }

    fn constant_catalogue(n: usize, levels: &[f64]) -> CandidateTable {
        CandidateTable {
            x: (0..n).map(|i| i as f64).collect(),
            names: (1..=levels.len()).map(|i| format!("f{i}")).collect(),
            columns: levels.iter().map(|&v| vec![v; n]).collect(),
        }
    }

    #[test]
    fn selects_the_four_lowest_scores() {
        let train = constant_train(3, 0.0);
        // Distances from 0: 5, 1, 4, 2, 3, 0 -> best four are indices 5,1,3,4.
        let cat = constant_catalogue(3, &[5.0, 1.0, 4.0, 2.0, 3.0, 0.0]);

        let selection = select_candidates(&train, &cat).unwrap();
        let indices: Vec<usize> = selection.chosen.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![5, 1, 3, 4]);

        // Optimality: every selected score <= every non-selected score.
        let max_selected = selection
            .chosen
            .iter()
            .map(|c| selection.scores[c.index].sse)
            .fold(0.0, f64::max);
        for s in &selection.scores {
            if !indices.contains(&s.index) {
                assert!(s.sse >= max_selected);
            }
        }
    }

    #[test]
    fn ties_break_by_catalogue_index() {
        let train = constant_train(2, 0.0);
        // Candidates 1 and 3 tie, as do 0 and 2; order within a tie follows
        // the catalogue.
        let cat = constant_catalogue(2, &[2.0, 1.0, 2.0, 1.0, 9.0]);

        let selection = select_candidates(&train, &cat).unwrap();
        let indices: Vec<usize> = selection.chosen.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn selection_has_exactly_four_distinct_indices() {
        let train = constant_train(4, 1.0);
        let cat = constant_catalogue(4, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let selection = select_candidates(&train, &cat).unwrap();
        assert_eq!(selection.chosen.len(), SELECTED_COUNT);

        let mut indices: Vec<usize> = selection.chosen.iter().map(|c| c.index).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), SELECTED_COUNT);
        assert!(indices.iter().all(|&i| i < cat.candidate_count()));
    }

    #[test]
    fn too_few_candidates_is_a_configuration_error() {
        let train = constant_train(2, 0.0);
        let cat = constant_catalogue(2, &[1.0, 2.0, 3.0]);

        let err = select_candidates(&train, &cat).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn worst_row_error_is_a_per_row_maximum() {
        // Candidate value 0; rows deviate by sqrt(4*1)=2 and sqrt(4*9)=6.
        let train = TrainingTable {
            rows: vec![
                TrainRow {
                    x: 0.0,
                    y: [1.0; 4],
                },
                TrainRow {
                    x: 1.0,
                    y: [3.0; 4],
                },
            ],
        };
        let cat = constant_catalogue(2, &[0.0]);

        let worst = worst_row_error(&train, &cat, 0);
        assert!((worst - 6.0).abs() < 1e-12);
    }
}
