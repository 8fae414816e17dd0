//! Mapping of test observations onto the selected candidates.
//!
//! For each test row, every selected candidate is evaluated in selection
//! order. A candidate is admitted for the row iff its pointwise deviation
//! both improves on the running best *and* is at or above `sqrt(2)` times the
//! candidate's worst-case training error. Note the direction of the second
//! leg: deviations *below* the scaled training error are rejected. This is
//! the admission rule this tool has always shipped with; see DESIGN.md before
//! changing it.
//!
//! Rows where no candidate is admitted come out unmapped. That is a valid
//! terminal outcome, never an error.
//!
//! The engine is pure: it builds the mapping sequence and returns it. Writing
//! results anywhere is the caller's concern (and is separately gated, see
//! `io::export`).

use crate::domain::{
    Assigned, CandidateTable, Mapping, SELECTED_COUNT, Selection, TestTable,
};
use crate::error::{AppError, EXIT_SHAPE};
use crate::math::deviation_to_value;

/// Scale applied to a candidate's worst-case training error to form its
/// admission threshold.
pub const THRESHOLD_SCALE: f64 = std::f64::consts::SQRT_2;

/// Map every test row to at most one selected candidate.
///
/// Preconditions (checked before the loop, all exit code 3):
/// - the selection holds exactly [`SELECTED_COUNT`] candidates
/// - every test x is a member of the catalogue grid
pub fn map_test_rows(
    test: &TestTable,
    catalogue: &CandidateTable,
    selection: &Selection,
) -> Result<Vec<Mapping>, AppError> {
    if selection.chosen.len() != SELECTED_COUNT {
        return Err(AppError::new(
            EXIT_SHAPE,
            format!(
                "Selection holds {} candidates; the mapping engine requires exactly {SELECTED_COUNT}.",
                selection.chosen.len()
            ),
        ));
    }

    let grid_rows = resolve_grid_rows(test, catalogue)?;

    let mut out = Vec::with_capacity(test.len());
    for (row, (r, &grid_row)) in test.rows.iter().zip(grid_rows.iter()).enumerate() {
        let mut best: Option<Assigned> = None;

        for (position, sel) in selection.chosen.iter().enumerate() {
            let value = catalogue.value(grid_row, sel.index);
            let deviation = deviation_to_value(&[r.y], value);
            let threshold = THRESHOLD_SCALE * sel.worst_error;

            let best_so_far = best.map_or(f64::INFINITY, |a| a.deviation);
            if deviation < best_so_far && deviation >= threshold {
                best = Some(Assigned {
                    position,
                    deviation,
                });
            }
        }

        out.push(Mapping {
            row,
            x: r.x,
            y: r.y,
            assigned: best,
        });
    }

    Ok(out)
}

/// Resolve every test x to its catalogue grid row, failing fast on the first
/// row that is not on the grid.
fn resolve_grid_rows(test: &TestTable, catalogue: &CandidateTable) -> Result<Vec<usize>, AppError> {
    let mut rows = Vec::with_capacity(test.len());
    for (row, r) in test.rows.iter().enumerate() {
        let grid_row = catalogue.position_of_x(r.x).ok_or_else(|| {
            AppError::new(
                EXIT_SHAPE,
                format!(
                    "Test row {row}: x={} is not on the catalogue grid.",
                    r.x
                ),
            )
        })?;
        rows.push(grid_row);
    }
    Ok(rows)
}

/// Counts of mapped/unmapped rows, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    pub mapped: usize,
    pub unmapped: usize,
}

pub fn summarize(mappings: &[Mapping]) -> MappingSummary {
    let mapped = mappings.iter().filter(|m| m.assigned.is_some()).count();
    MappingSummary {
        mapped,
        unmapped: mappings.len() - mapped,
    }
}
