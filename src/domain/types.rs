//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during scoring/selection/mapping
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of output columns in a training table (`y1..y4`).
pub const TRAIN_OUTPUT_COUNT: usize = 4;

/// Size of the selected subset of catalogue candidates.
pub const SELECTED_COUNT: usize = 4;

/// Tolerance used when matching x values against the shared grid.
///
/// Input files carry the same grid in several tables; values that survived a
/// decimal round-trip are equal well within this bound.
pub const X_MATCH_TOL: f64 = 1e-9;

/// One training observation: a grid position and all four observed outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainRow {
    pub x: f64,
    pub y: [f64; TRAIN_OUTPUT_COUNT],
}

/// Training table: fixed row count, four outputs per row, x shared with the
/// candidate catalogue.
#[derive(Debug, Clone, Default)]
pub struct TrainingTable {
    pub rows: Vec<TrainRow>,
}

impl TrainingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        DatasetStats::compute(
            self.rows.iter().map(|r| r.x),
            self.rows.iter().flat_map(|r| r.y.into_iter()),
        )
    }
}

/// Candidate catalogue: an x grid plus one sampled column per candidate.
///
/// Candidate identity is the 0-based column index in this table. It is the
/// identity reported everywhere and is never renumbered after selection.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    pub x: Vec<f64>,
    /// Column header names from the source file (e.g. `f1..f50`), parallel to
    /// `columns`.
    pub names: Vec<String>,
    /// Column-major sampled values: `columns[c][row]`.
    pub columns: Vec<Vec<f64>>,
}

impl CandidateTable {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn candidate_count(&self) -> usize {
        self.columns.len()
    }

    /// Sampled value of candidate `index` at grid row `row`.
    pub fn value(&self, row: usize, index: usize) -> f64 {
        self.columns[index][row]
    }

    /// Locate the grid row whose x matches `x` within [`X_MATCH_TOL`].
    pub fn position_of_x(&self, x: f64) -> Option<usize> {
        self.x.iter().position(|&gx| (gx - x).abs() <= X_MATCH_TOL)
    }

    pub fn name(&self, index: usize) -> &str {
        self.names.get(index).map(String::as_str).unwrap_or("?")
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        DatasetStats::compute(
            self.x.iter().copied(),
            self.columns.iter().flat_map(|c| c.iter().copied()),
        )
    }
}

/// One test observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestRow {
    pub x: f64,
    pub y: f64,
}

/// Test table: single-output observations, x values drawn from the grid.
#[derive(Debug, Clone, Default)]
pub struct TestTable {
    pub rows: Vec<TestRow>,
}

impl TestTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        DatasetStats::compute(self.rows.iter().map(|r| r.x), self.rows.iter().map(|r| r.y))
    }
}

/// Summary stats about a loaded table.
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    pub fn compute(
        xs: impl Iterator<Item = f64>,
        ys: impl Iterator<Item = f64>,
    ) -> Option<DatasetStats> {
        let mut n_rows = 0usize;
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        for x in xs {
            n_rows += 1;
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for y in ys {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return None;
        }

        Some(DatasetStats {
            n_rows,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

/// Pooled training error of one catalogue candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// 0-based catalogue index.
    pub index: usize,
    /// Sum of squared deviations over all rows and all four training outputs.
    pub sse: f64,
}

/// One member of the selected subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedCandidate {
    /// 0-based catalogue index (original identity, not the selection position).
    pub index: usize,
    /// Largest single-row training deviation of this candidate; scales the
    /// admission threshold at mapping time.
    pub worst_error: f64,
}

/// Output of scoring + selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Exactly [`SELECTED_COUNT`] candidates in ascending score order.
    pub chosen: Vec<SelectedCandidate>,
    /// Scores for the whole catalogue, in catalogue order (for reports).
    pub scores: Vec<CandidateScore>,
}

impl Selection {
    /// Map a selection position (0..3) back to the catalogue index.
    pub fn catalogue_index(&self, position: usize) -> Option<usize> {
        self.chosen.get(position).map(|c| c.index)
    }
}

/// A test row's accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assigned {
    /// Position within the selected subset (0..3).
    pub position: usize,
    /// Pointwise deviation from the candidate at the row's grid position.
    pub deviation: f64,
}

/// Mapping outcome for one test row. `assigned = None` is a valid terminal
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// 0-based test-row index (output order is test-row order).
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub assigned: Option<Assigned>,
}

/// Per-output ordinary least squares fit of the diagnostic regression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutputFit {
    pub intercept: f64,
    pub slope: f64,
    /// Coefficient of determination on the training predictions.
    pub r_squared: f64,
}

/// Regression diagnostic over all four training outputs.
///
/// Purely descriptive; the mapping pipeline does not consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub outputs: Vec<OutputFit>,
    /// Uniform average of the per-output scores.
    pub mean_r_squared: f64,
}

/// Output/behavior options shared by `ideal run` and `ideal demo`.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// How many catalogue scores to show in the report.
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_results: Option<PathBuf>,
    pub export_run: Option<PathBuf>,
    /// Overwrite populated outputs instead of refusing.
    pub force: bool,
    /// Fit and report the regression diagnostic.
    pub diagnose: bool,
    pub debug_bundle: bool,
}

/// Settings for the synthetic demo dataset.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    /// Grid rows shared by the training table and the catalogue.
    pub rows: usize,
    /// Catalogue width (must be >= [`SELECTED_COUNT`]).
    pub candidates: usize,
    pub test_rows: usize,
    /// Std dev of the Gaussian noise added to training/test outputs.
    pub noise_sigma: f64,
    pub x_min: f64,
    pub x_max: f64,
}

/// A saved run file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFile {
    pub tool: String,
    pub generated: String,
    pub candidate_names: Vec<String>,
    pub selection: Selection,
    pub grid: RunGrid,
    pub mappings: Vec<Mapping>,
    pub diagnostic: Option<Diagnostic>,
}

/// Sampled values of the selected candidates, for plotting without the
/// original catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunGrid {
    pub x: Vec<f64>,
    /// One column per selected candidate, in selection order.
    pub candidates: Vec<Vec<f64>>,
}
