//! Read/write saved-run JSON files.
//!
//! A run file is the portable representation of a completed mapping run:
//! catalogue scores and the selected subset, the sampled grid of the selected
//! candidates (so plots don't need the original catalogue CSV), the per-row
//! mappings, and the optional regression diagnostic.
//!
//! The schema is defined by `domain::RunFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::domain::{
    CandidateTable, Diagnostic, Mapping, RunFile, RunGrid, Selection,
};
use crate::error::{AppError, EXIT_USAGE};
use crate::io::export::ensure_writable;

/// Sampled grid of the selected candidates, in selection order.
pub fn selected_grid(catalogue: &CandidateTable, selection: &Selection) -> RunGrid {
    RunGrid {
        x: catalogue.x.clone(),
        candidates: selection
            .chosen
            .iter()
            .map(|c| catalogue.columns[c.index].clone())
            .collect(),
    }
}

/// Assemble the saved-run value for a completed pipeline run.
pub fn build_run_file(
    catalogue: &CandidateTable,
    selection: &Selection,
    mappings: &[Mapping],
    diagnostic: Option<Diagnostic>,
) -> RunFile {
    RunFile {
        tool: "ideal".to_string(),
        generated: Local::now().to_rfc3339(),
        candidate_names: catalogue.names.clone(),
        selection: selection.clone(),
        grid: selected_grid(catalogue, selection),
        mappings: mappings.to_vec(),
        diagnostic,
    }
}

/// Write a run JSON file (gated like the CSV export).
pub fn write_run_json(path: &Path, run: &RunFile, force: bool) -> Result<(), AppError> {
    ensure_writable(path, force)?;

    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to create run JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, run)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write run JSON: {e}")))?;

    Ok(())
}

/// Read a run JSON file.
pub fn read_run_json(path: &Path) -> Result<RunFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to open run JSON '{}': {e}", path.display()),
        )
    })?;
    let run: RunFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid run JSON: {e}")))?;
    Ok(run)
}
