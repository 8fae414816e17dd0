//! Export per-row mapping results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts. `candidate_index` is the catalogue identity (mapped back through
//! the selection), `candidate_position` the 0..3 slot within the selected
//! subset; both are blank for unmapped rows.
//!
//! Writes are at-most-once per fresh output: an existing non-empty file is
//! refused unless `force` is set. This replaces probing the old output's
//! contents for a sentinel value, which broke on short files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Mapping, Selection};
use crate::error::{AppError, EXIT_USAGE};

/// Refuse to overwrite a populated output unless `force` is set.
pub fn ensure_writable(path: &Path, force: bool) -> Result<(), AppError> {
    if force {
        return Ok(());
    }

    let populated = std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    if populated {
        return Err(AppError::new(
            EXIT_USAGE,
            format!(
                "Output '{}' is already populated; pass --force to overwrite.",
                path.display()
            ),
        ));
    }

    Ok(())
}

/// Write per-row mapping results to a CSV file.
pub fn write_mappings_csv(
    path: &Path,
    mappings: &[Mapping],
    selection: &Selection,
    candidate_names: &[String],
    force: bool,
) -> Result<(), AppError> {
    ensure_writable(path, force)?;

    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "row,x,y,candidate_position,candidate_index,candidate_name,deviation"
    )
    .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV header: {e}")))?;

    for m in mappings {
        let (position, index, name, deviation) = match m.assigned {
            Some(a) => {
                let index = selection.catalogue_index(a.position);
                (
                    a.position.to_string(),
                    index.map(|i| i.to_string()).unwrap_or_default(),
                    index
                        .and_then(|i| candidate_names.get(i))
                        .cloned()
                        .unwrap_or_default(),
                    format!("{:.10}", a.deviation),
                )
            }
            None => Default::default(),
        };

        writeln!(
            file,
            "{},{:.10},{:.10},{},{},{},{}",
            m.row, m.x, m.y, position, index, name, deviation
        )
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
