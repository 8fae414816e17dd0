//! Debug bundle writer for inspecting a mapping run.
//!
//! Writes a markdown file under `debug/` with the catalogue scores, the
//! selected subset and, per test row, the deviation against every selected
//! candidate next to its threshold, so an unexpected mapping can be traced by
//! hand.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::assign::THRESHOLD_SCALE;
use crate::domain::{CandidateTable, Mapping, Selection, TestTable, TrainingTable};
use crate::error::{AppError, EXIT_NUMERIC};
use crate::math::deviation_to_value;

pub fn write_debug_bundle(
    train: &TrainingTable,
    catalogue: &CandidateTable,
    test: &TestTable,
    selection: &Selection,
    mappings: &[Mapping],
) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir)
        .map_err(|e| AppError::new(EXIT_NUMERIC, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("ideal_debug_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(EXIT_NUMERIC, format!("Failed to create debug file: {e}")))?;

    let w = |file: &mut File, line: String| -> Result<(), AppError> {
        writeln!(file, "{line}")
            .map_err(|e| AppError::new(EXIT_NUMERIC, format!("Failed to write debug file: {e}")))
    };

    w(&mut file, "# ideal debug bundle".to_string())?;
    w(&mut file, format!("- generated: {}", Local::now().to_rfc3339()))?;
    w(&mut file, format!("- train rows: {}", train.len()))?;
    w(
        &mut file,
        format!("- catalogue: {} candidates", catalogue.candidate_count()),
    )?;
    w(&mut file, format!("- test rows: {}", test.len()))?;

    w(&mut file, "\n## Catalogue scores".to_string())?;
    w(&mut file, "| index | name | sse |".to_string())?;
    w(&mut file, "| - | - | - |".to_string())?;
    for s in &selection.scores {
        w(
            &mut file,
            format!("| {} | {} | {:.6} |", s.index, catalogue.name(s.index), s.sse),
        )?;
    }

    w(&mut file, "\n## Selected subset".to_string())?;
    w(
        &mut file,
        "| position | index | name | worst_error | threshold |".to_string(),
    )?;
    w(&mut file, "| - | - | - | - | - |".to_string())?;
    for (position, c) in selection.chosen.iter().enumerate() {
        w(
            &mut file,
            format!(
                "| {position} | {} | {} | {:.6} | {:.6} |",
                c.index,
                catalogue.name(c.index),
                c.worst_error,
                THRESHOLD_SCALE * c.worst_error
            ),
        )?;
    }

    w(&mut file, "\n## Per-row decisions".to_string())?;
    w(
        &mut file,
        "| row | x | y | deviations (position: value/threshold) | outcome |".to_string(),
    )?;
    w(&mut file, "| - | - | - | - | - |".to_string())?;
    for m in mappings {
        let detail = match catalogue.position_of_x(m.x) {
            Some(grid_row) => selection
                .chosen
                .iter()
                .enumerate()
                .map(|(position, c)| {
                    let dev = deviation_to_value(&[m.y], catalogue.value(grid_row, c.index));
                    format!("{position}: {dev:.4}/{:.4}", THRESHOLD_SCALE * c.worst_error)
                })
                .collect::<Vec<_>>()
                .join(", "),
            None => "(off grid)".to_string(),
        };
        let outcome = match m.assigned {
            Some(a) => format!("position {} dev {:.6}", a.position, a.deviation),
            None => "unmapped".to_string(),
        };
        w(
            &mut file,
            format!("| {} | {:.4} | {:.4} | {detail} | {outcome} |", m.row, m.x, m.y),
        )?;
    }

    Ok(path)
}
