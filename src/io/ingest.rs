//! CSV ingest and validation.
//!
//! This module turns the three input CSVs into typed, immutable tables that
//! are safe to hand to the core:
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Line-numbered errors**: a malformed value names the offending line
//!   instead of silently skipping it — the tables are grid-aligned, so a
//!   dropped row would corrupt every downstream comparison
//! - **Deterministic behavior** (no hidden normalization or reordering)
//! - **Separation of concerns**: no scoring or mapping logic here
//!
//! There is deliberately no database layer; callers pass these tables around
//! as plain values.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{CandidateTable, TestRow, TestTable, TrainRow, TrainingTable};
use crate::error::{AppError, EXIT_SHAPE, EXIT_USAGE};

/// Load a training table (`x, y1..y4`).
pub fn load_training_table(path: &Path) -> Result<TrainingTable, AppError> {
    read_training(open_csv(path)?)
        .map_err(|e| e.in_file(path))
}

/// Load a candidate catalogue (`x` plus one column per candidate).
pub fn load_candidate_table(path: &Path) -> Result<CandidateTable, AppError> {
    read_candidates(open_csv(path)?)
        .map_err(|e| e.in_file(path))
}

/// Load a test table (`x, y`).
pub fn load_test_table(path: &Path) -> Result<TestTable, AppError> {
    read_test(open_csv(path)?)
        .map_err(|e| e.in_file(path))
}

impl AppError {
    fn in_file(self, path: &Path) -> AppError {
        AppError::new(self.exit_code(), format!("{}: {self}", path.display()))
    }
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to open CSV '{}': {e}", path.display()),
        )
    })?;

    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

/// Parse a training table from any CSV reader.
pub fn read_training<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<TrainingTable, AppError> {
    let header_map = header_map(&mut reader)?;

    let x_idx = require_column(&header_map, "x")?;
    let y_idx = [
        require_column(&header_map, "y1")?,
        require_column(&header_map, "y2")?,
        require_column(&header_map, "y3")?,
        require_column(&header_map, "y4")?,
    ];

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Line {line}: CSV parse error: {e}")))?;

        let x = parse_field(&record, x_idx, "x", line)?;
        let mut y = [0.0; 4];
        for (m, slot) in y.iter_mut().enumerate() {
            *slot = parse_field(&record, y_idx[m], &format!("y{}", m + 1), line)?;
        }
        rows.push(TrainRow { x, y });
    }

    if rows.is_empty() {
        return Err(AppError::new(EXIT_SHAPE, "Training table has no data rows."));
    }

    Ok(TrainingTable { rows })
}

/// Parse a candidate catalogue from any CSV reader.
///
/// Every non-`x` header is a candidate column; catalogue indices follow the
/// file's column order.
pub fn read_candidates<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<CandidateTable, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let mut x_idx = None;
    let mut names = Vec::new();
    let mut field_indices = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        let name = normalize_header_name(name);
        if name == "x" {
            x_idx = Some(idx);
        } else if !name.is_empty() {
            names.push(name);
            field_indices.push(idx);
        }
    }
    let x_idx = x_idx.ok_or_else(|| AppError::new(EXIT_USAGE, "Missing required column: `x`"))?;

    if names.is_empty() {
        return Err(AppError::new(
            EXIT_USAGE,
            "Catalogue CSV has no candidate columns besides `x`.",
        ));
    }

    let mut x = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Line {line}: CSV parse error: {e}")))?;

        x.push(parse_field(&record, x_idx, "x", line)?);
        for (c, &field_idx) in field_indices.iter().enumerate() {
            columns[c].push(parse_field(&record, field_idx, &names[c], line)?);
        }
    }

    if x.is_empty() {
        return Err(AppError::new(EXIT_SHAPE, "Catalogue table has no data rows."));
    }

    Ok(CandidateTable { x, names, columns })
}

/// Parse a test table from any CSV reader.
pub fn read_test<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<TestTable, AppError> {
    let header_map = header_map(&mut reader)?;

    let x_idx = require_column(&header_map, "x")?;
    let y_idx = require_column(&header_map, "y")?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Line {line}: CSV parse error: {e}")))?;

        rows.push(TestRow {
            x: parse_field(&record, x_idx, "x", line)?,
            y: parse_field(&record, y_idx, "y", line)?,
        });
    }

    if rows.is_empty() {
        return Err(AppError::new(EXIT_SHAPE, "Test table has no data rows."));
    }

    Ok(TestTable { rows })
}

fn header_map<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<HashMap<String, usize>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to read CSV headers: {e}")))?;

    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect())
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "\u{feff}x"). If we don't strip it, schema
    // validation will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn require_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| AppError::new(EXIT_USAGE, format!("Missing required column: `{name}`")))
}

fn parse_field(
    record: &StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<f64, AppError> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::new(EXIT_USAGE, format!("Line {line}: missing value for `{name}`."))
        })?;

    let v: f64 = raw.parse().map_err(|_| {
        AppError::new(
            EXIT_USAGE,
            format!("Line {line}: invalid number '{raw}' for `{name}`."),
        )
    })?;

    if !v.is_finite() {
        return Err(AppError::new(
            EXIT_USAGE,
            format!("Line {line}: non-finite value for `{name}`."),
        ));
    }

    Ok(v)
}
