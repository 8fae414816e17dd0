//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring/mapping code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::assign::{MappingSummary, THRESHOLD_SCALE};
use crate::domain::{
    CandidateTable, DatasetStats, Diagnostic, Mapping, Selection, TestTable, TrainingTable,
};

/// Format the run header: dataset stats, ranked scores, the selected subset.
pub fn format_run_summary(
    train: &TrainingTable,
    catalogue: &CandidateTable,
    test: &TestTable,
    selection: &Selection,
    top_n: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== ideal - candidate selection & test mapping ===\n");
    out.push_str(&format_stats_line("Train", train.stats()));
    out.push_str(&format!(
        "Catalogue: {} candidates\n",
        catalogue.candidate_count()
    ));
    out.push_str(&format_stats_line("Test", test.stats()));

    out.push_str(&format_selection(selection, catalogue, top_n));

    out
}

/// Format ranked scores plus the selected subset.
pub fn format_selection(selection: &Selection, catalogue: &CandidateTable, top_n: usize) -> String {
    let mut out = String::new();

    let selected: Vec<usize> = selection.chosen.iter().map(|c| c.index).collect();

    let mut ranked = selection.scores.clone();
    ranked.sort_by(|a, b| {
        a.sse
            .partial_cmp(&b.sse)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    out.push_str(&format!("\nCandidate scores (best {top_n} of {}):\n", ranked.len()));
    for s in ranked.iter().take(top_n) {
        let chosen = if selected.contains(&s.index) { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<8} sse={:.6}\n",
            catalogue.name(s.index),
            s.sse
        ));
    }

    out.push_str("\nSelected subset:\n");
    for (position, c) in selection.chosen.iter().enumerate() {
        out.push_str(&format!(
            "- [{position}] {} (index {}) worst_error={:.6} threshold={:.6}\n",
            catalogue.name(c.index),
            c.index,
            c.worst_error,
            THRESHOLD_SCALE * c.worst_error,
        ));
    }

    out
}

/// Format the per-row mapping table and the mapped/unmapped counts.
pub fn format_mappings(
    mappings: &[Mapping],
    selection: &Selection,
    catalogue_names: &[String],
    summary: MappingSummary,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Mappings: {} rows | mapped={} | unmapped={}\n",
        mappings.len(),
        summary.mapped,
        summary.unmapped
    ));

    out.push_str(&format!(
        "{:>6} {:>12} {:>12} {:>4} {:>6} {:<8} {:>12}\n",
        "row", "x", "y", "pos", "index", "name", "deviation"
    ));

    for m in mappings {
        match m.assigned {
            Some(a) => {
                let index = selection.catalogue_index(a.position);
                let name = index
                    .and_then(|i| catalogue_names.get(i))
                    .map(String::as_str)
                    .unwrap_or("?");
                out.push_str(&format!(
                    "{:>6} {:>12.4} {:>12.4} {:>4} {:>6} {:<8} {:>12.6}\n",
                    m.row,
                    m.x,
                    m.y,
                    a.position,
                    index.map(|i| i.to_string()).unwrap_or_else(|| "?".into()),
                    name,
                    a.deviation
                ));
            }
            None => {
                out.push_str(&format!(
                    "{:>6} {:>12.4} {:>12.4} {:>4} {:>6} {:<8} {:>12}\n",
                    m.row, m.x, m.y, "-", "-", "-", "-"
                ));
            }
        }
    }

    out
}

/// Format the regression diagnostic.
pub fn format_diagnostic(diag: &Diagnostic) -> String {
    let mut out = String::new();

    out.push_str("\nRegression diagnostic (y = a + b*x):\n");
    for (m, f) in diag.outputs.iter().enumerate() {
        out.push_str(&format!(
            "- y{}: intercept={:.6} slope={:.6} r2={:.4}\n",
            m + 1,
            f.intercept,
            f.slope,
            f.r_squared
        ));
    }
    out.push_str(&format!("- mean r2: {:.4}\n", diag.mean_r_squared));

    out
}

fn format_stats_line(label: &str, stats: Option<DatasetStats>) -> String {
    match stats {
        Some(s) => format!(
            "{label}: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
            s.n_rows, s.x_min, s.x_max, s.y_min, s.y_max
        ),
        None => format!("{label}: (no finite rows)\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Assigned, CandidateScore, SelectedCandidate};

    fn fixture() -> (Selection, CandidateTable) {
        let catalogue = CandidateTable {
            x: vec![0.0],
            names: (1..=6).map(|i| format!("f{i}")).collect(),
            columns: vec![vec![0.0]; 6],
        };
        let selection = Selection {
            chosen: vec![
                SelectedCandidate { index: 3, worst_error: 0.5 },
                SelectedCandidate { index: 0, worst_error: 0.5 },
                SelectedCandidate { index: 5, worst_error: 0.5 },
                SelectedCandidate { index: 1, worst_error: 0.5 },
            ],
            scores: (0..6)
                .map(|index| CandidateScore {
                    index,
                    sse: index as f64,
                })
                .collect(),
        };
        (selection, catalogue)
    }

    #[test]
    fn selection_report_marks_chosen_candidates() {
        let (selection, catalogue) = fixture();
        let text = format_selection(&selection, &catalogue, 6);

        assert!(text.contains("* f1"));
        assert!(text.contains("* f4"));
        // Candidate f3 (index 2) is not part of the subset.
        assert!(text.contains("  f3"));
        assert!(text.contains("[0] f4 (index 3)"));
    }

    #[test]
    fn mapping_table_shows_catalogue_identity_and_dashes() {
        let (selection, catalogue) = fixture();
        let mappings = vec![
            Mapping {
                row: 0,
                x: 0.0,
                y: 1.0,
                assigned: Some(Assigned {
                    position: 2,
                    deviation: 0.125,
                }),
            },
            Mapping {
                row: 1,
                x: 0.0,
                y: 2.0,
                assigned: None,
            },
        ];
        let summary = MappingSummary {
            mapped: 1,
            unmapped: 1,
        };

        let text = format_mappings(&mappings, &selection, &catalogue.names, summary);
        // Position 2 maps back to catalogue index 5 (name f6).
        assert!(text.contains("f6"));
        assert!(text.contains("mapped=1"));
        assert!(text.contains("unmapped=1"));
        assert!(text.lines().last().unwrap().contains('-'));
    }
}
