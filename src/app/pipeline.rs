//! Shared mapping-pipeline logic used by the `run` and `demo` front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load/generate tables -> score -> select -> map -> summarize (+ diagnostic)
//!
//! The subcommands can then focus on presentation (printing vs exports).

use std::path::Path;

use crate::assign::{MappingSummary, map_test_rows, summarize};
use crate::diag::fit_diagnostic;
use crate::domain::{
    CandidateTable, Diagnostic, MapConfig, Mapping, Selection, TestTable, TrainingTable,
};
use crate::error::AppError;
use crate::fit::selection::select_candidates;
use crate::io::ingest::{load_candidate_table, load_test_table, load_training_table};

/// All computed outputs of a single mapping run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub train: TrainingTable,
    pub catalogue: CandidateTable,
    pub test: TestTable,
    pub selection: Selection,
    pub mappings: Vec<Mapping>,
    pub summary: MappingSummary,
    pub diagnostic: Option<Diagnostic>,
}

/// Load the three tables and execute the full mapping pipeline.
pub fn run_mapping(
    train_path: &Path,
    catalogue_path: &Path,
    test_path: &Path,
    config: &MapConfig,
) -> Result<RunOutput, AppError> {
    let train = load_training_table(train_path)?;
    let catalogue = load_candidate_table(catalogue_path)?;
    let test = load_test_table(test_path)?;

    run_mapping_with_tables(train, catalogue, test, config)
}

/// Execute the mapping pipeline on pre-built tables.
///
/// This is the entry point for `ideal demo`, which generates its tables in
/// memory instead of loading files.
pub fn run_mapping_with_tables(
    train: TrainingTable,
    catalogue: CandidateTable,
    test: TestTable,
    config: &MapConfig,
) -> Result<RunOutput, AppError> {
    let selection = select_candidates(&train, &catalogue)?;
    let mappings = map_test_rows(&test, &catalogue, &selection)?;
    let summary = summarize(&mappings);

    let diagnostic = if config.diagnose {
        Some(fit_diagnostic(&train)?)
    } else {
        None
    };

    Ok(RunOutput {
        train,
        catalogue,
        test,
        selection,
        mappings,
        summary,
        diagnostic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::generate_sample;
    use crate::domain::{SELECTED_COUNT, SampleConfig};

    fn map_config() -> MapConfig {
        MapConfig {
            top_n: 10,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_run: None,
            force: false,
            diagnose: false,
            debug_bundle: false,
        }
    }

    fn sample_config() -> SampleConfig {
        SampleConfig {
            seed: 7,
            rows: 200,
            candidates: 24,
            test_rows: 50,
            noise_sigma: 0.05,
            x_min: -10.0,
            x_max: 10.0,
        }
    }

    #[test]
    fn pipeline_is_deterministic_end_to_end() {
        let run = |seed: u64| {
            let mut cfg = sample_config();
            cfg.seed = seed;
            let data = generate_sample(&cfg).unwrap();
            run_mapping_with_tables(data.train, data.catalogue, data.test, &map_config()).unwrap()
        };

        let a = run(7);
        let b = run(7);

        assert_eq!(a.selection.chosen, b.selection.chosen);
        assert_eq!(a.mappings, b.mappings);
    }

    #[test]
    fn selection_recovers_generating_candidates() {
        // Catalogue of constant levels; training outputs are four of them.
        // The generating candidates each have one zero pooled term, the
        // far-away levels have none, so the subset is unambiguous.
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let levels = [0.0, 1.0, 2.0, 3.0, 50.0, 60.0, 70.0];
        let catalogue = CandidateTable {
            x: x.clone(),
            names: (1..=levels.len()).map(|i| format!("f{i}")).collect(),
            columns: levels.iter().map(|&v| vec![v; x.len()]).collect(),
        };
        let train = TrainingTable {
            rows: x
                .iter()
                .map(|&gx| crate::domain::TrainRow {
                    x: gx,
                    y: [0.0, 1.0, 2.0, 3.0],
                })
                .collect(),
        };
        let test = TestTable {
            rows: vec![crate::domain::TestRow { x: 0.0, y: 1.5 }],
        };

        let out = run_mapping_with_tables(train, catalogue, test, &map_config()).unwrap();

        let mut selected: Vec<usize> = out.selection.chosen.iter().map(|c| c.index).collect();
        selected.sort_unstable();
        assert_eq!(selected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_mapping_round_trips_to_a_selected_index() {
        let data = generate_sample(&sample_config()).unwrap();
        let out =
            run_mapping_with_tables(data.train, data.catalogue, data.test, &map_config()).unwrap();

        assert_eq!(out.mappings.len(), out.test.len());
        let selected: Vec<usize> = out.selection.chosen.iter().map(|c| c.index).collect();

        for m in &out.mappings {
            if let Some(a) = m.assigned {
                assert!(a.position < SELECTED_COUNT);
                let index = out.selection.catalogue_index(a.position).unwrap();
                assert!(selected.contains(&index));
                assert!(index < out.catalogue.candidate_count());
            }
        }

        assert_eq!(
            out.summary.mapped + out.summary.unmapped,
            out.mappings.len()
        );
    }

    #[test]
    fn diagnostic_is_computed_only_on_request() {
        let data = generate_sample(&sample_config()).unwrap();
        let mut config = map_config();
        config.diagnose = true;

        let out =
            run_mapping_with_tables(data.train, data.catalogue, data.test, &config).unwrap();
        let diag = out.diagnostic.expect("diagnostic requested");
        assert_eq!(diag.outputs.len(), 4);
        assert!(diag.mean_r_squared <= 1.0);
    }
}
