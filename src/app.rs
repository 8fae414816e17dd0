//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads input tables (or generates the demo dataset)
//! - runs scoring + selection + mapping
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, DemoArgs, DiagnoseArgs, OutputArgs, PlotArgs, RunArgs, SelectArgs};
use crate::domain::{MapConfig, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

use pipeline::RunOutput;

/// Entry point for the `ideal` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Select(args) => handle_select(args),
        Command::Diagnose(args) => handle_diagnose(args),
        Command::Demo(args) => handle_demo(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = map_config_from_args(&args.output);
    let run = pipeline::run_mapping(
        &args.inputs.train,
        &args.inputs.catalogue,
        &args.test,
        &config,
    )?;

    finish_run(&run, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = map_config_from_args(&args.output);
    let sample_config = SampleConfig {
        seed: args.seed,
        rows: args.rows,
        candidates: args.candidates,
        test_rows: args.test_rows,
        noise_sigma: args.noise,
        x_min: args.x_min,
        x_max: args.x_max,
    };

    let data = crate::data::sample::generate_sample(&sample_config)?;
    println!(
        "Demo dataset: seed={} | planted catalogue indices: {:?}",
        args.seed, data.planted
    );

    let run = pipeline::run_mapping_with_tables(data.train, data.catalogue, data.test, &config)?;
    finish_run(&run, &config)
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let train = crate::io::ingest::load_training_table(&args.inputs.train)?;
    let catalogue = crate::io::ingest::load_candidate_table(&args.inputs.catalogue)?;

    let selection = crate::fit::selection::select_candidates(&train, &catalogue)?;
    println!(
        "{}",
        crate::report::format_selection(&selection, &catalogue, args.top)
    );

    Ok(())
}

fn handle_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let train = crate::io::ingest::load_training_table(&args.train)?;
    let diag = crate::diag::fit_diagnostic(&train)?;

    println!("{}", crate::report::format_diagnostic(&diag));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let run = crate::io::run_file::read_run_json(&args.run)?;
    let plot = crate::plot::render_ascii_plot(&run.mappings, &run.grid, args.width, args.height);

    println!("{plot}");
    Ok(())
}

/// Print the report (and plot) for a completed run, then write exports.
fn finish_run(run: &RunOutput, config: &MapConfig) -> Result<(), AppError> {
    println!(
        "{}",
        crate::report::format_run_summary(
            &run.train,
            &run.catalogue,
            &run.test,
            &run.selection,
            config.top_n
        )
    );

    if let Some(diag) = &run.diagnostic {
        println!("{}", crate::report::format_diagnostic(diag));
    }

    println!(
        "{}",
        crate::report::format_mappings(
            &run.mappings,
            &run.selection,
            &run.catalogue.names,
            run.summary
        )
    );

    if config.plot {
        let grid = crate::io::run_file::selected_grid(&run.catalogue, &run.selection);
        let plot = crate::plot::render_ascii_plot(
            &run.mappings,
            &grid,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_results {
        crate::io::export::write_mappings_csv(
            path,
            &run.mappings,
            &run.selection,
            &run.catalogue.names,
            config.force,
        )?;
    }
    if let Some(path) = &config.export_run {
        let file = crate::io::run_file::build_run_file(
            &run.catalogue,
            &run.selection,
            &run.mappings,
            run.diagnostic.clone(),
        );
        crate::io::run_file::write_run_json(path, &file, config.force)?;
    }

    if config.debug_bundle {
        let path = crate::debug::write_debug_bundle(
            &run.train,
            &run.catalogue,
            &run.test,
            &run.selection,
            &run.mappings,
        )?;
        println!("Debug bundle written to {}", path.display());
    }

    Ok(())
}

pub fn map_config_from_args(args: &OutputArgs) -> MapConfig {
    MapConfig {
        top_n: args.top,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_run: args.export_run.clone(),
        force: args.force,
        diagnose: args.diagnose,
        debug_bundle: args.debug_bundle,
    }
}
