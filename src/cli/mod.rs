//! Command-line parsing for the candidate-selection tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the scoring/mapping code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ideal",
    version,
    about = "Candidate-function selection and test-point mapping"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score the catalogue, select the best four candidates, map the test
    /// table, and print the report (optionally plot/export).
    Run(RunArgs),
    /// Print catalogue scores and the selected subset only.
    Select(SelectArgs),
    /// Fit the linear regression diagnostic on a training table.
    Diagnose(DiagnoseArgs),
    /// Run the full pipeline on a seeded synthetic dataset (no input files).
    Demo(DemoArgs),
    /// Plot a previously exported run JSON.
    Plot(PlotArgs),
}

/// Input tables shared by `run` and `select`.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Training table CSV (columns: x, y1..y4).
    #[arg(long)]
    pub train: PathBuf,

    /// Candidate catalogue CSV (column x plus one column per candidate).
    #[arg(long)]
    pub catalogue: PathBuf,
}

/// Output/behavior options shared by `run` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Show the best-N candidate scores in the report.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-row mapping results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full run (selection + grids + mappings) to JSON.
    #[arg(long = "export-run")]
    pub export_run: Option<PathBuf>,

    /// Overwrite populated export files instead of refusing.
    #[arg(long)]
    pub force: bool,

    /// Fit and report the regression diagnostic.
    #[arg(long)]
    pub diagnose: bool,

    /// Write a markdown debug bundle under debug/.
    #[arg(long = "debug-bundle")]
    pub debug_bundle: bool,
}

/// Arguments for `ideal run`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Test table CSV (columns: x, y).
    #[arg(long)]
    pub test: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `ideal select`.
#[derive(Debug, Parser, Clone)]
pub struct SelectArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Show the best-N candidate scores.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Arguments for `ideal diagnose`.
#[derive(Debug, Parser, Clone)]
pub struct DiagnoseArgs {
    /// Training table CSV (columns: x, y1..y4).
    #[arg(long)]
    pub train: PathBuf,
}

/// Arguments for `ideal demo`.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Random seed for dataset generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Grid rows shared by the training table and the catalogue.
    #[arg(long, default_value_t = 400)]
    pub rows: usize,

    /// Catalogue width.
    #[arg(long, default_value_t = 50)]
    pub candidates: usize,

    /// Test rows to generate.
    #[arg(long = "test-rows", default_value_t = 100)]
    pub test_rows: usize,

    /// Std dev of the Gaussian noise added to outputs.
    #[arg(long, default_value_t = 0.25)]
    pub noise: f64,

    /// Left edge of the x grid.
    #[arg(long = "x-min", default_value_t = -20.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Right edge of the x grid.
    #[arg(long = "x-max", default_value_t = 20.0, allow_hyphen_values = true)]
    pub x_max: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `ideal plot`.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Run JSON produced by `--export-run`.
    #[arg(long)]
    pub run: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
