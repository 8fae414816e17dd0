//! Synthetic demo dataset generation.
//!
//! `ideal demo` runs the full pipeline without input files: a catalogue of
//! analytic shapes sampled on a shared grid, a training table built from four
//! of those shapes plus Gaussian noise, and a noisy single-output test table
//! drawn from the same four shapes.
//!
//! Everything is driven by one `StdRng` seed, so a given seed reproduces the
//! dataset (and therefore the whole run) bit for bit.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{
    CandidateTable, SELECTED_COUNT, SampleConfig, TRAIN_OUTPUT_COUNT, TestRow, TestTable,
    TrainRow, TrainingTable,
};
use crate::error::{AppError, EXIT_NUMERIC, EXIT_USAGE};

/// A generated demo dataset.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub train: TrainingTable,
    pub catalogue: CandidateTable,
    pub test: TestTable,
    /// Catalogue indices the training outputs were generated from, in output
    /// order (`y1..y4`). Reported so a demo run can be checked by eye.
    pub planted: [usize; TRAIN_OUTPUT_COUNT],
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.rows < 2 {
        return Err(AppError::new(EXIT_USAGE, "Demo grid needs at least 2 rows."));
    }
    if config.candidates < SELECTED_COUNT {
        return Err(AppError::new(
            EXIT_USAGE,
            format!("Demo catalogue needs at least {SELECTED_COUNT} candidates."),
        ));
    }
    if config.test_rows == 0 {
        return Err(AppError::new(EXIT_USAGE, "Demo test table must not be empty."));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::new(EXIT_USAGE, "Invalid demo noise sigma."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(EXIT_USAGE, "Invalid demo x range."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sigma.max(f64::MIN_POSITIVE))
        .map_err(|e| AppError::new(EXIT_NUMERIC, format!("Noise distribution error: {e}")))?;

    // Shared grid.
    let step = (config.x_max - config.x_min) / (config.rows - 1) as f64;
    let x: Vec<f64> = (0..config.rows)
        .map(|i| config.x_min + step * i as f64)
        .collect();

    // Catalogue columns are analytic shapes, deterministic per index.
    let columns: Vec<Vec<f64>> = (0..config.candidates)
        .map(|index| x.iter().map(|&gx| catalogue_value(index, gx)).collect())
        .collect();
    let names = (1..=config.candidates).map(|i| format!("f{i}")).collect();
    let catalogue = CandidateTable {
        x: x.clone(),
        names,
        columns,
    };

    // Plant four distinct catalogue shapes as the truth behind y1..y4.
    let mut planted = [0usize; TRAIN_OUTPUT_COUNT];
    let picks = rand::seq::index::sample(&mut rng, config.candidates, TRAIN_OUTPUT_COUNT);
    for (slot, pick) in planted.iter_mut().zip(picks.iter()) {
        *slot = pick;
    }

    let noise = |rng: &mut StdRng| {
        if config.noise_sigma > 0.0 {
            normal.sample(rng)
        } else {
            0.0
        }
    };

    let mut train_rows = Vec::with_capacity(config.rows);
    for (row, &gx) in x.iter().enumerate() {
        let mut y = [0.0; TRAIN_OUTPUT_COUNT];
        for (m, slot) in y.iter_mut().enumerate() {
            *slot = catalogue.value(row, planted[m]) + noise(&mut rng);
        }
        train_rows.push(TrainRow { x: gx, y });
    }
    let train = TrainingTable { rows: train_rows };

    // Test rows sit on the grid but sample the planted shapes at random.
    let mut test_rows = Vec::with_capacity(config.test_rows);
    for _ in 0..config.test_rows {
        let row = rng.gen_range(0..config.rows);
        let m = rng.gen_range(0..TRAIN_OUTPUT_COUNT);
        let y = catalogue.value(row, planted[m]) + noise(&mut rng);
        test_rows.push(TestRow { x: x[row], y });
    }
    let test = TestTable { rows: test_rows };

    Ok(SampleData {
        train,
        catalogue,
        test,
        planted,
    })
}

/// Analytic shape for catalogue column `index`.
///
/// Cycles through a small family and scales with the index so every column is
/// distinct across arbitrarily wide catalogues.
fn catalogue_value(index: usize, x: f64) -> f64 {
    let k = (index / 8 + 1) as f64;
    match index % 8 {
        0 => (k * 0.5 * x).sin(),
        1 => (k * 0.5 * x).cos(),
        2 => 0.5 * k * x,
        3 => 0.05 * k * x * x,
        4 => 0.002 * k * x * x * x,
        5 => k * x.abs().sqrt(),
        6 => (x / (2.0 * k)).tanh(),
        _ => 1.5 * k - 0.25 * x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SampleConfig {
        SampleConfig {
            seed: 42,
            rows: 100,
            candidates: 20,
            test_rows: 25,
            noise_sigma: 0.1,
            x_min: -10.0,
            x_max: 10.0,
        }
    }

    #[test]
    fn same_seed_reproduces_the_dataset() {
        let a = generate_sample(&config()).unwrap();
        let b = generate_sample(&config()).unwrap();

        assert_eq!(a.planted, b.planted);
        assert_eq!(a.train.rows, b.train.rows);
        assert_eq!(a.test.rows, b.test.rows);
        assert_eq!(a.catalogue.columns, b.catalogue.columns);
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_sample(&config()).unwrap();
        let mut cfg = config();
        cfg.seed = 43;
        let b = generate_sample(&cfg).unwrap();

        assert!(a.train.rows != b.train.rows || a.planted != b.planted);
    }

    #[test]
    fn tables_share_the_grid() {
        let data = generate_sample(&config()).unwrap();

        assert_eq!(data.train.len(), data.catalogue.len());
        for (r, &gx) in data.train.rows.iter().zip(data.catalogue.x.iter()) {
            assert_eq!(r.x, gx);
        }
        for r in &data.test.rows {
            assert!(data.catalogue.position_of_x(r.x).is_some());
        }
    }

    #[test]
    fn planted_indices_are_distinct_and_in_range() {
        let data = generate_sample(&config()).unwrap();

        let mut planted = data.planted.to_vec();
        planted.sort_unstable();
        planted.dedup();
        assert_eq!(planted.len(), TRAIN_OUTPUT_COUNT);
        assert!(planted.iter().all(|&i| i < config().candidates));
    }

    #[test]
    fn noiseless_sample_recovers_planted_shapes() {
        let mut cfg = config();
        cfg.noise_sigma = 0.0;
        let data = generate_sample(&cfg).unwrap();

        for (row, r) in data.train.rows.iter().enumerate() {
            for (m, &y) in r.y.iter().enumerate() {
                assert_eq!(y, data.catalogue.value(row, data.planted[m]));
            }
        }
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut cfg = config();
        cfg.candidates = 3;
        assert_eq!(generate_sample(&cfg).unwrap_err().exit_code(), 2);

        let mut cfg = config();
        cfg.noise_sigma = f64::NAN;
        assert_eq!(generate_sample(&cfg).unwrap_err().exit_code(), 2);
    }
}
