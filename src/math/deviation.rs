//! Root-sum-of-squares deviation metrics.
//!
//! Two shapes come up in the pipeline:
//!
//! - paired samples (a test observation vs. a candidate, component by
//!   component)
//! - a multi-output observation vs. a single candidate value (the candidate
//!   column holds one value per grid row, compared against all outputs of
//!   that row)
//!
//! Both reduce to `sqrt(Σ d²)`; for a single component this is `|d|`.
//!
//! Deviations are always evaluated pointwise, at one grid position. Comparing
//! an observation against a whole candidate series is a scoring concern, not
//! a deviation.

/// Deviation between paired samples of equal length.
///
/// # Panics
/// Panics if the slices differ in length. Callers compare values drawn from
/// the same row, so lengths are equal by construction.
pub fn deviation(observed: &[f64], candidate: &[f64]) -> f64 {
    assert_eq!(
        observed.len(),
        candidate.len(),
        "deviation requires paired samples"
    );
    observed
        .iter()
        .zip(candidate.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

/// Deviation of a multi-output observation from one candidate value.
pub fn deviation_to_value(observed: &[f64], value: f64) -> f64 {
    observed
        .iter()
        .map(|a| (a - value) * (a - value))
        .sum::<f64>()
        .sqrt()
}
