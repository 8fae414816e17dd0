//! Mathematical utilities: deviation metrics and least squares.

pub mod deviation;
pub mod ols;

pub use deviation::*;
pub use ols::*;
