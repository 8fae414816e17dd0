//! Reporting utilities: formatted terminal output for runs and selections.

pub mod format;

pub use format::*;
