//! Candidate scoring and subset selection.
//!
//! Responsibilities:
//!
//! - score every catalogue column against the training outputs (`score`)
//! - pick the best-fitting subset and its admission statistics (`selection`)

pub mod score;
pub mod selection;

pub use score::*;
pub use selection::*;
