//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the three input tables (`TrainingTable`, `CandidateTable`, `TestTable`)
//! - selection outputs (`CandidateScore`, `SelectedCandidate`, `Selection`)
//! - mapping outputs (`Assigned`, `Mapping`)
//! - run configuration and the saved-run JSON schema (`RunFile`)

pub mod types;

pub use types::*;
