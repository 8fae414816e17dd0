//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - mapping result export with overwrite gating (`export`)
//! - saved-run JSON read/write (`run_file`)

pub mod export;
pub mod ingest;
pub mod run_file;

pub use export::*;
pub use ingest::*;
pub use run_file::*;
