//! Data sources.
//!
//! The pipeline itself is file-fed (`io::ingest`); this module provides the
//! seeded synthetic dataset behind `ideal demo`.

pub mod sample;

pub use sample::*;
