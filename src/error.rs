//! Process-level error type.
//!
//! Every failure carries the exit code the binary should terminate with, so
//! errors can bubble up through the pipeline with `?` and `main` stays a
//! one-line translation to `ExitCode`.
//!
//! Exit code conventions used throughout the crate:
//!
//! - `2` — usage / input errors (bad CSV schema, unreadable files, refusing
//!   to overwrite a populated output)
//! - `3` — shape and configuration violations (row-count mismatch, fewer
//!   than 4 catalogue columns, off-grid test inputs)
//! - `4` — numerical/internal failures (singular regression, non-finite values)

/// Usage or input error.
pub const EXIT_USAGE: u8 = 2;
/// Shape or configuration violation.
pub const EXIT_SHAPE: u8 = 3;
/// Numerical or internal failure.
pub const EXIT_NUMERIC: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
