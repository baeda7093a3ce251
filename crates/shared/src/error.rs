//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input could not be turned into entries.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Batch failed validation and may not be submitted.
    #[error("Batch rejected: {0}")]
    BatchRejected(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    ///
    /// `1` is reserved for rejected batches so scripts can tell a failing
    /// batch apart from a broken invocation.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::BatchRejected(_) => 1,
            Self::InvalidInput(_) | Self::Config(_) | Self::Io(_) => 2,
        }
    }

    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::BatchRejected(_) => "BATCH_REJECTED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
