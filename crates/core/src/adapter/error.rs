//! Row adapter error types.

use ledgerline_shared::AppError;
use thiserror::Error;

/// Errors that can occur while mapping a header row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A required column is absent from the header row.
    #[error("Required column missing: {0}")]
    MissingColumn(&'static str),

    /// The header row has no cells at all.
    #[error("Header row is empty")]
    EmptyHeader,
}

impl AdapterError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::EmptyHeader => "EMPTY_HEADER",
        }
    }
}

impl From<AdapterError> for AppError {
    fn from(err: AdapterError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
