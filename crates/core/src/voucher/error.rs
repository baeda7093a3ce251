//! Error raised when a failing batch is gated before submission.

use ledgerline_shared::AppError;
use thiserror::Error;

use super::report::ValidationReport;

/// A batch that did not pass validation.
///
/// Carries the full report so the caller can still show every violation.
#[derive(Debug, Error)]
#[error("Batch failed validation with {} violation(s)", .report.violation_count())]
pub struct BatchRejected {
    report: ValidationReport,
}

impl BatchRejected {
    pub(crate) fn new(report: ValidationReport) -> Self {
        Self { report }
    }

    /// The report that caused the rejection.
    #[must_use]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Stable error codes of the failed checks, in check order.
    #[must_use]
    pub fn error_codes(&self) -> Vec<&'static str> {
        self.report.errors.iter().map(|e| e.error_code()).collect()
    }
}

impl From<BatchRejected> for AppError {
    fn from(err: BatchRejected) -> Self {
        let details = err
            .report
            .errors
            .iter()
            .map(|e| e.message())
            .collect::<Vec<_>>()
            .join("; ");
        Self::BatchRejected(details)
    }
}
