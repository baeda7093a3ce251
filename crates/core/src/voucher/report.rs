//! Batch validation entry point and its report.
//!
//! [`validate_batch`] is what submission and upload handlers call before a
//! batch may proceed. It groups the batch once, runs the enabled checks in a
//! fixed order (entry limit, balance, date consistency) and merges their
//! findings into a single [`ValidationReport`]. It never fails: problems are
//! reported as data.

use ledgerline_shared::config::{DEFAULT_MAX_ENTRIES, DEFAULT_TOLERANCE, ValidationConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::balance::{BalanceViolation, balance_violations};
use super::dates::{DateConsistencyViolation, date_consistency_violations};
use super::entry::EntryRecord;
use super::error::BatchRejected;
use super::group::group_entries;
use super::limit::{EntryLimitViolation, entry_limit_violations};

/// Which checks run and with what limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Maximum entries per group key.
    pub max_entries: usize,
    /// Absolute debit/credit tolerance per group.
    pub tolerance: Decimal,
    /// Run the entry-limit check.
    pub check_entry_limit: bool,
    /// Run the balance check.
    pub check_balance: bool,
    /// Run the date-consistency check.
    pub check_date_consistency: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            tolerance: DEFAULT_TOLERANCE,
            check_entry_limit: true,
            check_balance: true,
            check_date_consistency: true,
        }
    }
}

impl From<&ValidationConfig> for ValidationOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            tolerance: config.tolerance,
            check_entry_limit: config.check_entry_limit,
            check_balance: config.check_balance,
            check_date_consistency: config.check_date_consistency,
        }
    }
}

/// Kind of violation carried by a [`TaggedViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationType {
    /// Too many entries under one key.
    EntryLimit,
    /// Debits and credits of a key do not net to zero.
    Balance,
    /// Entries of a key disagree on dates.
    DateConsistency,
}

impl ViolationType {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EntryLimit => "ENTRY_LIMIT_EXCEEDED",
            Self::Balance => "UNBALANCED_GROUP",
            Self::DateConsistency => "INCONSISTENT_DATES",
        }
    }
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryLimit => write!(f, "entryLimit"),
            Self::Balance => write!(f, "balance"),
            Self::DateConsistency => write!(f, "dateConsistency"),
        }
    }
}

/// All violations of one kind, with a summary message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TaggedViolation {
    /// Entry-limit violations.
    #[serde(rename_all = "camelCase")]
    EntryLimit {
        /// Human-readable summary.
        message: String,
        /// One item per offending group.
        violations: Vec<EntryLimitViolation>,
    },
    /// Balance violations.
    #[serde(rename_all = "camelCase")]
    Balance {
        /// Human-readable summary.
        message: String,
        /// One item per offending group.
        violations: Vec<BalanceViolation>,
    },
    /// Date-consistency violations.
    #[serde(rename_all = "camelCase")]
    DateConsistency {
        /// Human-readable summary.
        message: String,
        /// One item per offending group.
        violations: Vec<DateConsistencyViolation>,
    },
}

impl TaggedViolation {
    fn entry_limit(violations: Vec<EntryLimitViolation>, limit: usize) -> Self {
        let groups = join_keys(violations.iter().map(|v| format!("{} ({} entries)", v.group_key, v.count)));
        Self::EntryLimit {
            message: format!("Serial numbers exceeding the limit of {limit} entries: {groups}"),
            violations,
        }
    }

    fn balance(violations: Vec<BalanceViolation>) -> Self {
        let groups = join_keys(violations.iter().map(|v| {
            if v.overflowed {
                return format!("{} (totals exceed the supported range)", v.group_key);
            }
            format!(
                "{} (debit {}, credit {}, difference {})",
                v.group_key, v.debit_total, v.credit_total, v.difference
            )
        }));
        Self::Balance {
            message: format!("Debit and credit totals do not match for serial numbers: {groups}"),
            violations,
        }
    }

    fn date_consistency(violations: Vec<DateConsistencyViolation>) -> Self {
        let groups = join_keys(violations.iter().map(|v| {
            let fields = match (v.document_date_inconsistent, v.posting_date_inconsistent) {
                (true, true) => "document and posting date",
                (true, false) => "document date",
                _ => "posting date",
            };
            format!("{} ({fields})", v.group_key)
        }));
        Self::DateConsistency {
            message: format!("Dates differ within serial numbers: {groups}"),
            violations,
        }
    }

    /// Returns the kind of violation.
    #[must_use]
    pub const fn violation_type(&self) -> ViolationType {
        match self {
            Self::EntryLimit { .. } => ViolationType::EntryLimit,
            Self::Balance { .. } => ViolationType::Balance,
            Self::DateConsistency { .. } => ViolationType::DateConsistency,
        }
    }

    /// Returns the summary message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::EntryLimit { message, .. }
            | Self::Balance { message, .. }
            | Self::DateConsistency { message, .. } => message,
        }
    }

    /// Returns the number of offending groups.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        match self {
            Self::EntryLimit { violations, .. } => violations.len(),
            Self::Balance { violations, .. } => violations.len(),
            Self::DateConsistency { violations, .. } => violations.len(),
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.violation_type().error_code()
    }
}

fn join_keys(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

/// Outcome of validating a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True iff every enabled check found nothing.
    pub is_valid: bool,
    /// At most one item per check, in check order.
    pub errors: Vec<TaggedViolation>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<TaggedViolation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Returns the item for one kind of violation, if that check failed.
    #[must_use]
    pub fn error_of(&self, violation_type: ViolationType) -> Option<&TaggedViolation> {
        self.errors
            .iter()
            .find(|error| error.violation_type() == violation_type)
    }

    /// Total number of offending groups across all checks.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.errors.iter().map(TaggedViolation::violation_count).sum()
    }

    /// Converts a failing report into an error so callers can gate
    /// submission with `?`.
    pub fn into_result(self) -> Result<(), BatchRejected> {
        if self.is_valid {
            Ok(())
        } else {
            Err(BatchRejected::new(self))
        }
    }
}

/// Validates a batch of entries.
///
/// Entries without a group key never take part in any check.
#[must_use]
pub fn validate_batch(entries: &[EntryRecord], options: &ValidationOptions) -> ValidationReport {
    let groups = group_entries(entries);
    debug!(
        entries = entries.len(),
        groups = groups.len(),
        skipped = groups.skipped(),
        "Validating journal voucher batch"
    );

    let mut errors = Vec::new();

    if options.check_entry_limit {
        let violations = entry_limit_violations(&groups, options.max_entries);
        if !violations.is_empty() {
            errors.push(TaggedViolation::entry_limit(violations, options.max_entries));
        }
    }

    if options.check_balance {
        let violations = balance_violations(&groups, options.tolerance);
        if !violations.is_empty() {
            errors.push(TaggedViolation::balance(violations));
        }
    }

    if options.check_date_consistency {
        let violations = date_consistency_violations(&groups);
        if !violations.is_empty() {
            errors.push(TaggedViolation::date_consistency(violations));
        }
    }

    let report = ValidationReport::from_errors(errors);
    debug!(
        is_valid = report.is_valid,
        violations = report.violation_count(),
        "Batch validation finished"
    );
    report
}
