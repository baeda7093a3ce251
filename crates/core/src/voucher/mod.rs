//! Journal-voucher batch validation.
//!
//! This module implements the checks a batch must pass before submission:
//! - Line entries (debits and credits with document and posting dates)
//! - Grouping by serial number
//! - Entry count limit per group
//! - Debit/credit balance per group
//! - Date consistency per group
//! - The aggregate report and its submission gate

pub mod balance;
pub mod dates;
pub mod entry;
pub mod error;
pub mod group;
pub mod limit;
pub mod report;
pub mod summary;

#[cfg(test)]
mod validation_props;

pub use balance::{BalanceViolation, GroupTotals, check_balance};
pub use dates::{
    DateConsistencyViolation, EntryDateSnapshot, NormalizedDate, check_date_consistency,
    normalize_date,
};
pub use entry::{EntryKind, EntryRecord};
pub use error::BatchRejected;
pub use group::{EntryGroup, EntryGroups, group_entries};
pub use limit::{EntryLimitViolation, check_entry_limit};
pub use report::{TaggedViolation, ValidationOptions, ValidationReport, ViolationType, validate_batch};
pub use summary::{GroupSummary, summarize_groups};
