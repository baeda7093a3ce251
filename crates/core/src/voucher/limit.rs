//! Per-group entry count limit.

use serde::Serialize;

use super::entry::EntryRecord;
use super::group::{EntryGroups, group_entries};

/// A group holding more entries than allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryLimitViolation {
    /// The offending group key.
    pub group_key: String,
    /// Observed number of entries.
    pub count: usize,
    /// Configured maximum.
    pub limit: usize,
}

/// Checks every group against `max_entries`.
#[must_use]
pub fn check_entry_limit(entries: &[EntryRecord], max_entries: usize) -> Vec<EntryLimitViolation> {
    entry_limit_violations(&group_entries(entries), max_entries)
}

/// Same as [`check_entry_limit`] over an existing grouping.
#[must_use]
pub fn entry_limit_violations(groups: &EntryGroups<'_>, max_entries: usize) -> Vec<EntryLimitViolation> {
    groups
        .iter()
        .filter(|group| group.len() > max_entries)
        .map(|group| EntryLimitViolation {
            group_key: group.key().to_string(),
            count: group.len(),
            limit: max_entries,
        })
        .collect()
}
