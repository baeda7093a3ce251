//! Per-group totals for display next to a validation report.

use rust_decimal::Decimal;
use serde::Serialize;

use super::balance::GroupTotals;
use super::entry::EntryRecord;
use super::group::{EntryGroups, group_entries};

/// Count and totals of one serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// The group key.
    pub group_key: String,
    /// Number of entries in the group.
    pub entry_count: usize,
    /// Sum of debit amounts.
    pub debit_total: Decimal,
    /// Sum of credit amounts.
    pub credit_total: Decimal,
    /// Absolute difference between the two totals.
    pub difference: Decimal,
    /// Whether the difference is within tolerance.
    pub is_balanced: bool,
}

/// Summarizes every group in first-appearance order.
#[must_use]
pub fn summarize_groups(entries: &[EntryRecord], tolerance: Decimal) -> Vec<GroupSummary> {
    group_summaries(&group_entries(entries), tolerance)
}

/// Same as [`summarize_groups`] over an existing grouping.
#[must_use]
pub fn group_summaries(groups: &EntryGroups<'_>, tolerance: Decimal) -> Vec<GroupSummary> {
    groups
        .iter()
        .map(|group| {
            let totals = GroupTotals::of(group);
            GroupSummary {
                group_key: group.key().to_string(),
                entry_count: group.len(),
                debit_total: totals.debit,
                credit_total: totals.credit,
                difference: totals.difference(),
                is_balanced: totals.is_balanced(tolerance),
            }
        })
        .collect()
}
