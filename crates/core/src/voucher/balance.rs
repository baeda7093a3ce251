//! Debit/credit balance per group.

use rust_decimal::Decimal;
use serde::Serialize;

use super::entry::{EntryKind, EntryRecord};
use super::group::{EntryGroup, EntryGroups, group_entries};

/// A group whose debit and credit totals differ by more than the tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceViolation {
    /// The offending group key.
    pub group_key: String,
    /// Sum of debit amounts.
    pub debit_total: Decimal,
    /// Sum of credit amounts.
    pub credit_total: Decimal,
    /// Absolute difference between the two totals.
    pub difference: Decimal,
    /// A total exceeded the representable range and was saturated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overflowed: bool,
}

/// Debit and credit sums of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupTotals {
    /// Sum of debit amounts.
    pub debit: Decimal,
    /// Sum of credit amounts.
    pub credit: Decimal,
    /// A sum left the representable range; the affected side is saturated.
    pub overflowed: bool,
}

impl GroupTotals {
    /// Sums a group. Entries of unrecognized kind add to neither side.
    ///
    /// Sums that leave the `Decimal` range saturate at `Decimal::MAX` or
    /// `Decimal::MIN` and mark the totals as overflowed.
    #[must_use]
    pub fn of(group: &EntryGroup<'_>) -> Self {
        group
            .entries()
            .iter()
            .fold(Self::default(), |mut totals, entry| {
                let side = match entry.kind {
                    EntryKind::Debit => &mut totals.debit,
                    EntryKind::Credit => &mut totals.credit,
                    EntryKind::Unrecognized(_) => return totals,
                };
                if let Some(sum) = side.checked_add(entry.amount) {
                    *side = sum;
                } else {
                    *side = if entry.amount.is_sign_negative() {
                        Decimal::MIN
                    } else {
                        Decimal::MAX
                    };
                    totals.overflowed = true;
                }
                totals
            })
    }

    /// Returns `|debit - credit|`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit
            .checked_sub(self.credit)
            .map_or(Decimal::MAX, |difference| difference.abs())
    }

    /// Returns true if the difference does not exceed `tolerance`.
    /// Overflowed totals never balance.
    #[must_use]
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        !self.overflowed && self.difference() <= tolerance
    }
}

/// Checks that every group nets to zero within `tolerance`.
#[must_use]
pub fn check_balance(entries: &[EntryRecord], tolerance: Decimal) -> Vec<BalanceViolation> {
    balance_violations(&group_entries(entries), tolerance)
}

/// Same as [`check_balance`] over an existing grouping.
#[must_use]
pub fn balance_violations(groups: &EntryGroups<'_>, tolerance: Decimal) -> Vec<BalanceViolation> {
    groups
        .iter()
        .filter_map(|group| {
            let totals = GroupTotals::of(group);
            if totals.is_balanced(tolerance) {
                return None;
            }
            Some(BalanceViolation {
                group_key: group.key().to_string(),
                debit_total: totals.debit,
                credit_total: totals.credit,
                difference: totals.difference(),
                overflowed: totals.overflowed,
            })
        })
        .collect()
}
