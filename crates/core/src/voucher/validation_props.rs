//! Property-based tests for batch validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::check_balance;
use super::dates::check_date_consistency;
use super::entry::{EntryKind, EntryRecord};
use super::group::group_entries;
use super::limit::check_entry_limit;
use super::report::{ValidationOptions, ViolationType, validate_batch};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an entry kind, including placeholder labels.
fn entry_kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        4 => Just(EntryKind::Debit),
        4 => Just(EntryKind::Credit),
        1 => Just(EntryKind::parse("Memo")),
    ]
}

/// Strategy to generate a group key, blank keys included.
fn group_key_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        6 => "[1-5]".prop_map(Some),
        1 => Just(None),
        1 => Just(Some(String::new())),
        1 => Just(Some("   ".to_string())),
    ]
}

/// Strategy to generate a date in one of several notations.
fn date_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("2024-01-01".to_string()),
        Just("01/01/2024".to_string()),
        Just("2024-01-02".to_string()),
        Just("not a date".to_string()),
    ]
}

fn entry_strategy() -> impl Strategy<Value = EntryRecord> {
    (
        group_key_strategy(),
        entry_kind_strategy(),
        positive_amount(),
        date_strategy(),
        date_strategy(),
    )
        .prop_map(|(key, kind, amount, document_date, posting_date)| {
            let mut entry = EntryRecord::new(String::new(), kind, amount)
                .with_dates(document_date, posting_date);
            entry.group_key = key;
            entry
        })
}

fn keyed(key: &str, kind: EntryKind, amount: Decimal) -> EntryRecord {
    EntryRecord::new(key, kind, amount).with_dates("2024-01-01", "2024-01-01")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Grouping the same batch twice yields the same keys and member order.
    #[test]
    fn prop_grouping_is_deterministic(entries in prop::collection::vec(entry_strategy(), 0..40)) {
        let first = group_entries(&entries);
        let second = group_entries(&entries);
        prop_assert_eq!(first, second);
    }

    /// Every keyed entry lands in exactly one group; the rest are counted as skipped.
    #[test]
    fn prop_grouping_partitions_keyed_entries(entries in prop::collection::vec(entry_strategy(), 0..40)) {
        let groups = group_entries(&entries);
        let grouped: usize = groups.iter().map(|group| group.len()).sum();
        let keyed = entries.iter().filter(|e| e.normalized_group_key().is_some()).count();
        prop_assert_eq!(grouped, keyed);
        prop_assert_eq!(groups.skipped(), entries.len() - keyed);
    }

    /// Entries without a key never show up in any violation.
    #[test]
    fn prop_blank_keys_never_reported(
        kinds in prop::collection::vec(entry_kind_strategy(), 1..20),
        amount in positive_amount(),
        blank in prop_oneof![Just(None), Just(Some(String::new())), Just(Some(" \t ".to_string()))],
    ) {
        let entries: Vec<EntryRecord> = kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                let mut entry = EntryRecord::new(String::new(), kind, amount)
                    .with_dates(format!("2024-01-{:02}", i % 28 + 1), "2024-02-01");
                entry.group_key.clone_from(&blank);
                entry
            })
            .collect();

        let options = ValidationOptions { max_entries: 0, ..ValidationOptions::default() };
        let report = validate_batch(&entries, &options);
        prop_assert!(report.is_valid);
    }

    /// A group at the limit passes; one more entry produces exactly one violation.
    #[test]
    fn prop_entry_limit_boundary(limit in 1usize..60) {
        let at_limit: Vec<EntryRecord> =
            (0..limit).map(|_| keyed("1", EntryKind::Debit, Decimal::ONE)).collect();
        prop_assert!(check_entry_limit(&at_limit, limit).is_empty());

        let mut over = at_limit;
        over.push(keyed("1", EntryKind::Debit, Decimal::ONE));
        let violations = check_entry_limit(&over, limit);
        prop_assert_eq!(violations.len(), 1);
        prop_assert_eq!(violations[0].count, limit + 1);
        prop_assert_eq!(violations[0].limit, limit);
    }

    /// Equal debit and credit balance; a shift beyond tolerance is reported
    /// with the exact absolute difference.
    #[test]
    fn prop_balance_symmetry(
        amount in positive_amount(),
        shift_cents in prop_oneof![-100_000i64..-1, 2i64..100_000],
        shift_debit in any::<bool>(),
    ) {
        let tolerance = Decimal::new(1, 2);
        let balanced = vec![
            keyed("1", EntryKind::Debit, amount),
            keyed("1", EntryKind::Credit, amount),
        ];
        prop_assert!(check_balance(&balanced, tolerance).is_empty());

        let shift = Decimal::new(shift_cents, 2);
        // Keep the shifted amount positive.
        prop_assume!(amount + shift > Decimal::ZERO);
        let (debit, credit) = if shift_debit { (amount + shift, amount) } else { (amount, amount + shift) };
        prop_assume!((debit - credit).abs() > tolerance);

        let shifted = vec![
            keyed("1", EntryKind::Debit, debit),
            keyed("1", EntryKind::Credit, credit),
        ];
        let violations = check_balance(&shifted, tolerance);
        prop_assert_eq!(violations.len(), 1);
        prop_assert_eq!(violations[0].difference, shift.abs());
        prop_assert_eq!(violations[0].debit_total, debit);
        prop_assert_eq!(violations[0].credit_total, credit);
    }

    /// A single entry never produces a date violation, whatever its dates.
    #[test]
    fn prop_single_entry_exempt_from_dates(
        document_date in ".*",
        posting_date in ".*",
        kind in entry_kind_strategy(),
    ) {
        let entries = vec![EntryRecord::new("1", kind, Decimal::ONE).with_dates(document_date, posting_date)];
        prop_assert!(check_date_consistency(&entries).is_empty());
    }

    /// Disabling the balance check hides a batch whose only problem is balance.
    #[test]
    fn prop_balance_flag_gates(debit in positive_amount(), credit in positive_amount()) {
        prop_assume!((debit - credit).abs() > Decimal::new(1, 2));
        let entries = vec![
            keyed("1", EntryKind::Debit, debit),
            keyed("1", EntryKind::Credit, credit),
        ];

        let full = validate_batch(&entries, &ValidationOptions::default());
        prop_assert!(!full.is_valid);
        prop_assert!(full.error_of(ViolationType::Balance).is_some());

        let options = ValidationOptions { check_balance: false, ..ValidationOptions::default() };
        prop_assert!(validate_batch(&entries, &options).is_valid);
    }

    /// `isValid` is true exactly when there are no errors.
    #[test]
    fn prop_validity_matches_errors(entries in prop::collection::vec(entry_strategy(), 0..40)) {
        let report = validate_batch(&entries, &ValidationOptions::default());
        prop_assert_eq!(report.is_valid, report.errors.is_empty());
    }
}
