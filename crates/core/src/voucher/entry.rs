//! Journal-voucher line entry domain types.

use std::collections::BTreeMap;

use ledgerline_shared::types::EntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of the balance an entry contributes to.
///
/// Labels that are neither debit nor credit are kept as `Unrecognized`
/// rather than rejected; such entries contribute to neither side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
    /// Any other label, kept verbatim (trimmed).
    Unrecognized(String),
}

impl EntryKind {
    /// Parses a kind label. Case-insensitive; accepts `Debit`/`Dr`/`D`
    /// and `Credit`/`Cr`/`C`.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "debit" | "dr" | "d" => Self::Debit,
            "credit" | "cr" | "c" => Self::Credit,
            _ => Self::Unrecognized(label.to_string()),
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
            Self::Unrecognized(label) => label,
        }
    }

    /// Returns true for `Debit` and `Credit`.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for EntryKind {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for EntryKind {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Unrecognized(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single journal-voucher line entry.
///
/// Entries sharing a group key (the user-supplied serial number) must net to
/// zero together and agree on their dates. Dates are kept as supplied; see
/// [`super::dates::normalize_date`] for how they are compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    /// Unique identifier for this entry.
    #[serde(default)]
    pub id: EntryId,
    /// Serial number clustering entries that must balance together.
    #[serde(default)]
    pub group_key: Option<String>,
    /// Whether this is a debit or credit.
    pub kind: EntryKind,
    /// Amount in document currency.
    #[serde(default)]
    pub amount: Decimal,
    /// Date of the originating financial document, as supplied.
    #[serde(default)]
    pub document_date: Option<String>,
    /// Date the entry is to be posted to the ledger, as supplied.
    #[serde(default)]
    pub posting_date: Option<String>,
    /// Descriptive fields (business area, account type, remarks, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl EntryRecord {
    /// Creates an entry with a fresh id and no dates or attributes.
    #[must_use]
    pub fn new(group_key: impl Into<String>, kind: EntryKind, amount: Decimal) -> Self {
        Self {
            id: EntryId::new(),
            group_key: Some(group_key.into()),
            kind,
            amount,
            document_date: None,
            posting_date: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets both document and posting date.
    #[must_use]
    pub fn with_dates(mut self, document_date: impl Into<String>, posting_date: impl Into<String>) -> Self {
        self.document_date = Some(document_date.into());
        self.posting_date = Some(posting_date.into());
        self
    }

    /// Adds a descriptive attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the trimmed group key, or `None` when absent or blank.
    #[must_use]
    pub fn normalized_group_key(&self) -> Option<&str> {
        self.group_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_parse_aliases() {
        assert_eq!(EntryKind::parse("Debit"), EntryKind::Debit);
        assert_eq!(EntryKind::parse(" dr "), EntryKind::Debit);
        assert_eq!(EntryKind::parse("D"), EntryKind::Debit);
        assert_eq!(EntryKind::parse("CREDIT"), EntryKind::Credit);
        assert_eq!(EntryKind::parse("Cr"), EntryKind::Credit);
        assert_eq!(
            EntryKind::parse(" Memo "),
            EntryKind::Unrecognized("Memo".to_string())
        );
    }

    #[test]
    fn test_kind_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&EntryKind::Debit).unwrap(), "\"Debit\"");
        let kind: EntryKind = serde_json::from_str("\"credit\"").unwrap();
        assert_eq!(kind, EntryKind::Credit);
        let kind: EntryKind = serde_json::from_str("\"Placeholder\"").unwrap();
        assert!(!kind.is_recognized());
    }

    #[test]
    fn test_normalized_group_key() {
        let mut entry = EntryRecord::new("  7 ", EntryKind::Debit, dec!(1));
        assert_eq!(entry.normalized_group_key(), Some("7"));

        entry.group_key = Some("   ".to_string());
        assert_eq!(entry.normalized_group_key(), None);

        entry.group_key = None;
        assert_eq!(entry.normalized_group_key(), None);
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "groupKey": "1",
            "kind": "Debit",
            "amount": "100.00",
            "documentDate": "2024-01-01",
            "postingDate": "2024-01-01",
            "attributes": { "businessArea": "BA01" }
        }"#;
        let entry: EntryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(entry.normalized_group_key(), Some("1"));
        assert_eq!(entry.kind, EntryKind::Debit);
        assert_eq!(entry.amount, dec!(100.00));
        assert_eq!(entry.document_date.as_deref(), Some("2024-01-01"));
        assert_eq!(entry.attributes.get("businessArea").map(String::as_str), Some("BA01"));
    }

    #[test]
    fn test_deserialize_numeric_amount() {
        let entry: EntryRecord =
            serde_json::from_str(r#"{ "groupKey": "1", "kind": "Credit", "amount": 90 }"#).unwrap();
        assert_eq!(entry.amount, dec!(90));
        assert_eq!(entry.document_date, None);
    }
}
