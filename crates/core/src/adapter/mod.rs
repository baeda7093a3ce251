//! Mapping of loosely-typed tabular rows onto entries.
//!
//! Upload handlers read spreadsheets into a header row plus string cells.
//! Column naming varies between templates ("Sr. No." vs "Serial Number",
//! "Dr/Cr" vs "Type"), so the adapter resolves headers against known aliases
//! once and then turns every data row into a typed [`EntryRecord`]. The
//! validation core never looks at raw headers.

pub mod columns;
pub mod error;

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::voucher::entry::{EntryKind, EntryRecord};

pub use columns::{Field, normalize_header};
pub use error::AdapterError;

/// Resolved column positions for one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAdapter {
    headers: Vec<String>,
    group_key: usize,
    kind: usize,
    amount: usize,
    document_date: Option<usize>,
    posting_date: Option<usize>,
}

impl RowAdapter {
    /// Resolves a header row. When two headers name the same field, the
    /// first one wins and the other is kept as a plain attribute.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError` if the header row is empty or lacks a serial
    /// number, debit/credit or amount column.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, AdapterError> {
        if headers.is_empty() {
            return Err(AdapterError::EmptyHeader);
        }

        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().trim().to_string()).collect();
        let position = |field: Field| {
            headers
                .iter()
                .position(|header| Field::for_header(header) == Some(field))
        };
        let required =
            |field: Field| position(field).ok_or(AdapterError::MissingColumn(field.name()));

        let group_key = required(Field::GroupKey)?;
        let kind = required(Field::Kind)?;
        let amount = required(Field::Amount)?;
        let document_date = position(Field::DocumentDate);
        let posting_date = position(Field::PostingDate);

        Ok(Self {
            headers,
            group_key,
            kind,
            amount,
            document_date,
            posting_date,
        })
    }

    fn is_mapped(&self, index: usize) -> bool {
        index == self.group_key
            || index == self.kind
            || index == self.amount
            || Some(index) == self.document_date
            || Some(index) == self.posting_date
    }

    /// Turns one data row into an entry. Missing trailing cells read as
    /// blank; extra cells beyond the header row are dropped.
    #[must_use]
    pub fn adapt_row<S: AsRef<str>>(&self, row_number: usize, cells: &[S]) -> EntryRecord {
        let cell = move |index: usize| cells.get(index).map_or("", |c| c.as_ref().trim());
        let optional = |index: Option<usize>| {
            index
                .map(cell)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let group_key = Some(cell(self.group_key))
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let mut entry = EntryRecord::new(
            String::new(),
            EntryKind::parse(cell(self.kind)),
            parse_amount(row_number, cell(self.amount)),
        );
        entry.group_key = group_key;
        entry.document_date = optional(self.document_date);
        entry.posting_date = optional(self.posting_date);
        entry.attributes = self
            .headers
            .iter()
            .enumerate()
            .filter(|(index, header)| !self.is_mapped(*index) && !header.is_empty())
            .filter_map(|(index, header)| {
                let value = cell(index);
                (!value.is_empty()).then(|| (header.clone(), value.to_string()))
            })
            .collect();
        entry
    }

    /// Turns every data row into an entry. Row numbers in log output are
    /// 1-based and count data rows only.
    #[must_use]
    pub fn adapt_rows<R, S>(&self, rows: &[R]) -> Vec<EntryRecord>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.adapt_row(index + 1, row.as_ref()))
            .collect()
    }
}

/// Parses an amount cell, treating anything unreadable as zero.
///
/// Thousands separators, underscores and inner spaces are ignored.
fn parse_amount(row_number: usize, raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| {
            warn!(row = row_number, value = raw, "Non-numeric amount treated as zero");
            Decimal::ZERO
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn headers() -> Vec<&'static str> {
        vec![
            "Sr. No.",
            "Dr/Cr",
            "Amount",
            "Document Date",
            "Posting Date",
            "Business Area",
            "Remarks",
        ]
    }

    #[test]
    fn test_resolves_aliases() {
        let adapter = RowAdapter::from_headers(&headers()).unwrap();
        let entry = adapter.adapt_row(
            1,
            &["1", "Dr", "1,250.50", "2024-01-01", "01/01/2024", "BA01", "rent"],
        );

        assert_eq!(entry.normalized_group_key(), Some("1"));
        assert_eq!(entry.kind, EntryKind::Debit);
        assert_eq!(entry.amount, dec!(1250.50));
        assert_eq!(entry.document_date.as_deref(), Some("2024-01-01"));
        assert_eq!(entry.posting_date.as_deref(), Some("01/01/2024"));
        assert_eq!(entry.attributes.get("Business Area").map(String::as_str), Some("BA01"));
        assert_eq!(entry.attributes.get("Remarks").map(String::as_str), Some("rent"));
        assert_eq!(entry.attributes.len(), 2);
    }

    #[test]
    fn test_missing_required_column() {
        let err = RowAdapter::from_headers(&["Serial No", "Type", "Remarks"]).unwrap_err();
        assert_eq!(err, AdapterError::MissingColumn("amount"));

        let err = RowAdapter::from_headers(&["Amount", "Type"]).unwrap_err();
        assert_eq!(err, AdapterError::MissingColumn("serial number"));
    }

    #[test]
    fn test_empty_header_row() {
        let empty: [&str; 0] = [];
        assert_eq!(RowAdapter::from_headers(&empty).unwrap_err(), AdapterError::EmptyHeader);
    }

    #[test]
    fn test_date_columns_optional() {
        let adapter = RowAdapter::from_headers(&["Serial No", "Type", "Amount"]).unwrap();
        let entry = adapter.adapt_row(1, &["1", "Credit", "10"]);
        assert_eq!(entry.document_date, None);
        assert_eq!(entry.posting_date, None);
    }

    #[test]
    fn test_first_duplicate_header_wins() {
        let adapter = RowAdapter::from_headers(&["Serial No", "Type", "Amount", "Amt"]).unwrap();
        let entry = adapter.adapt_row(1, &["1", "Debit", "10", "99"]);
        assert_eq!(entry.amount, dec!(10));
        assert_eq!(entry.attributes.get("Amt").map(String::as_str), Some("99"));
    }

    #[test]
    fn test_short_row_reads_blank() {
        let adapter = RowAdapter::from_headers(&headers()).unwrap();
        let entry = adapter.adapt_row(1, &["", "Credit"]);
        assert_eq!(entry.group_key, None);
        assert_eq!(entry.amount, Decimal::ZERO);
        assert!(entry.attributes.is_empty());
    }

    #[test]
    fn test_non_numeric_amount_is_zero() {
        let adapter = RowAdapter::from_headers(&["Serial No", "Type", "Amount"]).unwrap();
        let entry = adapter.adapt_row(3, &["1", "Debit", "ten"]);
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn test_amount_formats() {
        assert_eq!(parse_amount(1, " 1 000.25 "), dec!(1000.25));
        assert_eq!(parse_amount(1, "1_000"), dec!(1000));
        assert_eq!(parse_amount(1, "1.5e3"), dec!(1500));
        assert_eq!(parse_amount(1, ""), Decimal::ZERO);
    }

    #[test]
    fn test_adapt_rows_assigns_distinct_ids() {
        let adapter = RowAdapter::from_headers(&["Serial No", "Type", "Amount"]).unwrap();
        let rows = vec![vec!["1", "Debit", "10"], vec!["1", "Credit", "10"]];
        let entries = adapter.adapt_rows::<_, &str>(&rows);
        assert_eq!(entries.len(), 2);
        assert_ne!(entries[0].id, entries[1].id);
        assert_eq!(entries[1].kind, EntryKind::Credit);
    }
}
