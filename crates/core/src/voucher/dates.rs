//! Date normalization and per-group date consistency.
//!
//! Entries arrive with dates in whatever shape the source produced: ISO
//! strings from the entry form, day-first strings or spreadsheet serial
//! numbers from uploads, full timestamps from API clients. Consistency is
//! judged on calendar days, so every value is first reduced to a
//! [`NormalizedDate`].

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use ledgerline_shared::types::EntryId;
use serde::{Serialize, Serializer};

use super::entry::EntryRecord;
use super::group::{EntryGroups, group_entries};

/// Smallest bare number read as a spreadsheet serial day (1927-05-18).
/// Shorter numbers such as `2024` are more likely years or codes.
const MIN_SERIAL_DAY: u64 = 10_000;

/// Largest spreadsheet serial day number (9999-12-31).
const MAX_SERIAL_DAY: u64 = 2_958_465;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d-%B-%Y",
    "%d %B %Y",
    // Month-first only when the day-first reading is impossible.
    "%m/%d/%Y",
    "%m-%d-%Y",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// A date reduced to calendar-day granularity.
///
/// Values that cannot be read as a date are kept as their trimmed text, so
/// two identical unreadable values still compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedDate {
    /// A calendar day.
    Day(NaiveDate),
    /// Text that is not a recognizable date.
    Unparsed(String),
    /// No value supplied.
    Missing,
}

impl std::fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            Self::Unparsed(raw) => f.write_str(raw),
            Self::Missing => f.write_str("-"),
        }
    }
}

impl Serialize for NormalizedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            other => serializer.collect_str(other),
        }
    }
}

/// Reduces a supplied date value to its calendar day.
///
/// Time-of-day and UTC offsets are discarded without conversion: the day is
/// the one written in the value itself.
#[must_use]
pub fn normalize_date(raw: Option<&str>) -> NormalizedDate {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return NormalizedDate::Missing;
    };

    parse_calendar_day(raw).map_or_else(|| NormalizedDate::Unparsed(raw.to_string()), NormalizedDate::Day)
}

/// Parses a trimmed date value into a calendar day.
#[must_use]
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    if let Some(day) = parse_numeric_day(raw) {
        return Some(day);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    if let Some(day) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(day);
    }

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date_naive());
    }

    DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive())
}

/// Handles compact `YYYYMMDD` and spreadsheet serial day numbers.
fn parse_numeric_day(raw: &str) -> Option<NaiveDate> {
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    if whole.len() == 8 && fraction.is_empty() {
        let year = whole[..4].parse().ok()?;
        let month = whole[4..6].parse().ok()?;
        let day = whole[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let serial: u64 = whole.parse().ok()?;
    if !(MIN_SERIAL_DAY..=MAX_SERIAL_DAY).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial))
}

/// A group whose members disagree on document or posting date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateConsistencyViolation {
    /// The offending group key.
    pub group_key: String,
    /// Normalized document date of the group's first entry.
    pub reference_document_date: NormalizedDate,
    /// Normalized posting date of the group's first entry.
    pub reference_posting_date: NormalizedDate,
    /// Some member's document date differs from the reference.
    pub document_date_inconsistent: bool,
    /// Some member's posting date differs from the reference.
    pub posting_date_inconsistent: bool,
    /// Every member of the group, in original order.
    pub entries: Vec<EntryDateSnapshot>,
}

/// Dates of one entry as supplied and as normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDateSnapshot {
    /// The entry's id.
    pub id: EntryId,
    /// Normalized document date.
    pub document_date: NormalizedDate,
    /// Document date as supplied.
    pub original_document_date: Option<String>,
    /// Normalized posting date.
    pub posting_date: NormalizedDate,
    /// Posting date as supplied.
    pub original_posting_date: Option<String>,
}

impl EntryDateSnapshot {
    fn of(entry: &EntryRecord) -> Self {
        Self {
            id: entry.id,
            document_date: normalize_date(entry.document_date.as_deref()),
            original_document_date: entry.document_date.clone(),
            posting_date: normalize_date(entry.posting_date.as_deref()),
            original_posting_date: entry.posting_date.clone(),
        }
    }
}

/// Checks that every group agrees on document and posting date.
#[must_use]
pub fn check_date_consistency(entries: &[EntryRecord]) -> Vec<DateConsistencyViolation> {
    date_consistency_violations(&group_entries(entries))
}

/// Same as [`check_date_consistency`] over an existing grouping.
#[must_use]
pub fn date_consistency_violations(groups: &EntryGroups<'_>) -> Vec<DateConsistencyViolation> {
    groups
        .iter()
        .filter(|group| group.len() > 1)
        .filter_map(|group| {
            let snapshots: Vec<EntryDateSnapshot> =
                group.entries().iter().map(|entry| EntryDateSnapshot::of(entry)).collect();
            let (reference, rest) = snapshots.split_first()?;

            let document_date_inconsistent = rest
                .iter()
                .any(|snap| snap.document_date != reference.document_date);
            let posting_date_inconsistent = rest
                .iter()
                .any(|snap| snap.posting_date != reference.posting_date);

            if !document_date_inconsistent && !posting_date_inconsistent {
                return None;
            }

            Some(DateConsistencyViolation {
                group_key: group.key().to_string(),
                reference_document_date: reference.document_date.clone(),
                reference_posting_date: reference.posting_date.clone(),
                document_date_inconsistent,
                posting_date_inconsistent,
                entries: snapshots,
            })
        })
        .collect()
}
