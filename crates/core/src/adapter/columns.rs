//! Header aliases recognized for each entry field.

/// Entry fields a column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Serial number.
    GroupKey,
    /// Debit/credit indicator.
    Kind,
    /// Amount.
    Amount,
    /// Document date.
    DocumentDate,
    /// Posting date.
    PostingDate,
}

impl Field {
    /// Name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GroupKey => "serial number",
            Self::Kind => "debit/credit",
            Self::Amount => "amount",
            Self::DocumentDate => "document date",
            Self::PostingDate => "posting date",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::GroupKey => &[
                "serial no",
                "serial number",
                "serial",
                "sr no",
                "s no",
                "group",
                "group key",
            ],
            Self::Kind => &["type", "entry type", "debit credit", "dr cr", "kind"],
            Self::Amount => &["amount", "amt", "value"],
            Self::DocumentDate => &["document date", "doc date"],
            Self::PostingDate => &["posting date", "post date"],
        }
    }

    const ALL: [Self; 5] = [
        Self::GroupKey,
        Self::Kind,
        Self::Amount,
        Self::DocumentDate,
        Self::PostingDate,
    ];

    /// Finds the field a header names, if any.
    #[must_use]
    pub fn for_header(header: &str) -> Option<Self> {
        let header = normalize_header(header);
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&header.as_str()))
    }
}

/// Lowercases and reduces every run of non-alphanumerics to one space.
///
/// `"Sr. No."`, `"sr_no"` and `"SR NO"` all become `"sr no"`.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
