//! Partitioning of entries by serial number.

use std::collections::HashMap;

use super::entry::EntryRecord;

/// Entries sharing one group key, in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryGroup<'a> {
    key: &'a str,
    entries: Vec<&'a EntryRecord>,
}

impl<'a> EntryGroup<'a> {
    /// The trimmed group key.
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Members in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[&'a EntryRecord] {
        &self.entries
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for groups produced by [`group_entries`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of grouping a batch: groups in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryGroups<'a> {
    groups: Vec<EntryGroup<'a>>,
    skipped: usize,
}

impl<'a> EntryGroups<'a> {
    /// Iterates groups in order of first appearance of their key.
    pub fn iter(&self) -> std::slice::Iter<'_, EntryGroup<'a>> {
        self.groups.iter()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no entry carried a key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of entries left out for lacking a key.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Looks up a group by its (trimmed) key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EntryGroup<'a>> {
        self.groups.iter().find(|group| group.key == key.trim())
    }
}

impl<'g, 'a> IntoIterator for &'g EntryGroups<'a> {
    type Item = &'g EntryGroup<'a>;
    type IntoIter = std::slice::Iter<'g, EntryGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Groups entries by trimmed group key in a single pass.
///
/// Entries whose key is absent or blank are not placed in any group.
#[must_use]
pub fn group_entries(entries: &[EntryRecord]) -> EntryGroups<'_> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped = EntryGroups::default();

    for entry in entries {
        let Some(key) = entry.normalized_group_key() else {
            grouped.skipped += 1;
            continue;
        };

        let slot = *index.entry(key).or_insert_with(|| {
            grouped.groups.push(EntryGroup {
                key,
                entries: Vec::new(),
            });
            grouped.groups.len() - 1
        });
        grouped.groups[slot].entries.push(entry);
    }

    grouped
}
