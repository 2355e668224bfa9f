//! Append-only storage for recorded entries.
//!
//! Entries are kept in recording order. Nothing here sorts by date; the
//! aggregator does that on its own copy of references.

use crate::core::entry::{Entry, RawValue};
use crate::error::Result;
use serde::Serialize;

/// Ordered collection of validated entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Validate and append a new entry.
    ///
    /// Checks run in order (date, metric, value) and the first failure is
    /// returned. On failure the store is left untouched.
    pub fn add<'v>(
        &mut self,
        date: &str,
        metric: &str,
        value: impl Into<RawValue<'v>>,
    ) -> Result<&Entry> {
        let entry = Entry::validated(date, metric, value)?;
        tracing::debug!(%entry, position = self.entries.len(), "recorded entry");

        let index = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[index])
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in recording order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Most recently recorded entry.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Entries for one metric, in recording order.
    pub fn by_metric<'a>(&'a self, metric: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| e.metric() == metric)
    }

    /// Distinct metric names in the order they were first recorded.
    pub fn metrics(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.metric()) {
                seen.push(entry.metric());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Validate a new observation and append it to `entries`.
///
/// Returns the appended entry. See [`EntryStore::add`].
pub fn add_entry<'s, 'v>(
    entries: &'s mut EntryStore,
    date: &str,
    metric: &str,
    value: impl Into<RawValue<'v>>,
) -> Result<&'s Entry> {
    entries.add(date, metric, value)
}
