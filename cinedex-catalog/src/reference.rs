//! Weak, ID-based links between rows.

use cinedex_core::{Reader, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::entry::{Entry, RESOLVE_DEPTH};
use crate::kind::EntryKind;

/// A link to a row of another table, held by ID.
///
/// The referenced entry is never owned by the referrer's row; it is looked
/// up by ID and kept alongside as a resolved copy. Two references to the
/// same Status row therefore hold two independent copies, and a Status that
/// refers to itself cannot form an ownership cycle.
#[derive(Debug, Clone)]
pub struct Reference<'r> {
    table: String,
    id: Option<String>,
    entry: Option<Box<Entry<'r>>>,
}

impl<'r> Reference<'r> {
    /// A link to `id` in `table`. An empty ID is the same as no link.
    pub fn new(table: impl Into<String>, id: Option<String>) -> Self {
        Self {
            table: table.into(),
            id: id.filter(|s| !s.is_empty()),
            entry: None,
        }
    }

    pub fn empty(table: impl Into<String>) -> Self {
        Self::new(table, None)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The resolved entry, if the link was set and its row exists.
    pub fn entry(&self) -> Option<&Entry<'r>> {
        self.entry.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }

    /// Look the referenced row up now.
    ///
    /// Returns the row count: 0 when the link is unset or dangling, in which
    /// case any previously resolved entry is dropped.
    pub fn resolve(&mut self, reader: &'r dyn Reader) -> Result<usize> {
        self.resolve_at(reader, RESOLVE_DEPTH)
    }

    pub(crate) fn resolve_at(&mut self, reader: &'r dyn Reader, depth: u8) -> Result<usize> {
        let Some(id) = self.id.clone() else {
            self.entry = None;
            return Ok(0);
        };
        let mut entry = Entry::bind(reader, EntryKind::lookup(&self.table), id);
        let count = entry.retrieve_basic_at(depth)?;
        self.entry = (count > 0).then(|| Box::new(entry));
        Ok(count)
    }
}

impl Serialize for Reference<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Reference", 3)?;
        s.serialize_field("table", &self.table)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("entry", &self.entry)?;
        s.end()
    }
}
