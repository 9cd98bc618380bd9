//! Standalone lookup/domain records.

use std::fmt;

use chrono::NaiveDateTime;
use cinedex_core::error::require;
use cinedex_core::{
    DETAILS_COLUMN, ID_COLUMN, LAST_UPDATED_COLUMN, Query, Reader, Result, Row, STATUS_COLUMN,
    Value,
};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::item::Item;
use crate::kind::EntryKind;
use crate::kinds::STATUS_TABLE;
use crate::reference::Reference;
use crate::timestamp::parse_last_updated;

/// How many levels of weak references a top-level retrieval resolves.
///
/// One level: an entry's Status is resolved, but that Status's own Status
/// link keeps only its ID.
pub(crate) const RESOLVE_DEPTH: u8 = 1;

/// A record of a lookup or domain table, identified by a stable ID.
///
/// The table and its descriptive columns come from the [`EntryKind`].
/// Until [`retrieve_basic`](Entry::retrieve_basic) finds the row, every
/// descriptive field is absent.
#[derive(Clone)]
pub struct Entry<'r> {
    reader: &'r dyn Reader,
    kind: EntryKind,
    id: String,
    fields: Vec<Value>,
    details: Option<String>,
    status: Reference<'r>,
    last_updated: Option<String>,
    collections: Vec<Vec<Item<'r>>>,
}

impl<'r> Entry<'r> {
    /// Bind an entry of `kind` to `id`. An empty ID is rejected.
    pub fn new(reader: &'r dyn Reader, kind: EntryKind, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        require(&id, "id")?;
        Ok(Self::bind(reader, kind, id))
    }

    /// Shorthand for `Entry::new(reader, EntryKind::lookup(table), id)`.
    pub fn from_table(reader: &'r dyn Reader, table: &str, id: impl Into<String>) -> Result<Self> {
        require(table, "table")?;
        Self::new(reader, EntryKind::lookup(table), id)
    }

    /// An entry with no ID. Retrieving it finds nothing and queries nothing.
    pub fn unbound(reader: &'r dyn Reader, kind: EntryKind) -> Self {
        Self::bind(reader, kind, String::new())
    }

    pub(crate) fn bind(reader: &'r dyn Reader, kind: EntryKind, id: String) -> Self {
        let fields = vec![Value::Null; kind.fields().len()];
        let collections = vec![Vec::new(); kind.collections().len()];
        Self {
            reader,
            kind,
            id,
            fields,
            details: None,
            status: Reference::empty(STATUS_TABLE),
            last_updated: None,
            collections,
        }
    }

    // ── Retrieval ───────────────────────────────────────────────────────────

    /// Run basic retrieval and, unless `basic_info_only`, additional
    /// retrieval.
    ///
    /// Returns the basic row count only. The additional count is not folded
    /// in, so 1 means "the row exists" regardless of how many collection
    /// rows were loaded.
    pub fn retrieve(&mut self, basic_info_only: bool) -> Result<usize> {
        let count = self.retrieve_basic()?;
        if !basic_info_only {
            self.retrieve_additional()?;
        }
        Ok(count)
    }

    /// Load the entry's own row: descriptive fields, details, Status and
    /// LastUpdated.
    ///
    /// Returns 1 when the row exists and 0 otherwise; a missing row leaves
    /// every field absent. A failed query changes nothing.
    pub fn retrieve_basic(&mut self) -> Result<usize> {
        self.retrieve_basic_at(RESOLVE_DEPTH)
    }

    pub(crate) fn retrieve_basic_at(&mut self, depth: u8) -> Result<usize> {
        if self.id.is_empty() {
            return Ok(0);
        }

        log::debug!("Retrieving {} '{}'", self.kind.table(), self.id);
        let query = Query::new(self.kind.table())
            .columns(self.kind.columns())
            .filter(ID_COLUMN, self.id.as_str());
        let rows = self.reader.query(&query)?;
        let Some(row) = rows.first() else {
            log::trace!("{} '{}' not found", self.kind.table(), self.id);
            self.clear_loaded();
            return Ok(0);
        };

        let fields = self
            .kind
            .fields()
            .iter()
            .map(|f| f.coerce(row.value(f.column)))
            .collect();
        let status = load_status(self.reader, row, depth)?;

        self.fields = fields;
        self.details = row.text(DETAILS_COLUMN);
        self.status = status;
        self.last_updated = row.text(LAST_UPDATED_COLUMN);
        Ok(1)
    }

    /// Load every association collection the kind declares.
    ///
    /// Returns the total number of association rows loaded, which is 0 for
    /// kinds without collections even when the entry itself exists.
    pub fn retrieve_additional(&mut self) -> Result<usize> {
        if self.id.is_empty() {
            return Ok(0);
        }

        let mut loaded = Vec::with_capacity(self.kind.collections().len());
        for spec in self.kind.collections() {
            let items = Item::retrieve_list(
                self.reader,
                self.kind.table(),
                &self.id,
                spec.target,
                Some(spec.order),
            )?;
            loaded.push(items);
        }

        let count = loaded.iter().map(Vec::len).sum();
        log::trace!(
            "{} '{}' additional information: {} rows",
            self.kind.table(),
            self.id,
            count
        );
        self.collections = loaded;
        Ok(count)
    }

    fn clear_loaded(&mut self) {
        self.fields = vec![Value::Null; self.kind.fields().len()];
        self.details = None;
        self.status = Reference::empty(STATUS_TABLE);
        self.last_updated = None;
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rebind to another ID. Everything loaded for the old ID is dropped.
    pub fn set_id(&mut self, id: impl Into<String>) {
        *self = Self::bind(self.reader, self.kind.clone(), id.into());
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn table(&self) -> &str {
        self.kind.table()
    }

    pub fn reader(&self) -> &'r dyn Reader {
        self.reader
    }

    /// A descriptive field, `None` when undeclared or absent.
    pub fn field(&self, column: &str) -> Option<&Value> {
        let (index, _) = self.kind.field(column)?;
        self.fields.get(index).filter(|v| !v.is_null())
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.field(column).and_then(Value::as_str)
    }

    pub fn integer(&self, column: &str) -> Option<i64> {
        self.field(column).and_then(Value::as_i64)
    }

    pub fn real(&self, column: &str) -> Option<f64> {
        self.field(column).and_then(Value::as_f64)
    }

    /// `(column, value)` for every declared field, absent ones as `Null`.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.kind
            .fields()
            .iter()
            .zip(&self.fields)
            .map(|(f, v)| (f.column, v))
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn status(&self) -> &Reference<'r> {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut Reference<'r> {
        &mut self.status
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    /// `LastUpdated` read as a timestamp, when it looks like one.
    pub fn last_updated_at(&self) -> Option<NaiveDateTime> {
        self.last_updated.as_deref().and_then(parse_last_updated)
    }

    /// Derived display string: the kind's display columns joined by a space.
    /// Empty when none of them has a value.
    pub fn display(&self) -> String {
        self.kind
            .display_columns()
            .iter()
            .filter_map(|c| self.field(c))
            .map(Value::to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Items of the collection targeting `target`, empty until additional
    /// information is retrieved.
    pub fn collection(&self, target: &str) -> &[Item<'r>] {
        self.kind
            .collections()
            .iter()
            .position(|c| c.target.eq_ignore_ascii_case(target))
            .and_then(|i| self.collections.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn collections(&self) -> impl Iterator<Item = (&'static str, &[Item<'r>])> {
        self.kind
            .collections()
            .iter()
            .zip(&self.collections)
            .map(|(c, items)| (c.target, items.as_slice()))
    }
}

/// Read the Status link from `row`, resolving it when depth allows.
pub(crate) fn load_status<'r>(
    reader: &'r dyn Reader,
    row: &Row,
    depth: u8,
) -> Result<Reference<'r>> {
    let mut status = Reference::new(STATUS_TABLE, row.text(STATUS_COLUMN));
    if depth > 0 {
        status.resolve_at(reader, depth - 1)?;
    }
    Ok(status)
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("table", &self.kind.table())
            .field("id", &self.id)
            .field("fields", &self.fields().collect::<Vec<_>>())
            .field("details", &self.details)
            .field("status", &self.status)
            .field("last_updated", &self.last_updated)
            .field("collections", &self.collections)
            .finish_non_exhaustive()
    }
}

struct FieldMap<'a, 'r>(&'a Entry<'r>);

impl Serialize for FieldMap<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.fields.len()))?;
        for (column, value) in self.0.fields() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

struct CollectionMap<'a, 'r>(&'a Entry<'r>);

impl Serialize for CollectionMap<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.collections.len()))?;
        for (target, items) in self.0.collections() {
            map.serialize_entry(target, items)?;
        }
        map.end()
    }
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Entry", 8)?;
        s.serialize_field("table", self.kind.table())?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("display", &self.display())?;
        s.serialize_field("fields", &FieldMap(self))?;
        s.serialize_field("details", &self.details)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("last_updated", &self.last_updated)?;
        s.serialize_field("collections", &CollectionMap(self))?;
        s.end()
    }
}
