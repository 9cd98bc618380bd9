//! Association rows linking a base entity to a target lookup entry.

use std::fmt;

use chrono::NaiveDateTime;
use cinedex_core::error::require;
use cinedex_core::{
    DETAILS_COLUMN, Error, ID_COLUMN, LAST_UPDATED_COLUMN, Query, Reader, Result, Row, Value,
};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::entry::{Entry, RESOLVE_DEPTH, load_status};
use crate::kind::{ItemKind, association_table, id_column};
use crate::reference::Reference;
use crate::timestamp::parse_last_updated;

/// Column a list retrieval orders by when the caller names none.
pub const DEFAULT_ORDER_COLUMN: &str = ID_COLUMN;

/// One row of a `<Base><Target>` association table.
///
/// Carries the link to the target entry, the association-local attributes
/// declared by its [`ItemKind`], and the usual details/Status/LastUpdated.
#[derive(Clone)]
pub struct Item<'r> {
    reader: &'r dyn Reader,
    kind: &'static ItemKind,
    id: String,
    base_table_name: String,
    target_table_name: String,
    base_id: Option<String>,
    target: Reference<'r>,
    attributes: Vec<Value>,
    details: Option<String>,
    status: Reference<'r>,
    last_updated: Option<String>,
}

/// Everything read from one association row, assembled before any of it is
/// assigned.
struct Loaded<'r> {
    base_id: Option<String>,
    target: Reference<'r>,
    attributes: Vec<Value>,
    details: Option<String>,
    status: Reference<'r>,
    last_updated: Option<String>,
}

impl<'r> Item<'r> {
    /// Bind an item to `id` in the `<base><target>` table. The item kind is
    /// picked from the target table.
    pub fn new(
        reader: &'r dyn Reader,
        id: impl Into<String>,
        base_table_name: impl Into<String>,
        target_table_name: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let base_table_name = base_table_name.into();
        let target_table_name = target_table_name.into();
        require(&id, "id")?;
        require(&base_table_name, "base_table_name")?;
        require(&target_table_name, "target_table_name")?;
        let kind = ItemKind::for_target(&target_table_name);
        Ok(Self::bind(reader, kind, id, base_table_name, target_table_name))
    }

    /// Bind an item of a fixed-target kind.
    pub fn of_kind(
        reader: &'r dyn Reader,
        kind: &'static ItemKind,
        id: impl Into<String>,
        base_table_name: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let base_table_name = base_table_name.into();
        require(&id, "id")?;
        require(&base_table_name, "base_table_name")?;
        let target = kind
            .target()
            .ok_or_else(|| Error::invalid_argument("target_table_name"))?;
        Ok(Self::bind(reader, kind, id, base_table_name, target.to_string()))
    }

    /// An item with no ID and no base table. Fixed-target kinds keep their
    /// target name; open kinds start with an empty one.
    pub fn unbound(reader: &'r dyn Reader, kind: &'static ItemKind) -> Self {
        let target = kind.target().unwrap_or_default().to_string();
        Self::bind(reader, kind, String::new(), String::new(), target)
    }

    fn bind(
        reader: &'r dyn Reader,
        kind: &'static ItemKind,
        id: String,
        base_table_name: String,
        target_table_name: String,
    ) -> Self {
        Self {
            reader,
            kind,
            id,
            target: Reference::empty(target_table_name.clone()),
            base_table_name,
            target_table_name,
            base_id: None,
            attributes: vec![Value::Null; kind.attributes().len()],
            details: None,
            status: Reference::empty(crate::kinds::STATUS_TABLE),
            last_updated: None,
        }
    }

    fn from_row(
        reader: &'r dyn Reader,
        kind: &'static ItemKind,
        base_table_name: &str,
        target_table_name: &str,
        row: &Row,
    ) -> Result<Self> {
        let loaded = load(
            reader,
            kind,
            base_table_name,
            target_table_name,
            row,
            RESOLVE_DEPTH,
        )?;
        let mut item = Self::bind(
            reader,
            kind,
            row.text(ID_COLUMN).unwrap_or_default(),
            base_table_name.to_string(),
            target_table_name.to_string(),
        );
        item.apply(loaded);
        Ok(item)
    }

    fn apply(&mut self, loaded: Loaded<'r>) {
        self.base_id = loaded.base_id;
        self.target = loaded.target;
        self.attributes = loaded.attributes;
        self.details = loaded.details;
        self.status = loaded.status;
        self.last_updated = loaded.last_updated;
    }

    // ── Table names ─────────────────────────────────────────────────────────

    pub fn base_table_name(&self) -> &str {
        &self.base_table_name
    }

    /// Change the base table. Anything loaded from the old table is dropped.
    pub fn set_base_table_name(&mut self, name: impl Into<String>) {
        self.base_table_name = name.into();
        self.clear_loaded();
    }

    pub fn target_table_name(&self) -> &str {
        &self.target_table_name
    }

    /// Change the target table.
    ///
    /// Fixed-target kinds only accept their own target. For open kinds the
    /// item kind is re-picked from the new target. Either way anything loaded
    /// from the old table is dropped.
    pub fn set_target_table_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if let Some(fixed) = self.kind.target() {
            if !fixed.eq_ignore_ascii_case(&name) {
                return Err(Error::invalid_argument("target_table_name"));
            }
            self.target_table_name = name;
            self.clear_loaded();
            return Ok(());
        }
        self.kind = ItemKind::for_target(&name);
        self.target_table_name = name;
        self.clear_loaded();
        Ok(())
    }

    /// Forget everything read from a row; the ID, names and kind stay.
    fn clear_loaded(&mut self) {
        self.base_id = None;
        self.target = Reference::empty(self.target_table_name.clone());
        self.attributes = vec![Value::Null; self.kind.attributes().len()];
        self.details = None;
        self.status = Reference::empty(crate::kinds::STATUS_TABLE);
        self.last_updated = None;
    }

    /// Physical table holding this item, derived from the current names.
    pub fn table_name(&self) -> String {
        association_table(&self.base_table_name, &self.target_table_name)
    }

    // ── Retrieval ───────────────────────────────────────────────────────────

    /// Run basic retrieval and, unless `basic_info_only`, additional
    /// retrieval. Returns the basic row count only.
    pub fn retrieve(&mut self, basic_info_only: bool) -> Result<usize> {
        let count = self.retrieve_basic()?;
        if !basic_info_only {
            self.retrieve_additional()?;
        }
        Ok(count)
    }

    /// Load this association row: target link, base ID, attributes,
    /// details, Status and LastUpdated.
    ///
    /// The table name is recomputed from the current base and target names
    /// on every call. Returns 1 when the row exists; otherwise 0, with every
    /// loaded value cleared.
    pub fn retrieve_basic(&mut self) -> Result<usize> {
        if self.id.is_empty() {
            return Ok(0);
        }
        require(&self.base_table_name, "base_table_name")?;
        require(&self.target_table_name, "target_table_name")?;

        let table = self.table_name();
        log::debug!("Retrieving {} '{}'", table, self.id);
        let query = Query::new(table.as_str())
            .columns(
                self.kind
                    .columns(&self.base_table_name, &self.target_table_name),
            )
            .filter(ID_COLUMN, self.id.as_str());
        let rows = self.reader.query(&query)?;
        let Some(row) = rows.first() else {
            log::trace!("{} '{}' not found", table, self.id);
            self.clear_loaded();
            return Ok(0);
        };

        let loaded = load(
            self.reader,
            self.kind,
            &self.base_table_name,
            &self.target_table_name,
            row,
            RESOLVE_DEPTH,
        )?;
        self.apply(loaded);
        Ok(1)
    }

    /// Items own no secondary collections; always 0.
    pub fn retrieve_additional(&mut self) -> Result<usize> {
        Ok(0)
    }

    /// Fetch every association row linking `base_id` to `target_table_name`.
    ///
    /// Rows come from the `<base><target>` table, filtered on its
    /// `<base>ID` column and ordered ascending by `order` (or
    /// [`DEFAULT_ORDER_COLUMN`]). The whole result is materialized before
    /// returning; an unmatched base ID yields an empty vector.
    pub fn retrieve_list(
        reader: &'r dyn Reader,
        base_table_name: &str,
        base_id: &str,
        target_table_name: &str,
        order: Option<&str>,
    ) -> Result<Vec<Self>> {
        require(base_table_name, "base_table_name")?;
        require(base_id, "base_id")?;
        require(target_table_name, "target_table_name")?;
        let order = match order {
            Some(column) => {
                require(column, "order")?;
                column
            }
            None => DEFAULT_ORDER_COLUMN,
        };

        let kind = ItemKind::for_target(target_table_name);
        let table = association_table(base_table_name, target_table_name);
        log::debug!("Listing {} for {} '{}'", table, base_table_name, base_id);
        let query = Query::new(table.as_str())
            .columns(kind.columns(base_table_name, target_table_name))
            .filter(id_column(base_table_name), base_id)
            .order_by(order);
        let rows = reader.query(&query)?;
        log::trace!("{} rows in {}", rows.len(), table);

        rows.iter()
            .map(|row| Self::from_row(reader, kind, base_table_name, target_table_name, row))
            .collect()
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rebind to another association row. Everything loaded for the old ID
    /// is dropped; the table names are kept.
    pub fn set_id(&mut self, id: impl Into<String>) {
        *self = Self::bind(
            self.reader,
            self.kind,
            id.into(),
            std::mem::take(&mut self.base_table_name),
            std::mem::take(&mut self.target_table_name),
        );
    }

    pub fn kind(&self) -> &'static ItemKind {
        self.kind
    }

    /// ID of the owning base row, as read from the association row.
    pub fn base_id(&self) -> Option<&str> {
        self.base_id.as_deref()
    }

    /// Link to the target lookup entry.
    pub fn target(&self) -> &Reference<'r> {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut Reference<'r> {
        &mut self.target
    }

    /// The resolved target entry, if the link exists.
    pub fn target_entry(&self) -> Option<&Entry<'r>> {
        self.target.entry()
    }

    /// An association-local attribute, `None` when undeclared or absent.
    pub fn attribute(&self, column: &str) -> Option<&Value> {
        let (index, _) = self.kind.attribute(column)?;
        self.attributes.get(index).filter(|v| !v.is_null())
    }

    pub fn attribute_text(&self, column: &str) -> Option<&str> {
        self.attribute(column).and_then(Value::as_str)
    }

    pub fn attribute_integer(&self, column: &str) -> Option<i64> {
        self.attribute(column).and_then(Value::as_i64)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.kind
            .attributes()
            .iter()
            .zip(&self.attributes)
            .map(|(f, v)| (f.column, v))
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn status(&self) -> &Reference<'r> {
        &self.status
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn last_updated_at(&self) -> Option<NaiveDateTime> {
        self.last_updated.as_deref().and_then(parse_last_updated)
    }
}

fn load<'r>(
    reader: &'r dyn Reader,
    kind: &'static ItemKind,
    base_table_name: &str,
    target_table_name: &str,
    row: &Row,
    depth: u8,
) -> Result<Loaded<'r>> {
    let mut target = Reference::new(target_table_name, row.text(&id_column(target_table_name)));
    if depth > 0 {
        target.resolve_at(reader, depth - 1)?;
    }
    let attributes = kind
        .attributes()
        .iter()
        .map(|f| f.coerce(row.value(f.column)))
        .collect();
    let status = load_status(reader, row, depth)?;

    Ok(Loaded {
        base_id: row.text(&id_column(base_table_name)),
        target,
        attributes,
        details: row.text(DETAILS_COLUMN),
        status,
        last_updated: row.text(LAST_UPDATED_COLUMN),
    })
}

impl fmt::Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("table", &self.table_name())
            .field("id", &self.id)
            .field("base_id", &self.base_id)
            .field("target", &self.target)
            .field("attributes", &self.attributes().collect::<Vec<_>>())
            .field("details", &self.details)
            .field("status", &self.status)
            .field("last_updated", &self.last_updated)
            .finish_non_exhaustive()
    }
}

struct AttributeMap<'a, 'r>(&'a Item<'r>);

impl Serialize for AttributeMap<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.attributes.len()))?;
        for (column, value) in self.0.attributes() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl Serialize for Item<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Item", 9)?;
        s.serialize_field("table", &self.table_name())?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("base_table", &self.base_table_name)?;
        s.serialize_field("base_id", &self.base_id)?;
        s.serialize_field("target", &self.target)?;
        s.serialize_field("attributes", &AttributeMap(self))?;
        s.serialize_field("details", &self.details)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("last_updated", &self.last_updated)?;
        s.end()
    }
}
