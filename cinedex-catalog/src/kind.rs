//! Per-kind descriptors.
//!
//! Every lookup table and every association table follows the same shape;
//! what differs between kinds is only the table name, the descriptive
//! columns, and (for entries) which association collections hang off them.
//! A descriptor captures exactly that, so a single generic [`Entry`] and
//! [`Item`] implementation serves all of them.
//!
//! [`Entry`]: crate::Entry
//! [`Item`]: crate::Item

use std::borrow::Cow;

use cinedex_core::{DETAILS_COLUMN, ID_COLUMN, LAST_UPDATED_COLUMN, STATUS_COLUMN, Value};

use crate::kinds;

/// Declared storage type of a descriptive column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Real,
}

/// A descriptive column of an entry or an association-local attribute of
/// an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub column: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn text(column: &'static str) -> Self {
        Self {
            column,
            ty: FieldType::Text,
        }
    }

    pub const fn integer(column: &'static str) -> Self {
        Self {
            column,
            ty: FieldType::Integer,
        }
    }

    pub const fn real(column: &'static str) -> Self {
        Self {
            column,
            ty: FieldType::Real,
        }
    }

    /// Convert a raw store value to this field's declared type.
    ///
    /// Values that cannot be converted are kept as returned; `Null` stays
    /// `Null`.
    pub fn coerce(&self, value: &Value) -> Value {
        let converted = match (self.ty, value) {
            (_, Value::Null) => return Value::Null,
            (FieldType::Text, Value::Text(_)) => None,
            (FieldType::Text, v) => v.to_text().map(Value::Text),
            (FieldType::Integer, Value::Integer(_)) => None,
            (FieldType::Integer, v) => v.as_i64().map(Value::Integer),
            (FieldType::Real, Value::Real(_)) => None,
            (FieldType::Real, v) => v.as_f64().map(Value::Real),
        };
        converted.unwrap_or_else(|| value.clone())
    }
}

/// An association collection owned by an entry kind, loaded during
/// additional-information retrieval from the `<Entry><Target>` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    pub target: &'static str,
    pub order: &'static str,
}

impl CollectionSpec {
    pub const fn new(target: &'static str) -> Self {
        Self {
            target,
            order: ID_COLUMN,
        }
    }

    pub const fn ordered_by(target: &'static str, order: &'static str) -> Self {
        Self { target, order }
    }
}

// ── Entry kinds ─────────────────────────────────────────────────────────────

/// Descriptor of a standalone lookup/domain table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKind {
    table: Cow<'static, str>,
    fields: &'static [FieldSpec],
    display: &'static [&'static str],
    collections: &'static [CollectionSpec],
}

impl EntryKind {
    pub const fn builtin(
        table: &'static str,
        fields: &'static [FieldSpec],
        display: &'static [&'static str],
        collections: &'static [CollectionSpec],
    ) -> Self {
        Self {
            table: Cow::Borrowed(table),
            fields,
            display,
            collections,
        }
    }

    /// A kind with no descriptive columns, for tables outside the built-in
    /// set. Rows still carry the common columns.
    pub fn generic(table: impl Into<String>) -> Self {
        Self {
            table: Cow::Owned(table.into()),
            fields: &[],
            display: &[],
            collections: &[],
        }
    }

    /// Built-in kind for `table`, or a generic one.
    pub fn lookup(table: &str) -> Self {
        kinds::entry_kind(table)
            .cloned()
            .unwrap_or_else(|| Self::generic(table))
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, column: &str) -> Option<(usize, &'static FieldSpec)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.column.eq_ignore_ascii_case(column))
    }

    /// Columns whose values make up the derived display string.
    pub fn display_columns(&self) -> &'static [&'static str] {
        self.display
    }

    pub fn collections(&self) -> &'static [CollectionSpec] {
        self.collections
    }

    pub fn is_generic(&self) -> bool {
        matches!(self.table, Cow::Owned(_))
    }

    /// Every column read during basic-information retrieval.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.fields.len() + 4);
        columns.push(ID_COLUMN.to_string());
        columns.extend(self.fields.iter().map(|f| f.column.to_string()));
        columns.extend(common_columns());
        columns
    }
}

// ── Item kinds ──────────────────────────────────────────────────────────────

/// Descriptor of an association (join) table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKind {
    name: &'static str,
    target: Option<&'static str>,
    attributes: &'static [FieldSpec],
}

impl ItemKind {
    /// Item kind whose target table is always `target`.
    pub const fn fixed(target: &'static str, attributes: &'static [FieldSpec]) -> Self {
        Self {
            name: target,
            target: Some(target),
            attributes,
        }
    }

    /// Item kind whose target table the caller supplies.
    pub const fn open(name: &'static str) -> Self {
        Self {
            name,
            target: None,
            attributes: &[],
        }
    }

    /// Built-in kind targeting `target`, or the generic open kind.
    pub fn for_target(target: &str) -> &'static ItemKind {
        kinds::item_kind(target).unwrap_or(&kinds::ASSOCIATION)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn target(&self) -> Option<&'static str> {
        self.target
    }

    pub fn attributes(&self) -> &'static [FieldSpec] {
        self.attributes
    }

    pub fn attribute(&self, column: &str) -> Option<(usize, &'static FieldSpec)> {
        self.attributes
            .iter()
            .enumerate()
            .find(|(_, f)| f.column.eq_ignore_ascii_case(column))
    }

    /// Every column read from the association table.
    pub fn columns(&self, base_table_name: &str, target_table_name: &str) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.attributes.len() + 6);
        columns.push(ID_COLUMN.to_string());
        columns.push(id_column(base_table_name));
        columns.push(id_column(target_table_name));
        columns.extend(self.attributes.iter().map(|f| f.column.to_string()));
        columns.extend(common_columns());
        columns
    }
}

// ── Naming rules ────────────────────────────────────────────────────────────

/// Physical table backing the association between `base` and `target`.
///
/// `association_table("Movie", "Country")` → `"MovieCountry"`.
pub fn association_table(base_table_name: &str, target_table_name: &str) -> String {
    format!("{base_table_name}{target_table_name}")
}

/// Column linking an association row to a row of `table`.
///
/// `id_column("Movie")` → `"MovieID"`.
pub fn id_column(table: &str) -> String {
    format!("{table}{ID_COLUMN}")
}

fn common_columns() -> impl Iterator<Item = String> {
    [DETAILS_COLUMN, STATUS_COLUMN, LAST_UPDATED_COLUMN]
        .into_iter()
        .map(str::to_string)
}
