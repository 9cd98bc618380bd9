//! Typed retrieval of lookup entries and association items.
//!
//! An [`Entry`] is a row of a lookup/domain table (Country, Genre, Movie,
//! ...). An [`Item`] is a row of a `<Base><Target>` association table that
//! attaches one target entry plus per-association metadata to a base row.
//! Both are generic over a small descriptor ([`EntryKind`], [`ItemKind`])
//! taken from the built-in [`kinds`] table, and both read through an
//! injected [`Reader`](cinedex_core::Reader).
//!
//! Retrieval is read-only and reports "not found" as a zero row count.

pub mod entry;
pub mod item;
pub mod kind;
pub mod kinds;
pub mod reference;
pub mod timestamp;

pub use entry::Entry;
pub use item::{DEFAULT_ORDER_COLUMN, Item};
pub use kind::{
    CollectionSpec, EntryKind, FieldSpec, FieldType, ItemKind, association_table, id_column,
};
pub use reference::Reference;
pub use timestamp::parse_last_updated;
