//! Core types shared by every cinedex crate.
//!
//! Defines the raw column values and rows returned by a backing store, the
//! [`Reader`] capability the retrieval layer depends on, and the error
//! taxonomy. Nothing here knows about SQL; concrete engines live in
//! `cinedex-db`.

pub mod error;
pub mod memory;
pub mod reader;
pub mod value;

pub use error::{Error, Result};
pub use memory::MemoryReader;
pub use reader::{Query, Reader};
pub use value::{Row, Value};

/// Column holding a row's own identifier.
pub const ID_COLUMN: &str = "ID";

/// Column holding free-form details on every entry and item row.
pub const DETAILS_COLUMN: &str = "Details";

/// Column holding the weak link to a Status entry.
pub const STATUS_COLUMN: &str = "StatusID";

/// Column holding the provenance/timestamp marker.
pub const LAST_UPDATED_COLUMN: &str = "LastUpdated";
