//! SQLite backing store for the cinedex retrieval layer.
//!
//! Provides [`SqliteReader`], the concrete [`Reader`](cinedex_core::Reader)
//! over a read-only rusqlite connection, plus schema inspection used to
//! check a database against the built-in kind table.

pub mod error;
pub mod reader;
pub mod schema;

pub use error::classify;
pub use reader::SqliteReader;
pub use schema::{
    SchemaReport, TableProblem, check_kinds, check_schema, list_tables, table_columns,
};
