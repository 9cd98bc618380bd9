//! Read-only schema inspection.
//!
//! The retrieval layer never creates or migrates tables. These helpers only
//! look at what a database contains and report how it differs from what the
//! built-in kinds expect to read.

use cinedex_catalog::{EntryKind, ItemKind, association_table, kinds};
use cinedex_core::Result;
use rusqlite::{Connection, params};

use crate::error::classify;

/// List all user tables, sorted by name.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(classify)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(classify)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(classify)
}

/// Column names of `table` in declaration order, or `None` if the table
/// does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Option<Vec<String>>> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?1 COLLATE NOCASE)",
            params![table],
            |row| row.get(0),
        )
        .map_err(classify)?;
    if !exists {
        return Ok(None);
    }

    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(classify)?;
    let rows = stmt
        .query_map(params![table], |row| row.get::<_, String>(0))
        .map_err(classify)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(classify)
}

/// A table that does not match what its kind reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProblem {
    pub table: String,
    /// The table is absent altogether.
    pub missing_table: bool,
    /// Columns the kind reads that the table lacks.
    pub missing_columns: Vec<String>,
}

/// Result of [`check_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub tables_checked: usize,
    pub problems: Vec<TableProblem>,
}

impl SchemaReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn missing_tables(&self) -> impl Iterator<Item = &str> {
        self.problems
            .iter()
            .filter(|p| p.missing_table)
            .map(|p| p.table.as_str())
    }

    fn check(&mut self, conn: &Connection, table: &str, expected: &[String]) -> Result<()> {
        self.tables_checked += 1;
        match table_columns(conn, table)? {
            None => self.problems.push(TableProblem {
                table: table.to_string(),
                missing_table: true,
                missing_columns: Vec::new(),
            }),
            Some(actual) => {
                let missing: Vec<String> = expected
                    .iter()
                    .filter(|c| !actual.iter().any(|a| a.eq_ignore_ascii_case(c)))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    self.problems.push(TableProblem {
                        table: table.to_string(),
                        missing_table: false,
                        missing_columns: missing,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Check every built-in entry kind and every association table its
/// collections read from.
pub fn check_schema(conn: &Connection) -> Result<SchemaReport> {
    check_kinds(conn, kinds::ENTRY_KINDS)
}

/// Check `entry_kinds` and their collection tables.
pub fn check_kinds(conn: &Connection, entry_kinds: &[&EntryKind]) -> Result<SchemaReport> {
    let mut report = SchemaReport::default();
    for kind in entry_kinds {
        report.check(conn, kind.table(), &kind.columns())?;
        for collection in kind.collections() {
            let item_kind = ItemKind::for_target(collection.target);
            let table = association_table(kind.table(), collection.target);
            report.check(
                conn,
                &table,
                &item_kind.columns(kind.table(), collection.target),
            )?;
        }
    }
    log::debug!(
        "Schema check: {} tables, {} problems",
        report.tables_checked,
        report.problems.len()
    );
    Ok(report)
}
