//! In-memory [`Reader`] used as a test double.
//!
//! Holds named tables with declared columns and behaves like a tiny
//! embedded store: unknown tables and columns are schema errors, the
//! reader can be taken offline to simulate an unreachable store, and every
//! issued query is recorded so tests can assert on what was (or was not)
//! asked for.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::reader::{Query, Reader};
use crate::value::{Row, Value};

#[derive(Debug, Default)]
struct MemoryTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl MemoryTable {
    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(column))
    }
}

#[derive(Debug)]
pub struct MemoryReader {
    tables: HashMap<String, MemoryTable>,
    online: AtomicBool,
    log: Mutex<Vec<String>>,
}

impl Default for MemoryReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryReader {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            online: AtomicBool::new(true),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Declare a table and its columns. Redeclaring adds missing columns.
    pub fn define(&mut self, table: &str, columns: &[&str]) {
        let entry = self
            .tables
            .entry(table.to_ascii_lowercase())
            .or_insert_with(|| MemoryTable {
                name: table.to_string(),
                ..Default::default()
            });
        for column in columns {
            if !entry.has_column(column) {
                entry.columns.push((*column).to_string());
            }
        }
    }

    /// Append a row, declaring the table and any new columns on the way.
    pub fn insert(&mut self, table: &str, row: Row) {
        let columns: Vec<&str> = row.columns().collect();
        self.define(table, &columns);
        if let Some(t) = self.tables.get_mut(&table.to_ascii_lowercase()) {
            t.rows.push(row);
        }
    }

    pub fn with_table(mut self, table: &str, columns: &[&str]) -> Self {
        self.define(table, columns);
        self
    }

    pub fn with_row(mut self, table: &str, row: Row) -> Self {
        self.insert(table, row);
        self
    }

    /// Simulate the store going away (or coming back).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Table names of every query issued so far, in order.
    pub fn queried_tables(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn query_count(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear_log(&self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Filter equality as a SQLite column with numeric affinity applies it:
/// numeric text matches the number it spells, and `Null` matches nothing.
fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Text(t), n @ (Value::Integer(_) | Value::Real(_)))
        | (n @ (Value::Integer(_) | Value::Real(_)), Value::Text(t)) => t
            .trim()
            .parse::<f64>()
            .is_ok_and(|x| n.as_f64() == Some(x)),
        _ => a.compare(b).is_eq(),
    }
}

impl Reader for MemoryReader {
    fn query(&self, query: &Query) -> Result<Vec<Row>> {
        query.validate()?;

        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.table.clone());

        if !self.online.load(Ordering::SeqCst) {
            return Err(Error::connection("in-memory store is offline"));
        }

        let table = self
            .tables
            .get(&query.table.to_ascii_lowercase())
            .ok_or_else(|| Error::schema(format!("no such table: {}", query.table)))?;

        let referenced = query
            .columns
            .iter()
            .chain(std::iter::once(&query.filter_column))
            .chain(query.order_by.iter());
        for column in referenced {
            if !table.has_column(column) {
                return Err(Error::schema(format!(
                    "no such column: {}.{}",
                    table.name, column
                )));
            }
        }

        let mut matched: Vec<&Row> = table
            .rows
            .iter()
            .filter(|row| equals(row.value(&query.filter_column), &query.filter_value))
            .collect();

        if let Some(order) = &query.order_by {
            matched.sort_by(|a, b| a.value(order).compare(b.value(order)));
        }

        let projection: Vec<&String> = if query.columns.is_empty() {
            table.columns.iter().collect()
        } else {
            query.columns.iter().collect()
        };

        log::trace!("memory query on {} matched {} rows", table.name, matched.len());

        Ok(matched
            .into_iter()
            .map(|row| {
                projection
                    .iter()
                    .map(|c| (c.as_str(), row.value(c).clone()))
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
