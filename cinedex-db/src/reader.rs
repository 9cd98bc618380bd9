//! Read-only SQLite implementation of the reader capability.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use cinedex_core::{Error, Query, Reader, Result, Row, Value};
use rusqlite::config::DbConfig;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, OpenFlags};

use crate::error::classify;
use crate::schema::{self, SchemaReport};

/// How long a read waits on a writer holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A [`Reader`] over a single SQLite connection.
///
/// The connection is guarded by a mutex, so one reader can be shared by
/// several threads; their queries run one at a time.
pub struct SqliteReader {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteReader {
    /// Open an existing database file read-only.
    ///
    /// Fails with a connection error if the file is missing or is not a
    /// SQLite database.
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            Error::connection_with(format!("cannot open {}", path.display()), e)
        })?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(classify)?;
        strict_identifiers(&conn)?;

        // Opening is lazy; touch the header so a non-database file fails here.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| Error::connection_with(format!("cannot read {}", path.display()), e))?;

        log::debug!("Opened {} read-only", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already open connection, e.g. an in-memory test database.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        strict_identifiers(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Path of the database file, if opened from one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` with exclusive access to the underlying connection.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::connection("SQLite connection lock poisoned"))?;
        f(&conn)
    }

    /// Compare the database against the built-in kind table.
    pub fn check_schema(&self) -> Result<SchemaReport> {
        self.with_connection(schema::check_schema)
    }

    pub fn into_inner(self) -> Result<Connection> {
        self.conn
            .into_inner()
            .map_err(|_| Error::connection("SQLite connection lock poisoned"))
    }
}

impl Reader for SqliteReader {
    fn query(&self, query: &Query) -> Result<Vec<Row>> {
        query.validate()?;
        let sql = build_sql(query);
        log::debug!("{sql} -- ?1 = {:?}", query.filter_value);

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql).map_err(classify)?;
            let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

            let mut rows = stmt
                .query([to_sql(&query.filter_value)])
                .map_err(classify)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next().map_err(classify)? {
                let mut mapped = Row::new();
                for (i, name) in names.iter().enumerate() {
                    let value = row.get_ref(i).map_err(classify)?;
                    mapped.push(name.as_str(), from_sql(value));
                }
                out.push(mapped);
            }

            log::trace!("{} rows from {}", out.len(), query.table);
            Ok(out)
        })
    }
}

// ── SQL helpers ─────────────────────────────────────────────────────────────

/// Turn off SQLite's fallback that reads an unknown `"identifier"` as a
/// string literal, so a missing column fails instead of matching text.
fn strict_identifiers(conn: &Connection) -> Result<()> {
    conn.set_db_config(DbConfig::SQLITE_DBCONFIG_DQS_DML, false)
        .map_err(classify)?;
    conn.set_db_config(DbConfig::SQLITE_DBCONFIG_DQS_DDL, false)
        .map_err(classify)?;
    Ok(())
}

/// Quote an identifier so table and column names are never interpreted as
/// SQL.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn build_sql(query: &Query) -> String {
    let columns = if query.columns.is_empty() {
        "*".to_string()
    } else {
        query
            .columns
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut sql = format!(
        "SELECT {columns} FROM {} WHERE {} = ?1",
        quote_identifier(&query.table),
        quote_identifier(&query.filter_column),
    );
    if let Some(order) = &query.order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(&quote_identifier(order));
    }
    sql
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Real(f) => SqlValue::Real(*f),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_quotes_identifiers() {
        let query = Query::new("MovieCountry")
            .columns(["ID", "MovieID"])
            .filter("MovieID", "_xxx")
            .order_by("ID");
        assert_eq!(
            build_sql(&query),
            r#"SELECT "ID", "MovieID" FROM "MovieCountry" WHERE "MovieID" = ?1 ORDER BY "ID""#
        );
    }

    #[test]
    fn quote_escapes_embedded_quotes() {
        assert_eq!(quote_identifier(r#"a"b"#), r#""a""b""#);
    }

    #[test]
    fn empty_column_list_selects_everything() {
        let query = Query::new("Genre").filter("ID", "_xxx");
        assert_eq!(
            build_sql(&query),
            r#"SELECT * FROM "Genre" WHERE "ID" = ?1"#
        );
    }

    #[test]
    fn quoted_unknown_column_is_not_a_string() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE Genre (ID TEXT, Name TEXT)")
            .unwrap();
        let reader = SqliteReader::from_connection(conn).unwrap();

        let err = reader
            .query(&Query::new("Genre").columns(["Title"]).filter("ID", "_xxx"))
            .unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn values_survive_the_sqlite_round_trip() {
        let conn = Connection::open_in_memory().unwrap();
        for value in [
            Value::Null,
            Value::Integer(-7),
            Value::Real(1.85),
            Value::from("Genre X"),
            Value::Blob(vec![0, 1, 2]),
        ] {
            let back = conn
                .query_row("SELECT ?1", [to_sql(&value)], |row| {
                    Ok(from_sql(row.get_ref(0)?))
                })
                .unwrap();
            assert_eq!(back, value);
        }
    }
}
