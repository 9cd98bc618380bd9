//! The reader capability: the only thing the retrieval layer needs from a
//! backing store.

use crate::error::{Error, Result, require};
use crate::value::{Row, Value};

/// A single-table, single-filter read.
///
/// Equivalent to `SELECT <columns> FROM <table> WHERE <filter_column> =
/// <filter_value> [ORDER BY <order_by>]`, but expressed without committing to
/// any SQL dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub columns: Vec<String>,
    pub filter_column: String,
    pub filter_value: Value,
    pub order_by: Option<String>,
}

impl Query {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filter_column: String::new(),
            filter_value: Value::Null,
            order_by: None,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter_column = column.into();
        self.filter_value = value.into();
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    /// Check the argument constraints every reader relies on.
    ///
    /// Called by implementations before touching the store, so a malformed
    /// query never reaches it.
    pub fn validate(&self) -> Result<()> {
        require(&self.table, "table")?;
        require(&self.filter_column, "filter_column")?;
        if self.columns.iter().any(|c| c.is_empty()) {
            return Err(Error::invalid_argument("columns"));
        }
        if let Some(order) = &self.order_by {
            require(order, "order")?;
        }
        Ok(())
    }
}

/// Execute parameterized single-table reads against a backing store.
///
/// Implementations return an empty vector, not an error, when nothing
/// matches. They fail with [`Error::Connection`] when the store is
/// unreachable and [`Error::Schema`] when a named table or column does not
/// exist. Both are fatal; callers never retry.
///
/// Implementations must be usable from several threads at once, either by
/// being stateless per call or by synchronizing internally.
pub trait Reader: Send + Sync {
    fn query(&self, query: &Query) -> Result<Vec<Row>>;
}

impl<R: Reader + ?Sized> Reader for &R {
    fn query(&self, query: &Query) -> Result<Vec<Row>> {
        (**self).query(query)
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn query(&self, query: &Query) -> Result<Vec<Row>> {
        (**self).query(query)
    }
}

impl<R: Reader + ?Sized> Reader for std::sync::Arc<R> {
    fn query(&self, query: &Query) -> Result<Vec<Row>> {
        (**self).query(query)
    }
}
