//! Relational store access.
//!
//! The repository only ever talks to a `Store`: one statement template with
//! positional `?` placeholders plus the values to bind, answered by the
//! rows it produced. `SqliteStore` is the bundled implementation.

mod pool;
mod sqlite;

pub use pool::{ConnectionPool, PooledConnection};
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::schema::Value;

/// A result row as `(column, raw value)` pairs in select order
pub type RawRow = Vec<(String, Value)>;

pub trait Store {
    /// Execute one statement. Statements that produce no columns return an
    /// empty row set.
    fn execute(&self, statement: &str, params: &[Value]) -> Result<Vec<RawRow>>;
}

impl<S: Store + ?Sized> Store for &S {
    fn execute(&self, statement: &str, params: &[Value]) -> Result<Vec<RawRow>> {
        (**self).execute(statement, params)
    }
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn execute(&self, statement: &str, params: &[Value]) -> Result<Vec<RawRow>> {
        (**self).execute(statement, params)
    }
}
