use std::path::Path;

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::params_from_iter;
use tracing::{debug, info};

use super::{ConnectionPool, RawRow, Store};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::schema::{DATE_FORMAT, FieldKind, SchemaDescriptor, Value};

/// SQLite-backed `Store` holding a bounded connection pool
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P, config: &StoreConfig) -> Result<Self> {
        let path = path.as_ref();
        let pool = ConnectionPool::open(path, config.pool_size, config.timeout())?;
        info!("Opened store {:?} with {} connection(s)", path, pool.size());
        Ok(Self { pool })
    }

    /// Single-connection in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            pool: ConnectionPool::in_memory(StoreConfig::default().timeout())?,
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Create the schema's table if it does not exist yet.
    ///
    /// The touch field defaults to `CURRENT_TIMESTAMP` so inserts never
    /// supply it.
    pub fn ensure_table(&self, schema: &SchemaDescriptor) -> Result<()> {
        let statement = create_table_statement(schema);
        debug!("{}", statement);
        let conn = self.pool.acquire()?;
        conn.execute(&statement, [])?;
        Ok(())
    }
}

fn create_table_statement(schema: &SchemaDescriptor) -> String {
    let mut columns: Vec<String> = schema
        .record_fields()
        .map(|(name, kind)| {
            let ty = match kind {
                FieldKind::Number => "NUMERIC",
                FieldKind::Text | FieldKind::Date => "TEXT",
                FieldKind::Boolean => "INTEGER",
            };
            if schema.touch_field() == Some(name) {
                format!("{} {} NOT NULL DEFAULT CURRENT_TIMESTAMP", name, ty)
            } else {
                format!("{} {} NOT NULL", name, ty)
            }
        })
        .collect();
    columns.push(format!("PRIMARY KEY ({})", schema.primary_keys().join(", ")));

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        schema.table(),
        columns.join(", ")
    )
}

impl Store for SqliteStore {
    fn execute(&self, statement: &str, params: &[Value]) -> Result<Vec<RawRow>> {
        let conn = self.pool.acquire()?;
        debug!(statement, params = params.len(), "Executing statement");

        let mut stmt = conn.prepare(statement)?;
        if stmt.column_count() == 0 {
            let changed = stmt.execute(params_from_iter(params.iter()))?;
            debug!(changed, "Statement applied");
            return Ok(Vec::new());
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut raw = Vec::with_capacity(columns.len());
            for (index, column) in columns.iter().enumerate() {
                raw.push((column.clone(), from_sql(row.get_ref(index)?)));
            }
            result.push(raw);
        }
        debug!(rows = result.len(), "Statement returned rows");
        Ok(result)
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            Value::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Boolean(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            Value::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Date(d) => ToSqlOutput::Owned(SqlValue::Text(d.format(DATE_FORMAT).to_string())),
        })
    }
}
