//! Schema-parameterized score repository.
//!
//! `ScoreRepository` implements fetch-all, insert, update and delete once
//! for any `SchemaDescriptor`; `GameRepository` binds it to a game and
//! converts to and from the typed score records.

mod statement;

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::game::{ChartKey, GameKind, ScoreQuery, ScoreRecord};
use crate::schema::{EditReselect, Query, Record, SchemaDescriptor, Value, cast};
use crate::store::{RawRow, SqliteStore, Store};

pub struct ScoreRepository<S> {
    store: S,
    schema: SchemaDescriptor,
}

impl<S: Store> ScoreRepository<S> {
    pub fn new(store: S, schema: SchemaDescriptor) -> Self {
        Self { store, schema }
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every row of the table
    pub fn get_all(&self) -> Result<Vec<Record>> {
        let rows = self
            .store
            .execute(&statement::select_all(self.schema.table()), &[])?;
        rows.into_iter().map(|row| self.cast_row(row)).collect()
    }

    /// Insert a row and return it as stored.
    ///
    /// `query` must hold exactly the schema's query fields. The stored row is
    /// read back by primary key and must be unique.
    pub fn register(&self, query: &Query) -> Result<Record> {
        let values = self.extract(query)?;
        let fields: Vec<&str> = self.schema.query_fields().collect();
        let table = self.schema.table();

        self.store
            .execute(&statement::insert(table, &fields), &values)?;
        info!("Registered {} in `{}`", self.describe_key(query), table);

        let rows = self.store.execute(
            &statement::select_where(table, self.schema.primary_keys()),
            &self.extract_primary_key(query)?,
        )?;
        self.expect_one("register", rows)
    }

    /// Replace every non-key field of the row matching the query's primary
    /// key and refresh its touch field from the store clock.
    ///
    /// The row is read back according to the schema's `EditReselect` policy
    /// and must be unique.
    pub fn edit(&self, query: &Query) -> Result<Record> {
        let values = self.extract(query)?;
        let key_values = self.extract_primary_key(query)?;
        let table = self.schema.table();

        let (set_fields, set_values): (Vec<&str>, Vec<Value>) = self
            .schema
            .query_fields()
            .zip(values)
            .filter(|(name, _)| !self.schema.is_primary_key(name))
            .unzip();
        let touch = self.schema.touch_field();
        if set_fields.is_empty() && touch.is_none() {
            return Err(Error::Schema(format!("`{}` has no updatable fields", table)));
        }

        let params: Vec<Value> = set_values
            .iter()
            .cloned()
            .chain(key_values.iter().cloned())
            .collect();
        self.store.execute(
            &statement::update(table, &set_fields, touch, self.schema.primary_keys()),
            &params,
        )?;
        info!("Edited {} in `{}`", self.describe_key(query), table);

        let rows = match self.schema.edit_reselect() {
            EditReselect::PrimaryKey => self.store.execute(
                &statement::select_where(table, self.schema.primary_keys()),
                &key_values,
            )?,
            EditReselect::WrittenValues => {
                if set_fields.is_empty() {
                    return Err(Error::Schema(format!(
                        "`{}` has no written values to reselect by",
                        table
                    )));
                }
                self.store
                    .execute(&statement::select_where(table, &set_fields), &set_values)?
            }
        };
        self.expect_one("edit", rows)
    }

    /// Delete the row matching the query's primary key and return it as it
    /// was before deletion.
    ///
    /// Only the primary key fields of `key` are read.
    pub fn delete(&self, key: &Query) -> Result<Record> {
        let key_values = self.extract_primary_key(key)?;
        let table = self.schema.table();
        let keys = self.schema.primary_keys();

        let rows = self
            .store
            .execute(&statement::select_where(table, keys), &key_values)?;
        let record = self.expect_one("delete", rows)?;

        self.store
            .execute(&statement::delete(table, keys), &key_values)?;
        info!("Deleted {} from `{}`", self.describe_key(key), table);
        Ok(record)
    }

    /// Query values in statement order, coerced to their field kinds
    fn extract(&self, query: &Query) -> Result<Vec<Value>> {
        if let Some(extra) = query
            .names()
            .find(|name| !self.schema.query_fields().any(|field| field == *name))
        {
            return Err(Error::Schema(format!("`{}` is not a query field", extra)));
        }
        self.schema
            .query_fields()
            .map(|name| self.coerce(query, name))
            .collect()
    }

    fn extract_primary_key(&self, query: &Query) -> Result<Vec<Value>> {
        self.schema
            .primary_keys()
            .iter()
            .map(|name| self.coerce(query, name))
            .collect()
    }

    fn coerce(&self, query: &Query, name: &str) -> Result<Value> {
        let raw = query
            .get(name)
            .ok_or_else(|| Error::Schema(format!("query is missing `{}`", name)))?;
        let kind = self
            .schema
            .field_kind(name)
            .ok_or_else(|| Error::Schema(format!("`{}` is not a record field", name)))?;
        cast(kind, raw)
    }

    fn cast_row(&self, row: RawRow) -> Result<Record> {
        row.into_iter()
            .map(|(column, raw)| {
                let kind = self.schema.field_kind(&column).ok_or_else(|| {
                    Error::Schema(format!(
                        "unexpected column `{}` in `{}`",
                        column,
                        self.schema.table()
                    ))
                })?;
                Ok((column, cast(kind, &raw)?))
            })
            .collect()
    }

    fn expect_one(&self, operation: &'static str, rows: Vec<RawRow>) -> Result<Record> {
        if rows.len() != 1 {
            debug!(operation, found = rows.len(), "Cardinality check failed");
            return Err(Error::Cardinality {
                operation,
                found: rows.len(),
            });
        }
        let row = rows.into_iter().next().unwrap_or_default();
        self.cast_row(row)
    }

    fn describe_key(&self, query: &Query) -> String {
        self.schema
            .primary_keys()
            .iter()
            .map(|key| match query.get(key) {
                Some(value) => format!("{}={}", key, value),
                None => format!("{}=?", key),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A `ScoreRepository` bound to one game, speaking typed records
pub struct GameRepository<S> {
    game: GameKind,
    inner: ScoreRepository<S>,
}

impl GameRepository<SqliteStore> {
    /// Open the game's database under the configured data directory,
    /// creating the directory and table when missing.
    pub fn open(config: &Config, game: GameKind) -> Result<Self> {
        std::fs::create_dir_all(&config.store.data_dir)?;
        let path = config.store.database_path(game);
        Self::open_at(&path, config, game)
    }

    pub fn open_at<P: AsRef<Path>>(path: P, config: &Config, game: GameKind) -> Result<Self> {
        let store = SqliteStore::open(path, &config.store)?;
        let schema = game.schema().with_edit_reselect(config.edit.reselect);
        store.ensure_table(&schema)?;
        Ok(Self::new(game, ScoreRepository::new(store, schema)))
    }

    /// In-memory database (for testing)
    pub fn open_in_memory(game: GameKind) -> Result<Self> {
        let store = SqliteStore::open_in_memory()?;
        let schema = game.schema();
        store.ensure_table(&schema)?;
        Ok(Self::new(game, ScoreRepository::new(store, schema)))
    }
}

impl<S: Store> GameRepository<S> {
    pub fn new(game: GameKind, inner: ScoreRepository<S>) -> Self {
        Self { game, inner }
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn inner(&self) -> &ScoreRepository<S> {
        &self.inner
    }

    pub fn fetch_all(&self) -> Result<Vec<ScoreRecord>> {
        self.inner
            .get_all()?
            .iter()
            .map(ScoreRecord::try_from)
            .collect()
    }

    pub fn insert(&self, query: &ScoreQuery) -> Result<ScoreRecord> {
        self.check_difficulty(query.difficulty)?;
        ScoreRecord::try_from(self.inner.register(&query.to_query())?)
    }

    pub fn update(&self, query: &ScoreQuery) -> Result<ScoreRecord> {
        self.check_difficulty(query.difficulty)?;
        ScoreRecord::try_from(self.inner.edit(&query.to_query())?)
    }

    pub fn remove(&self, key: &ChartKey) -> Result<ScoreRecord> {
        ScoreRecord::try_from(self.inner.delete(&key.to_query())?)
    }

    fn check_difficulty(&self, difficulty: u8) -> Result<()> {
        match self.game.difficulty_name(difficulty) {
            Some(_) => Ok(()),
            None => Err(Error::Parse(difficulty.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Store double answering every statement with canned rows
    struct ScriptedStore {
        responses: RefCell<Vec<Vec<RawRow>>>,
        log: RefCell<Vec<(String, Vec<Value>)>>,
    }

    impl ScriptedStore {
        fn new(responses: Vec<Vec<RawRow>>) -> Self {
            Self {
                responses: RefCell::new(responses.into_iter().rev().collect()),
                log: RefCell::new(Vec::new()),
            }
        }
    }

    impl Store for ScriptedStore {
        fn execute(&self, statement: &str, params: &[Value]) -> Result<Vec<RawRow>> {
            self.log
                .borrow_mut()
                .push((statement.to_string(), params.to_vec()));
            Ok(self.responses.borrow_mut().pop().unwrap_or_default())
        }
    }

    fn row(name: &str, difficulty: i64) -> RawRow {
        vec![
            ("name".to_string(), Value::Text(name.to_string())),
            ("difficulty".to_string(), Value::Integer(difficulty)),
            ("score".to_string(), Value::Integer(9_800_000)),
            ("constant".to_string(), Value::Real(9.5)),
            ("updated_at".to_string(), Value::Text("2024-01-01 00:00:00".to_string())),
        ]
    }

    fn query() -> Query {
        Query::new()
            .with("name", "X")
            .with("difficulty", 2i64)
            .with("score", "9650000")
            .with("constant", 5.0)
    }

    #[test]
    fn test_register_binds_coerced_values() {
        let store = ScriptedStore::new(vec![vec![], vec![row("X", 2)]]);
        let repo = ScoreRepository::new(&store, GameKind::Arcaea.schema());
        repo.register(&query()).unwrap();

        let log = store.log.borrow();
        assert_eq!(
            log[0].0,
            "INSERT INTO score (name, difficulty, score, constant) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(log[0].1[2], Value::Integer(9_650_000));
        assert_eq!(log[1].0, "SELECT * FROM score WHERE name = ? AND difficulty = ?");
        assert_eq!(log[1].1, vec![Value::Text("X".into()), Value::Integer(2)]);
    }

    #[test]
    fn test_register_requires_unique_reselect() {
        let store = ScriptedStore::new(vec![vec![], vec![row("X", 2), row("X", 2)]]);
        let repo = ScoreRepository::new(&store, GameKind::Arcaea.schema());
        assert!(matches!(
            repo.register(&query()),
            Err(Error::Cardinality { operation: "register", found: 2 })
        ));
    }

    #[test]
    fn test_register_rejects_extra_or_missing_fields() {
        let store = ScriptedStore::new(vec![]);
        let repo = ScoreRepository::new(&store, GameKind::Arcaea.schema());

        let extra = query().with("updated_at", "2024-01-01 00:00:00");
        assert!(matches!(repo.register(&extra), Err(Error::Schema(_))));

        let mut missing = query();
        missing.remove("constant");
        assert!(matches!(repo.register(&missing), Err(Error::Schema(_))));
        assert!(store.log.borrow().is_empty());
    }

    #[test]
    fn test_edit_written_values_reselect() {
        let store = ScriptedStore::new(vec![vec![], vec![row("X", 2)]]);
        let schema = GameKind::Arcaea
            .schema()
            .with_edit_reselect(EditReselect::WrittenValues);
        let repo = ScoreRepository::new(&store, schema);
        repo.edit(&query()).unwrap();

        let log = store.log.borrow();
        assert_eq!(
            log[0].0,
            "UPDATE score SET score = ?, constant = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE name = ? AND difficulty = ?"
        );
        assert_eq!(log[1].0, "SELECT * FROM score WHERE score = ? AND constant = ?");
        assert_eq!(log[1].1, vec![Value::Integer(9_650_000), Value::Real(5.0)]);
    }

    #[test]
    fn test_unknown_column_is_schema_error() {
        let mut unexpected = row("X", 2);
        unexpected.push(("rating".to_string(), Value::Real(1.0)));
        let store = ScriptedStore::new(vec![vec![unexpected]]);
        let repo = ScoreRepository::new(&store, GameKind::Arcaea.schema());
        assert!(matches!(repo.get_all(), Err(Error::Schema(_))));
    }
}
