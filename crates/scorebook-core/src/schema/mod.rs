//! Declarative table description shared by every game.
//!
//! A `SchemaDescriptor` carries everything the repository needs to build
//! statements for one table: its primary key, the kind of each stored
//! field (which drives value coercion), the fields accepted on
//! insert/update together with their form defaults, and the store-managed
//! mutation timestamp.

mod value;

pub use value::*;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::error::{Error, Result};

/// Semantic type of a stored field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Text,
    Boolean,
    Date,
}

/// Predicate `edit` uses to read back the row it just wrote.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EditReselect {
    /// Match on the primary key values of the query
    #[default]
    PrimaryKey,
    /// Match on the non-key values just written; fails when another row
    /// holds identical values
    WrittenValues,
}

#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    table: String,
    primary_keys: Vec<String>,
    record_shape: Vec<(String, FieldKind)>,
    query_shape: Vec<(String, Value)>,
    touch_field: Option<String>,
    edit_reselect: EditReselect,
}

impl SchemaDescriptor {
    pub fn builder(table: impl Into<String>) -> SchemaDescriptorBuilder {
        SchemaDescriptorBuilder {
            table: table.into(),
            primary_keys: Vec::new(),
            record_shape: Vec::new(),
            query_shape: Vec::new(),
            touch_field: None,
            edit_reselect: EditReselect::default(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_keys.iter().any(|k| k == name)
    }

    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.record_shape
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, kind)| *kind)
    }

    pub fn record_fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.record_shape.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Fields accepted on insert/update, in statement order
    pub fn query_fields(&self) -> impl Iterator<Item = &str> {
        self.query_shape.iter().map(|(name, _)| name.as_str())
    }

    /// Query fields that are not part of the primary key
    pub fn mutable_fields(&self) -> impl Iterator<Item = &str> {
        self.query_fields().filter(|name| !self.is_primary_key(name))
    }

    /// A query pre-filled with every field's default value
    pub fn default_query(&self) -> Query {
        self.query_shape
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn touch_field(&self) -> Option<&str> {
        self.touch_field.as_deref()
    }

    pub fn edit_reselect(&self) -> EditReselect {
        self.edit_reselect
    }

    pub fn with_edit_reselect(mut self, policy: EditReselect) -> Self {
        self.edit_reselect = policy;
        self
    }
}

pub struct SchemaDescriptorBuilder {
    table: String,
    primary_keys: Vec<String>,
    record_shape: Vec<(String, FieldKind)>,
    query_shape: Vec<(String, Value)>,
    touch_field: Option<String>,
    edit_reselect: EditReselect,
}

impl SchemaDescriptorBuilder {
    pub fn primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.record_shape.push((name.into(), kind));
        self
    }

    pub fn query_field(mut self, name: impl Into<String>, default: Value) -> Self {
        self.query_shape.push((name.into(), default));
        self
    }

    pub fn touch_field(mut self, name: impl Into<String>) -> Self {
        self.touch_field = Some(name.into());
        self
    }

    pub fn edit_reselect(mut self, policy: EditReselect) -> Self {
        self.edit_reselect = policy;
        self
    }

    /// Validate and build the descriptor.
    ///
    /// Every name ends up inside SQL text, so all of them must be plain
    /// identifiers. Primary keys and query fields must be record fields,
    /// primary keys must be query fields, and the touch field must be a
    /// date record field outside the query shape.
    pub fn build(self) -> Result<SchemaDescriptor> {
        let names = std::iter::once(self.table.as_str())
            .chain(self.primary_keys.iter().map(String::as_str))
            .chain(self.record_shape.iter().map(|(n, _)| n.as_str()))
            .chain(self.query_shape.iter().map(|(n, _)| n.as_str()))
            .chain(self.touch_field.iter().map(String::as_str));
        for name in names {
            if !is_identifier(name) {
                return Err(Error::Schema(format!("`{}` is not a valid identifier", name)));
            }
        }

        if self.primary_keys.is_empty() {
            return Err(Error::Schema("primary key must not be empty".to_string()));
        }

        let kind_of = |name: &str| {
            self.record_shape
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, kind)| *kind)
        };

        for (name, _) in &self.query_shape {
            if kind_of(name).is_none() {
                return Err(Error::Schema(format!("query field `{}` is not a record field", name)));
            }
        }
        for key in &self.primary_keys {
            if !self.query_shape.iter().any(|(name, _)| name == key) {
                return Err(Error::Schema(format!("primary key `{}` is not a query field", key)));
            }
        }
        if let Some(touch) = &self.touch_field {
            if kind_of(touch) != Some(FieldKind::Date) {
                return Err(Error::Schema(format!("touch field `{}` must be a date field", touch)));
            }
            if self.query_shape.iter().any(|(name, _)| name == touch) {
                return Err(Error::Schema(format!(
                    "touch field `{}` is store-managed and cannot be a query field",
                    touch
                )));
            }
        }

        Ok(SchemaDescriptor {
            table: self.table,
            primary_keys: self.primary_keys,
            record_shape: self.record_shape,
            query_shape: self.query_shape,
            touch_field: self.touch_field,
            edit_reselect: self.edit_reselect,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
