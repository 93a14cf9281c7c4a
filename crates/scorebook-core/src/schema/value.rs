use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::FieldKind;
use crate::error::{Error, Result};

/// Text layout the store uses for timestamps (`CURRENT_TIMESTAMP`)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single field value, either raw from the store or coerced by `cast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Real(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::Text(s) => write!(f, "{}", s),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Coerce a raw value into the semantic type of `kind`.
///
/// Numbers accept integers, reals, booleans and numeric text. Booleans
/// treat numeric zero as `false` and every other value as `true`. Dates
/// accept a `Date` or text in the store's timestamp layout, ISO-8601 or
/// RFC 3339. `NULL` never coerces.
pub fn cast(kind: FieldKind, raw: &Value) -> Result<Value> {
    let parse_error = || Error::Parse(raw.to_string());

    match (kind, raw) {
        (_, Value::Null) => Err(parse_error()),

        (FieldKind::Number, Value::Integer(_) | Value::Real(_)) => Ok(raw.clone()),
        (FieldKind::Number, Value::Boolean(b)) => Ok(Value::Integer(i64::from(*b))),
        (FieldKind::Number, Value::Text(s)) => parse_number(s).ok_or_else(parse_error),
        (FieldKind::Number, Value::Date(_)) => Err(parse_error()),

        (FieldKind::Text, Value::Text(_)) => Ok(raw.clone()),
        (FieldKind::Text, other) => Ok(Value::Text(other.to_string())),

        (FieldKind::Boolean, Value::Boolean(_)) => Ok(raw.clone()),
        (FieldKind::Boolean, Value::Integer(i)) => Ok(Value::Boolean(*i != 0)),
        (FieldKind::Boolean, Value::Real(f)) => Ok(Value::Boolean(*f != 0.0)),
        (FieldKind::Boolean, _) => Ok(Value::Boolean(true)),

        (FieldKind::Date, Value::Date(_)) => Ok(raw.clone()),
        (FieldKind::Date, Value::Text(s)) => parse_date(s).map(Value::Date).ok_or_else(parse_error),
        (FieldKind::Date, _) => Err(parse_error()),
    }
}

fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Value::Integer(0));
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Real)
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if let Ok(d) = NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(d) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(d);
    }
    if let Ok(d) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(d);
    }
    if let Ok(d) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|d| d.naive_utc())
}

/// Named field values of one row or one query payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Value>);

/// A row as returned by the repository
pub type Record = Fields;

/// An insert/update/delete payload
pub type Query = Fields;

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_number() {
        assert_eq!(cast(FieldKind::Number, &Value::Integer(42)).unwrap(), Value::Integer(42));
        assert_eq!(cast(FieldKind::Number, &Value::Real(9.5)).unwrap(), Value::Real(9.5));
        assert_eq!(cast(FieldKind::Number, &"9650000".into()).unwrap(), Value::Integer(9650000));
        assert_eq!(cast(FieldKind::Number, &" 10.8 ".into()).unwrap(), Value::Real(10.8));
        assert_eq!(cast(FieldKind::Number, &Value::Boolean(true)).unwrap(), Value::Integer(1));
        assert!(cast(FieldKind::Number, &"abc".into()).is_err());
    }

    #[test]
    fn test_cast_boolean_zero_convention() {
        assert_eq!(cast(FieldKind::Boolean, &Value::Integer(0)).unwrap(), Value::Boolean(false));
        assert_eq!(cast(FieldKind::Boolean, &Value::Integer(1)).unwrap(), Value::Boolean(true));
        assert_eq!(cast(FieldKind::Boolean, &Value::Integer(-7)).unwrap(), Value::Boolean(true));
        assert_eq!(cast(FieldKind::Boolean, &Value::Real(0.0)).unwrap(), Value::Boolean(false));
        // text is never parsed, so even "0" is true
        assert_eq!(cast(FieldKind::Boolean, &"0".into()).unwrap(), Value::Boolean(true));
        assert_eq!(cast(FieldKind::Boolean, &"".into()).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_cast_text() {
        assert_eq!(cast(FieldKind::Text, &Value::Integer(3)).unwrap(), Value::Text("3".into()));
        assert_eq!(
            cast(FieldKind::Text, &"Tempestissimo".into()).unwrap(),
            Value::Text("Tempestissimo".into())
        );
    }

    #[test]
    fn test_cast_date() {
        let expected = NaiveDateTime::parse_from_str("2024-03-01 12:34:56", DATE_FORMAT).unwrap();
        assert_eq!(
            cast(FieldKind::Date, &"2024-03-01 12:34:56".into()).unwrap(),
            Value::Date(expected)
        );
        assert_eq!(
            cast(FieldKind::Date, &"2024-03-01T12:34:56".into()).unwrap(),
            Value::Date(expected)
        );
        assert_eq!(
            cast(FieldKind::Date, &"2024-03-01T12:34:56Z".into()).unwrap(),
            Value::Date(expected)
        );
        assert!(cast(FieldKind::Date, &Value::Integer(0)).is_err());
    }

    #[test]
    fn test_cast_failure_carries_raw_value() {
        match cast(FieldKind::Date, &"yesterday".into()) {
            Err(Error::Parse(raw)) => assert_eq!(raw, "yesterday"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(cast(FieldKind::Text, &Value::Null), Err(Error::Parse(_))));
    }

    #[test]
    fn test_value_json_untagged() {
        let fields: Fields =
            serde_json::from_str(r#"{"name":"X","difficulty":2,"constant":5.5,"flag":true}"#)
                .unwrap();
        assert_eq!(fields.get("name"), Some(&Value::Text("X".into())));
        assert_eq!(fields.get("difficulty"), Some(&Value::Integer(2)));
        assert_eq!(fields.get("constant"), Some(&Value::Real(5.5)));
        assert_eq!(fields.get("flag"), Some(&Value::Boolean(true)));
    }
}
