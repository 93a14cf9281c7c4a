use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{Query, Record, Value};

/// Primary key of a score row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartKey {
    pub name: String,
    pub difficulty: u8,
}

impl ChartKey {
    pub fn new(name: impl Into<String>, difficulty: u8) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .with("name", self.name.as_str())
            .with("difficulty", i64::from(self.difficulty))
    }
}

/// Insert/update payload: a score row without its store-managed timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreQuery {
    pub name: String,
    pub difficulty: u8,
    pub score: u32,
    pub constant: f64,
}

impl ScoreQuery {
    pub fn key(&self) -> ChartKey {
        ChartKey::new(self.name.clone(), self.difficulty)
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .with("name", self.name.as_str())
            .with("difficulty", i64::from(self.difficulty))
            .with("score", i64::from(self.score))
            .with("constant", self.constant)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub difficulty: u8,
    pub score: u32,
    pub constant: f64,
    pub updated_at: NaiveDateTime,
}

impl ScoreRecord {
    pub fn key(&self) -> ChartKey {
        ChartKey::new(self.name.clone(), self.difficulty)
    }

    pub fn to_query(&self) -> ScoreQuery {
        ScoreQuery {
            name: self.name.clone(),
            difficulty: self.difficulty,
            score: self.score,
            constant: self.constant,
        }
    }
}

impl TryFrom<&Record> for ScoreRecord {
    type Error = Error;

    fn try_from(record: &Record) -> Result<Self> {
        let field = |name: &str| {
            record
                .get(name)
                .ok_or_else(|| Error::Schema(format!("record is missing `{}`", name)))
        };
        let mismatch = |value: &Value| Error::Parse(value.to_string());

        let name = field("name")?;
        let difficulty = field("difficulty")?;
        let score = field("score")?;
        let constant = field("constant")?;
        let updated_at = field("updated_at")?;

        Ok(Self {
            name: name.as_str().ok_or_else(|| mismatch(name))?.to_string(),
            difficulty: difficulty
                .as_i64()
                .and_then(|d| u8::try_from(d).ok())
                .ok_or_else(|| mismatch(difficulty))?,
            score: score
                .as_i64()
                .and_then(|s| u32::try_from(s).ok())
                .ok_or_else(|| mismatch(score))?,
            constant: constant.as_f64().ok_or_else(|| mismatch(constant))?,
            updated_at: updated_at.as_date().ok_or_else(|| mismatch(updated_at))?,
        })
    }
}

impl TryFrom<Record> for ScoreRecord {
    type Error = Error;

    fn try_from(record: Record) -> Result<Self> {
        Self::try_from(&record)
    }
}
