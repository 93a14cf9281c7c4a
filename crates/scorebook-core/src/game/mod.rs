//! Game variants and their record types.
//!
//! - `GameKind` - the two supported games
//! - `ArcaeaDifficulty`, `ChunithmDifficulty` - difficulty names per game
//! - `ScoreRecord`, `ScoreQuery`, `ChartKey` - typed views over repository fields

mod difficulty;
mod record;

pub use difficulty::*;
pub use record::*;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::schema::{FieldKind, SchemaDescriptor, Value};
use crate::score::{ArcaeaRank, ChunithmRank, Rank, arcaea, chunithm};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameKind {
    Arcaea,
    Chunithm,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Arcaea, GameKind::Chunithm];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// SQLite file holding this game's `score` table
    pub fn database_file(&self) -> String {
        format!("{}.db", self.as_str())
    }

    /// Label shown next to the best rate ("Potential" / "Rate")
    pub fn rating_name(&self) -> &'static str {
        match self {
            Self::Arcaea => "Potential",
            Self::Chunithm => "Rate",
        }
    }

    pub fn difficulty_name(&self, difficulty: u8) -> Option<&'static str> {
        match self {
            Self::Arcaea => ArcaeaDifficulty::from_u8(difficulty).map(|d| d.short_name()),
            Self::Chunithm => ChunithmDifficulty::from_u8(difficulty).map(|d| d.short_name()),
        }
    }

    pub fn difficulty_color(&self, difficulty: u8) -> Option<&'static str> {
        match self {
            Self::Arcaea => ArcaeaDifficulty::from_u8(difficulty).map(|d| d.color_code()),
            Self::Chunithm => ChunithmDifficulty::from_u8(difficulty).map(|d| d.color_code()),
        }
    }

    /// Parse a difficulty given either as its index or its name (case-insensitive)
    pub fn parse_difficulty(&self, input: &str) -> Option<u8> {
        if let Ok(index) = input.parse::<u8>() {
            return self.difficulty_name(index).map(|_| index);
        }
        let upper = input.to_ascii_uppercase();
        match self {
            Self::Arcaea => upper.parse::<ArcaeaDifficulty>().ok().map(|d| d as u8),
            Self::Chunithm => upper.parse::<ChunithmDifficulty>().ok().map(|d| d as u8),
        }
    }

    pub fn rank(&self, score: u32) -> Rank {
        match self {
            Self::Arcaea => Rank::Arcaea(ArcaeaRank::from_score(score)),
            Self::Chunithm => Rank::Chunithm(ChunithmRank::from_score(score)),
        }
    }

    pub fn rating(&self, score: u32, constant: f64) -> f64 {
        match self {
            Self::Arcaea => arcaea::potential(score, constant),
            Self::Chunithm => chunithm::rate(score, constant),
        }
    }

    /// Schema of the `score` table.
    ///
    /// Both games currently share the same layout; the descriptor is still
    /// built per game so either can diverge without touching the repository.
    pub fn schema(&self) -> SchemaDescriptor {
        SchemaDescriptor::builder("score")
            .primary_keys(["name", "difficulty"])
            .field("name", FieldKind::Text)
            .field("difficulty", FieldKind::Number)
            .field("score", FieldKind::Number)
            .field("constant", FieldKind::Number)
            .field("updated_at", FieldKind::Date)
            .query_field("name", Value::Text(String::new()))
            .query_field("difficulty", Value::Integer(0))
            .query_field("score", Value::Integer(0))
            .query_field("constant", Value::Real(0.0))
            .touch_field("updated_at")
            .build()
            .expect("built-in score schema is valid")
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_parse() {
        assert_eq!("arcaea".parse::<GameKind>().unwrap(), GameKind::Arcaea);
        assert_eq!("chunithm".parse::<GameKind>().unwrap(), GameKind::Chunithm);
        assert!("maimai".parse::<GameKind>().is_err());
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(GameKind::Arcaea.parse_difficulty("2"), Some(2));
        assert_eq!(GameKind::Arcaea.parse_difficulty("beyond"), Some(3));
        assert_eq!(GameKind::Chunithm.parse_difficulty("MASTER"), Some(3));
        assert_eq!(GameKind::Chunithm.parse_difficulty("FUTURE"), None);
        assert_eq!(GameKind::Arcaea.parse_difficulty("4"), None);
    }

    #[test]
    fn test_schema_shape() {
        let schema = GameKind::Chunithm.schema();
        assert_eq!(schema.table(), "score");
        assert_eq!(schema.primary_keys(), ["name", "difficulty"]);
        assert_eq!(schema.touch_field(), Some("updated_at"));
        assert_eq!(schema.field_kind("updated_at"), Some(FieldKind::Date));
        let query: Vec<&str> = schema.query_fields().collect();
        assert_eq!(query, ["name", "difficulty", "score", "constant"]);
    }
}
