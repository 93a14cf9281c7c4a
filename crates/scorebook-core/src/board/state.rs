use serde::Serialize;

use crate::error::{Error, Result};
use crate::game::{ChartKey, GameKind, ScoreRecord};

/// Outcome of a repository call, fed back into `BoardState`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    Initialized {
        game: GameKind,
        records: Vec<ScoreRecord>,
    },
    Inserted {
        game: GameKind,
        record: ScoreRecord,
    },
    Updated {
        game: GameKind,
        record: ScoreRecord,
    },
    Removed {
        game: GameKind,
        record: ScoreRecord,
    },
}

impl BoardEvent {
    pub fn game(&self) -> GameKind {
        match self {
            Self::Initialized { game, .. }
            | Self::Inserted { game, .. }
            | Self::Updated { game, .. }
            | Self::Removed { game, .. } => *game,
        }
    }
}

/// Loaded score lists, `None` per game until its first fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardState {
    pub arcaea: Option<Vec<ScoreRecord>>,
    pub chunithm: Option<Vec<ScoreRecord>>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, game: GameKind) -> Option<&[ScoreRecord]> {
        match game {
            GameKind::Arcaea => self.arcaea.as_deref(),
            GameKind::Chunithm => self.chunithm.as_deref(),
        }
    }

    fn slot(&mut self, game: GameKind) -> &mut Option<Vec<ScoreRecord>> {
        match game {
            GameKind::Arcaea => &mut self.arcaea,
            GameKind::Chunithm => &mut self.chunithm,
        }
    }

    /// Next state after `event`.
    ///
    /// Updating or removing a key the list does not hold is an error, and so
    /// is doing it before the list was loaded.
    pub fn apply(mut self, event: BoardEvent) -> Result<Self> {
        let game = event.game();
        let slot = self.slot(game);
        match event {
            BoardEvent::Initialized { records, .. } => {
                *slot = Some(records);
            }
            BoardEvent::Inserted { record, .. } => {
                if let Some(records) = slot {
                    records.push(record);
                }
            }
            BoardEvent::Updated { record, .. } => {
                let records = slot.as_mut().ok_or_else(|| not_found(game, &record.key()))?;
                let index = position(records, &record.key())
                    .ok_or_else(|| not_found(game, &record.key()))?;
                records[index] = record;
            }
            BoardEvent::Removed { record, .. } => {
                let records = slot.as_mut().ok_or_else(|| not_found(game, &record.key()))?;
                let index = position(records, &record.key())
                    .ok_or_else(|| not_found(game, &record.key()))?;
                records.remove(index);
            }
        }
        Ok(self)
    }
}

fn position(records: &[ScoreRecord], key: &ChartKey) -> Option<usize> {
    records
        .iter()
        .position(|r| r.name == key.name && r.difficulty == key.difficulty)
}

fn not_found(game: GameKind, key: &ChartKey) -> Error {
    Error::RecordNotFound(format!("{} {} [{}]", game, key.name, key.difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DATE_FORMAT;
    use chrono::NaiveDateTime;

    fn record(name: &str, difficulty: u8, score: u32) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            difficulty,
            score,
            constant: 10.0,
            updated_at: NaiveDateTime::parse_from_str("2024-01-01 00:00:00", DATE_FORMAT).unwrap(),
        }
    }

    fn loaded() -> BoardState {
        BoardState::new()
            .apply(BoardEvent::Initialized {
                game: GameKind::Arcaea,
                records: vec![
                    record("Grievous Lady", 2, 9_500_000),
                    record("Axium Crisis", 2, 9_800_000),
                ],
            })
            .unwrap()
    }

    #[test]
    fn test_insert_before_initialized_is_noop() {
        let state = BoardState::new()
            .apply(BoardEvent::Inserted {
                game: GameKind::Chunithm,
                record: record("Garakuta Doll Play", 3, 1_000_000),
            })
            .unwrap();
        assert_eq!(state, BoardState::new());
    }

    #[test]
    fn test_insert_appends() {
        let state = loaded()
            .apply(BoardEvent::Inserted {
                game: GameKind::Arcaea,
                record: record("Ignotus", 2, 9_900_000),
            })
            .unwrap();
        let names: Vec<&str> = state
            .records(GameKind::Arcaea)
            .unwrap()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["Grievous Lady", "Axium Crisis", "Ignotus"]);
        assert!(state.records(GameKind::Chunithm).is_none());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let state = loaded()
            .apply(BoardEvent::Updated {
                game: GameKind::Arcaea,
                record: record("Grievous Lady", 2, 9_700_000),
            })
            .unwrap();
        let records = state.records(GameKind::Arcaea).unwrap();
        assert_eq!(records[0].score, 9_700_000);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_remove_by_key() {
        let state = loaded()
            .apply(BoardEvent::Removed {
                game: GameKind::Arcaea,
                record: record("Grievous Lady", 2, 0),
            })
            .unwrap();
        let records = state.records(GameKind::Arcaea).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Axium Crisis");
    }

    #[test]
    fn test_missing_key_is_error() {
        let result = loaded().apply(BoardEvent::Updated {
            game: GameKind::Arcaea,
            record: record("Grievous Lady", 3, 9_700_000),
        });
        assert!(matches!(result, Err(Error::RecordNotFound(_))));

        let result = BoardState::new().apply(BoardEvent::Removed {
            game: GameKind::Chunithm,
            record: record("Garakuta Doll Play", 3, 0),
        });
        assert!(matches!(result, Err(Error::RecordNotFound(_))));
    }
}
