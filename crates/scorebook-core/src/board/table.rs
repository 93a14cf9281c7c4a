use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::game::{GameKind, ScoreRecord};
use crate::score::{Rank, best_rate};

/// Page sizes offered by the table
pub const ROWS_PER_PAGE: [usize; 3] = [10, 30, 100];

/// A score row joined with its rank and rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub name: String,
    pub difficulty: u8,
    pub score: u32,
    pub constant: f64,
    pub rank: Rank,
    pub rating: f64,
    pub updated_at: NaiveDateTime,
}

impl ScoreEntry {
    pub fn new(game: GameKind, record: &ScoreRecord) -> Self {
        Self {
            name: record.name.clone(),
            difficulty: record.difficulty,
            score: record.score,
            constant: record.constant,
            rank: game.rank(record.score),
            rating: game.rating(record.score, record.constant),
            updated_at: record.updated_at,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    Name,
    Difficulty,
    Score,
    Constant,
    Rank,
    Rating,
    UpdatedAt,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Name,
        Column::Difficulty,
        Column::Score,
        Column::Constant,
        Column::Rank,
        Column::Rating,
        Column::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    fn compare(&self, lhs: &ScoreEntry, rhs: &ScoreEntry) -> Ordering {
        match self {
            Self::Name => lhs.name.cmp(&rhs.name),
            Self::Difficulty => lhs.difficulty.cmp(&rhs.difficulty),
            Self::Score => lhs.score.cmp(&rhs.score),
            Self::Constant => lhs.constant.total_cmp(&rhs.constant),
            Self::Rank => lhs.rank.ordinal().cmp(&rhs.rank.ordinal()),
            Self::Rating => lhs.rating.total_cmp(&rhs.rating),
            Self::UpdatedAt => lhs.updated_at.cmp(&rhs.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Active sort column and direction of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Column,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: Column::Name,
            order: SortOrder::Asc,
        }
    }
}

impl SortState {
    pub fn new(column: Column, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Clicking the active ascending column flips it to descending; any
    /// other click sorts that column ascending.
    pub fn toggle(self, column: Column) -> Self {
        let order = if self.column == column && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Self { column, order }
    }

    pub fn compare(&self, lhs: &ScoreEntry, rhs: &ScoreEntry) -> Ordering {
        let ordering = self.column.compare(lhs, rhs);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Table view of one game's scores
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBoard {
    game: GameKind,
    entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new(game: GameKind, records: &[ScoreRecord]) -> Self {
        Self {
            game,
            entries: records.iter().map(|r| ScoreEntry::new(game, r)).collect(),
        }
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best rate over every entry, `None` when the board is empty
    pub fn best_rate(&self) -> Option<f64> {
        best_rate(self.entries.iter().map(|e| e.rating))
    }

    /// Stable sort of the entries
    pub fn sort(&mut self, sort: SortState) {
        self.entries.sort_by(|l, r| sort.compare(l, r));
    }

    /// Entries of the 0-based `page`; empty past the last page
    pub fn page(&self, page: usize, rows_per_page: usize) -> &[ScoreEntry] {
        let start = page.saturating_mul(rows_per_page).min(self.entries.len());
        let end = start.saturating_add(rows_per_page).min(self.entries.len());
        &self.entries[start..end]
    }

    pub fn page_count(&self, rows_per_page: usize) -> usize {
        if rows_per_page == 0 {
            return 0;
        }
        self.entries.len().div_ceil(rows_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DATE_FORMAT;

    fn record(name: &str, difficulty: u8, score: u32, constant: f64, at: &str) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            difficulty,
            score,
            constant,
            updated_at: NaiveDateTime::parse_from_str(at, DATE_FORMAT).unwrap(),
        }
    }

    fn board() -> ScoreBoard {
        ScoreBoard::new(
            GameKind::Arcaea,
            &[
                record("Tempestissimo", 3, 9_650_000, 11.5, "2024-02-01 10:00:00"),
                record("Alexandrite", 2, 10_001_000, 9.0, "2024-01-15 08:30:00"),
                record("Fracture Ray", 2, 9_200_000, 11.0, "2024-03-10 21:00:00"),
            ],
        )
    }

    fn names(entries: &[ScoreEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_entries_carry_rank_and_rating() {
        let board = board();
        let entry = &board.entries()[0];
        assert_eq!(entry.rank.short_name(), "AA");
        assert_eq!(entry.rating, 12.0);
    }

    #[test]
    fn test_sort_by_columns() {
        let mut board = board();
        board.sort(SortState::new(Column::Name, SortOrder::Asc));
        assert_eq!(names(board.entries()), ["Alexandrite", "Fracture Ray", "Tempestissimo"]);

        board.sort(SortState::new(Column::Rating, SortOrder::Desc));
        assert_eq!(names(board.entries()), ["Tempestissimo", "Alexandrite", "Fracture Ray"]);

        board.sort(SortState::new(Column::UpdatedAt, SortOrder::Asc));
        assert_eq!(names(board.entries()), ["Alexandrite", "Tempestissimo", "Fracture Ray"]);
    }

    #[test]
    fn test_toggle() {
        let sort = SortState::default();
        let sort = sort.toggle(Column::Name);
        assert_eq!(sort, SortState::new(Column::Name, SortOrder::Desc));
        let sort = sort.toggle(Column::Name);
        assert_eq!(sort, SortState::new(Column::Name, SortOrder::Asc));
        let sort = sort.toggle(Column::Score);
        assert_eq!(sort, SortState::new(Column::Score, SortOrder::Asc));
    }

    #[test]
    fn test_pagination() {
        let records: Vec<ScoreRecord> = (0..25)
            .map(|i| record(&format!("song {:02}", i), 0, 9_000_000, 8.0, "2024-01-01 00:00:00"))
            .collect();
        let mut board = ScoreBoard::new(GameKind::Arcaea, &records);
        board.sort(SortState::default());

        assert_eq!(board.page_count(10), 3);
        assert_eq!(board.page(0, 10).len(), 10);
        assert_eq!(board.page(2, 10).len(), 5);
        assert_eq!(board.page(2, 10)[0].name, "song 20");
        assert!(board.page(3, 10).is_empty());
        assert_eq!(board.page(0, 100).len(), 25);
    }

    #[test]
    fn test_best_rate() {
        // (12.0 + 11.0 + 10.0) / 3
        assert_eq!(board().best_rate(), Some(11.0));
        assert_eq!(ScoreBoard::new(GameKind::Chunithm, &[]).best_rate(), None);
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("updated_at".parse::<Column>().unwrap(), Column::UpdatedAt);
        assert_eq!(Column::Rating.as_str(), "rating");
    }
}
