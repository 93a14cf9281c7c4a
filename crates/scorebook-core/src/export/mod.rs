//! Score board export (TSV and JSON formats)

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::board::{Column, ScoreBoard, ScoreEntry, SortOrder, SortState};
use crate::error::Result;
use crate::game::GameKind;
use crate::schema::DATE_FORMAT;

/// Board data for JSON export
#[derive(Debug, Serialize)]
pub struct ExportDataJson<'a> {
    pub game: GameKind,
    pub best_rate: Option<f64>,
    pub entries: &'a [ScoreEntry],
}

pub fn format_tsv_header(game: GameKind) -> String {
    [
        "Name",
        "Difficulty",
        "Score",
        "Constant",
        "Rank",
        game.rating_name(),
        "Updated At",
    ]
    .join("\t")
}

fn format_tsv_line(game: GameKind, entry: &ScoreEntry) -> String {
    let difficulty = game
        .difficulty_name(entry.difficulty)
        .map(str::to_string)
        .unwrap_or_else(|| entry.difficulty.to_string());
    [
        entry.name.clone(),
        difficulty,
        entry.score.to_string(),
        entry.constant.to_string(),
        entry.rank.to_string(),
        entry.rating.to_string(),
        entry.updated_at.format(DATE_FORMAT).to_string(),
    ]
    .join("\t")
}

fn by_rating(board: &ScoreBoard) -> ScoreBoard {
    let mut sorted = board.clone();
    sorted.sort(SortState::new(Column::Rating, SortOrder::Desc));
    sorted
}

/// Header plus one line per entry, highest rating first
pub fn generate_tsv(board: &ScoreBoard) -> String {
    let sorted = by_rating(board);
    let mut lines = vec![format_tsv_header(board.game())];
    lines.extend(
        sorted
            .entries()
            .iter()
            .map(|entry| format_tsv_line(board.game(), entry)),
    );
    lines.join("\n")
}

pub fn generate_json(board: &ScoreBoard) -> Result<String> {
    let sorted = by_rating(board);
    let data = ExportDataJson {
        game: board.game(),
        best_rate: board.best_rate(),
        entries: sorted.entries(),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

pub fn export_tsv<P: AsRef<Path>>(path: P, board: &ScoreBoard) -> Result<()> {
    fs::write(path, generate_tsv(board))?;
    Ok(())
}

pub fn export_json<P: AsRef<Path>>(path: P, board: &ScoreBoard) -> Result<()> {
    fs::write(path, generate_json(board)?)?;
    Ok(())
}
