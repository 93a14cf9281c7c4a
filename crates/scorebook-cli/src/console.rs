//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use scorebook_core::schema::DATE_FORMAT;
use scorebook_core::{GameKind, ScoreBoard, ScoreEntry, ScoreRecord};

/// `#rrggbb` to an RGB triple
fn parse_hex(code: &str) -> Option<(u8, u8, u8)> {
    let hex = code.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn colored(text: &str, code: Option<&str>) -> String {
    match code.and_then(parse_hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

fn difficulty_label(game: GameKind, difficulty: u8) -> String {
    game.difficulty_name(difficulty)
        .map(str::to_string)
        .unwrap_or_else(|| difficulty.to_string())
}

fn format_colored_difficulty(game: GameKind, difficulty: u8) -> String {
    colored(
        &difficulty_label(game, difficulty),
        game.difficulty_color(difficulty),
    )
}

fn format_entry_line(game: GameKind, entry: &ScoreEntry, name_width: usize) -> String {
    // Pad before coloring so ANSI codes don't skew the columns
    let difficulty = colored(
        &format!("{:<8}", difficulty_label(game, entry.difficulty)),
        game.difficulty_color(entry.difficulty),
    );
    let rank = colored(
        &format!("{:<4}", entry.rank.short_name()),
        Some(entry.rank.color_code()),
    );
    format!(
        "{:<name_width$}  {}  {:>9}  {:>6.1}  {}  {:>8.4}  {}",
        entry.name,
        difficulty,
        entry.score,
        entry.constant,
        rank,
        entry.rating,
        entry.updated_at.format(DATE_FORMAT).to_string().dimmed(),
        name_width = name_width,
    )
}

/// Render one page of the board with a header and footer
pub fn format_board_page(board: &ScoreBoard, page: usize, rows_per_page: usize) -> String {
    let game = board.game();
    let entries = board.page(page, rows_per_page);
    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut output = String::new();
    let header = format!(
        "{:<name_width$}  {:<8}  {:>9}  {:>6}  {:<4}  {:>8}  {}",
        "Name",
        "Diff",
        "Score",
        "Const",
        "Rank",
        game.rating_name(),
        "Updated",
        name_width = name_width,
    );
    let border = "━".repeat(header.chars().count());

    let _ = writeln!(output, "{}", header.bold());
    let _ = writeln!(output, "{}", border.dimmed());
    for entry in entries {
        let _ = writeln!(output, "{}", format_entry_line(game, entry, name_width));
    }
    let _ = writeln!(output, "{}", border.dimmed());
    let _ = write!(
        output,
        "Page {}/{} ({} rows)  {}: {}",
        page + 1,
        board.page_count(rows_per_page).max(1),
        board.len(),
        game.rating_name(),
        format_best_rate(board.best_rate()),
    );
    output
}

pub fn format_best_rate(best: Option<f64>) -> String {
    match best {
        Some(value) => format!("{:.4}", value).bold().to_string(),
        None => "-".dimmed().to_string(),
    }
}

/// One-line summary of a stored record
pub fn format_record(game: GameKind, record: &ScoreRecord) -> String {
    let rank = game.rank(record.score);
    format!(
        "{} [{}] {} {} ({} {:.4})",
        record.name.bold(),
        format_colored_difficulty(game, record.difficulty),
        record.score,
        colored(rank.short_name(), Some(rank.color_code())),
        game.rating_name(),
        game.rating(record.score, record.constant),
    )
}
