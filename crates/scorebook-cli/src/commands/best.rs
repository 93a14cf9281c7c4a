use anyhow::Result;
use scorebook_core::{Config, ScoreBoard};

use crate::cli_utils;
use crate::console;

pub fn run(config: &Config, game: &str) -> Result<()> {
    let repository = cli_utils::open_repository(config, game)?;
    let board = ScoreBoard::new(repository.game(), &repository.fetch_all()?);
    println!(
        "{} {}: {}",
        repository.game(),
        repository.game().rating_name(),
        console::format_best_rate(board.best_rate())
    );
    Ok(())
}
