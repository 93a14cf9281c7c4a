//! Add command: register a new score.

use anyhow::Result;
use scorebook_core::Config;

use crate::cli_utils;
use crate::console;

pub fn run(
    config: &Config,
    game: &str,
    name: &str,
    difficulty: &str,
    score: u32,
    constant: f64,
) -> Result<()> {
    let repository = cli_utils::open_repository(config, game)?;
    let query = cli_utils::score_query(repository.game(), name, difficulty, score, constant)?;
    let record = repository.insert(&query)?;
    println!("Added {}", console::format_record(repository.game(), &record));
    Ok(())
}
