//! Remove command: delete a score row after confirmation.

use anyhow::Result;
use scorebook_core::Config;

use crate::cli_utils;
use crate::console;

pub fn run(config: &Config, game: &str, name: &str, difficulty: &str, yes: bool) -> Result<()> {
    let repository = cli_utils::open_repository(config, game)?;
    let key = cli_utils::chart_key(repository.game(), name, difficulty)?;

    if !yes {
        let prompt = format!(
            "Remove {} [{}] from {}?",
            key.name,
            repository
                .game()
                .difficulty_name(key.difficulty)
                .unwrap_or("?"),
            repository.game()
        );
        if !cli_utils::confirm(&prompt)? {
            eprintln!("Cancelled");
            return Ok(());
        }
    }

    let record = repository.remove(&key)?;
    println!("Removed {}", console::format_record(repository.game(), &record));
    Ok(())
}
