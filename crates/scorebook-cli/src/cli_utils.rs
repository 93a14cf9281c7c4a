//! Common CLI utility functions shared across commands.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use scorebook_core::{ChartKey, Config, GameKind, GameRepository, ScoreQuery, SqliteStore};

/// Load the config file, then apply command-line overrides.
pub fn load_config(path: Option<&Path>, data_dir: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load config {:?}", path))?;
    if let Some(dir) = data_dir {
        config.store.data_dir = dir.to_path_buf();
    }
    Ok(config)
}

pub fn parse_game(input: &str) -> Result<GameKind> {
    input
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| anyhow!("Unknown game `{}` (expected arcaea or chunithm)", input))
}

pub fn parse_difficulty(game: GameKind, input: &str) -> Result<u8> {
    game.parse_difficulty(input)
        .ok_or_else(|| anyhow!("Unknown {} difficulty `{}`", game, input))
}

pub fn score_query(
    game: GameKind,
    name: &str,
    difficulty: &str,
    score: u32,
    constant: f64,
) -> Result<ScoreQuery> {
    Ok(ScoreQuery {
        name: name.to_string(),
        difficulty: parse_difficulty(game, difficulty)?,
        score,
        constant,
    })
}

pub fn chart_key(game: GameKind, name: &str, difficulty: &str) -> Result<ChartKey> {
    Ok(ChartKey::new(name, parse_difficulty(game, difficulty)?))
}

pub fn open_repository(config: &Config, game: &str) -> Result<GameRepository<SqliteStore>> {
    let game = parse_game(game)?;
    GameRepository::open(config, game)
        .with_context(|| format!("Failed to open {} database", game))
}

/// Ask a yes/no question on stderr; anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game() {
        assert_eq!(parse_game("Arcaea").unwrap(), GameKind::Arcaea);
        assert_eq!(parse_game("chunithm").unwrap(), GameKind::Chunithm);
        assert!(parse_game("maimai").is_err());
    }

    #[test]
    fn test_score_query_resolves_difficulty_name() {
        let query = score_query(GameKind::Chunithm, "Aleph-0", "master", 1_007_000, 14.0).unwrap();
        assert_eq!(query.difficulty, 3);
        assert!(score_query(GameKind::Arcaea, "Aleph-0", "MASTER", 1, 1.0).is_err());
    }

    #[test]
    fn test_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\ndata_dir = \"/from/file\"\npool_size = 2\n").unwrap();

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.store.data_dir, Path::new("/from/file"));

        let config = load_config(Some(&path), Some(dir.path())).unwrap();
        assert_eq!(config.store.data_dir, dir.path());
        assert_eq!(config.store.pool_size, 2);
    }
}
