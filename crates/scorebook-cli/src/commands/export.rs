//! Export command for the score table.

use std::path::Path;

use anyhow::Result;
use scorebook_core::{Config, ScoreBoard, generate_json, generate_tsv};

use crate::cli::ExportFormat;
use crate::cli_utils;

pub fn run(config: &Config, game: &str, output: Option<&Path>, format: ExportFormat) -> Result<()> {
    let repository = cli_utils::open_repository(config, game)?;
    let board = ScoreBoard::new(repository.game(), &repository.fetch_all()?);
    eprintln!("Loaded {} {} score entries", board.len(), repository.game());

    let content = match format {
        ExportFormat::Tsv => generate_tsv(&board),
        ExportFormat::Json => generate_json(&board)?,
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &content)?;
        eprintln!("Exported to: {}", output_path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}
