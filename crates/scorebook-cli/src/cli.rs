//! CLI argument definitions for scorebook.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scorebook")]
#[command(about = "Arcaea / Chunithm score tracker", version)]
pub struct Args {
    /// Config file (TOML)
    #[arg(long, value_name = "FILE", env = "SCOREBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the per-game databases
    #[arg(long, value_name = "DIR", env = "SCOREBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the score table
    List {
        /// arcaea or chunithm
        game: String,
        /// Sort column (name, difficulty, score, constant, rank, rating, updated_at)
        #[arg(long, short, default_value = "name")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Page number, starting at 1
        #[arg(long, short, default_value = "1")]
        page: usize,
        /// Rows per page (10, 30 or 100)
        #[arg(long, default_value = "10")]
        per_page: usize,
    },
    /// Register a new score
    Add {
        game: String,
        /// Song name
        name: String,
        /// Difficulty index or name (e.g. 2, FUTURE, MASTER)
        difficulty: String,
        score: u32,
        /// Chart constant
        constant: f64,
    },
    /// Overwrite the score and constant of an existing row
    Edit {
        game: String,
        name: String,
        difficulty: String,
        score: u32,
        constant: f64,
    },
    /// Delete a score row
    Remove {
        game: String,
        name: String,
        difficulty: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show the best rate (average of the top 30 ratings)
    Best {
        game: String,
    },
    /// Export the score table
    Export {
        game: String,
        /// Output file path (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, short, value_enum, default_value = "tsv")]
        format: ExportFormat,
    },
    /// Answer line-delimited JSON requests on stdin
    Serve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Tsv,
    Json,
}
