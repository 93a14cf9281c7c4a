mod cli;
mod cli_utils;
mod commands;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries tables, exports and bridge responses
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scorebook=warn,scorebook_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli_utils::load_config(args.config.as_deref(), args.data_dir.as_deref())?;

    match args.command {
        Command::List {
            game,
            sort,
            desc,
            page,
            per_page,
        } => commands::list::run(&config, &game, &sort, desc, page, per_page),
        Command::Add {
            game,
            name,
            difficulty,
            score,
            constant,
        } => commands::add::run(&config, &game, &name, &difficulty, score, constant),
        Command::Edit {
            game,
            name,
            difficulty,
            score,
            constant,
        } => commands::edit::run(&config, &game, &name, &difficulty, score, constant),
        Command::Remove {
            game,
            name,
            difficulty,
            yes,
        } => commands::remove::run(&config, &game, &name, &difficulty, yes),
        Command::Best { game } => commands::best::run(&config, &game),
        Command::Export {
            game,
            output,
            format,
        } => commands::export::run(&config, &game, output.as_deref(), format),
        Command::Serve => commands::serve::run(&config),
    }
}
