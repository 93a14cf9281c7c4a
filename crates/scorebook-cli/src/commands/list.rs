//! List command: one page of the score table.

use anyhow::{Result, anyhow, bail};
use scorebook_core::{Column, Config, ROWS_PER_PAGE, ScoreBoard, SortOrder, SortState};

use crate::cli_utils;
use crate::console;

pub fn run(
    config: &Config,
    game: &str,
    sort: &str,
    desc: bool,
    page: usize,
    per_page: usize,
) -> Result<()> {
    if !ROWS_PER_PAGE.contains(&per_page) {
        bail!("Rows per page must be one of {:?}", ROWS_PER_PAGE);
    }
    if page == 0 {
        bail!("Pages start at 1");
    }
    let column: Column = sort.parse().map_err(|_| {
        let known: Vec<&str> = Column::ALL.iter().map(Column::as_str).collect();
        anyhow!("Unknown sort column `{}` (one of {})", sort, known.join(", "))
    })?;
    let order = if desc { SortOrder::Desc } else { SortOrder::Asc };

    let repository = cli_utils::open_repository(config, game)?;
    let mut board = ScoreBoard::new(repository.game(), &repository.fetch_all()?);
    board.sort(SortState::new(column, order));

    println!("{}", console::format_board_page(&board, page - 1, per_page));
    Ok(())
}
