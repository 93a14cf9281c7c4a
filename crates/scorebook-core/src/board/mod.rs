//! Score board view model.
//!
//! - `ScoreBoard` - sortable, paginated table of one game's entries
//! - `BoardState` - loaded lists for both games, advanced by `BoardEvent`s

mod state;
mod table;

pub use state::*;
pub use table::*;
