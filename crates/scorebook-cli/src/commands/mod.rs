//! CLI command implementations.

pub mod add;
pub mod best;
pub mod edit;
pub mod export;
pub mod list;
pub mod remove;
pub mod serve;
