//! # scorebook-core
//!
//! Core library for the scorebook rhythm game score tracker.
//!
//! This crate provides:
//! - A schema-driven score repository over a relational store (SQLite bundled)
//! - Rank buckets and rating curves for Arcaea and Chunithm
//! - A sortable, paginated score board with best-rate aggregation
//! - A JSON request/response bridge and TSV/JSON export

pub mod board;
pub mod bridge;
pub mod config;
pub mod error;
pub mod export;
pub mod game;
pub mod repository;
pub mod schema;
pub mod score;
pub mod store;

// Re-export from board module
pub use board::{
    BoardEvent, BoardState, Column, ROWS_PER_PAGE, ScoreBoard, ScoreEntry, SortOrder, SortState,
};

// Re-export from bridge module
pub use bridge::{Bridge, BridgeRequest, BridgeResponse, Channel, Verb};

// Re-export from config module
pub use config::Config;

// Re-export from error module
pub use error::{Error, Result};

// Re-export from export module
pub use export::{export_json, export_tsv, generate_json, generate_tsv};

// Re-export from game module
pub use game::{
    ArcaeaDifficulty, ChartKey, ChunithmDifficulty, GameKind, ScoreQuery, ScoreRecord,
};

// Re-export from repository module
pub use repository::{GameRepository, ScoreRepository};

// Re-export from schema module
pub use schema::{EditReselect, FieldKind, Fields, Query, Record, SchemaDescriptor, Value};

// Re-export from score module
pub use score::{ArcaeaRank, ChunithmRank, Rank, best_rate, truncate};

// Re-export from store module
pub use store::{SqliteStore, Store};
