use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse value `{0}`")]
    Parse(String),

    #[error("{operation}: expected exactly one row, found {found}")]
    Cardinality {
        operation: &'static str,
        found: usize,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Store connection timed out after {0:?}")]
    StoreTimeout(std::time::Duration),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Store(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.to_string())
    }
}
