//! Configuration file and defaults.
//!
//! ```toml
//! [store]
//! data_dir = "/home/me/.local/share/scorebook"
//! pool_size = 4
//! timeout_secs = 20
//!
//! [edit]
//! reselect = "primary-key"
//! ```
//!
//! Missing sections and keys fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::game::GameKind;
use crate::schema::EditReselect;

/// Store defaults.
pub mod store {
    use std::time::Duration;

    /// Connections opened per game database.
    pub const DEFAULT_POOL_SIZE: usize = 4;

    /// Connection checkout and busy timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

    /// Directory name under the platform data directory.
    pub const APP_DIR: &str = "scorebook";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub edit: EditConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub pool_size: usize,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            pool_size: store::DEFAULT_POOL_SIZE,
            timeout_secs: store::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn database_path(&self, game: GameKind) -> PathBuf {
        self.data_dir.join(game.database_file())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    pub reselect: EditReselect,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(store::APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if given and present, defaults otherwise.
    ///
    /// A file that exists but fails to parse is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let config = Self::load(path)?;
                info!("Loaded config from {:?}", path);
                Ok(config)
            }
            Some(path) => {
                warn!("Config file {:?} not found, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(config.data_dir.ends_with("scorebook") || config.data_dir == Path::new("."));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(
            r#"
            [store]
            data_dir = "/tmp/scores"

            [edit]
            reselect = "written-values"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.data_dir, PathBuf::from("/tmp/scores"));
        assert_eq!(config.store.pool_size, store::DEFAULT_POOL_SIZE);
        assert_eq!(config.edit.reselect, EditReselect::WrittenValues);
        assert_eq!(
            config.store.database_path(GameKind::Chunithm),
            PathBuf::from("/tmp/scores/chunithm.db")
        );
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(Config::parse("[store]\npool_size = \"many\"").is_err());
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load_or_default(Some(&missing)).unwrap(), Config::default());

        let present = dir.path().join("config.toml");
        fs::write(&present, "[store]\ntimeout_secs = 5\n").unwrap();
        let config = Config::load_or_default(Some(&present)).unwrap();
        assert_eq!(config.store.timeout(), Duration::from_secs(5));
    }
}
