//! Configuration for the ranking service.
//!
//! ```rust
//! use ranking::config::{RankingConfig, StoreBackend};
//!
//! let config = RankingConfig::from_json_str(r#"{ "backend": "indexed", "default_top_limit": 25 }"#)?;
//! assert_eq!(config.backend, StoreBackend::Indexed);
//! assert_eq!(config.default_top_limit, 25);
//! assert_eq!(config.default_around_count, 5);
//! # Ok::<(), ranking::RankingError>(())
//! ```

use crate::error::{RankingError, Result};
use crate::store::{IndexedStore, MemoryStore, RankingStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_TOP_LIMIT: usize = 10;
pub const DEFAULT_AROUND_COUNT: usize = 5;

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Single lock, ranking recomputed on every read.
    #[default]
    Memory,
    /// Lock per leaderboard, ranking kept in an ordered index.
    Indexed,
}

impl StoreBackend {
    pub fn build(self) -> Arc<dyn RankingStore> {
        match self {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Indexed => Arc::new(IndexedStore::new()),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Indexed => write!(f, "indexed"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(StoreBackend::Memory),
            "indexed" => Ok(StoreBackend::Indexed),
            other => Err(RankingError::invalid_config(format!(
                "unknown backend '{other}' (expected 'memory' or 'indexed')"
            ))),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Store implementation.
    pub backend: StoreBackend,
    /// Entries returned by a top-N query that asks for 0.
    pub default_top_limit: usize,
    /// Window size used by a neighborhood query that asks for 0.
    pub default_around_count: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            default_top_limit: DEFAULT_TOP_LIMIT,
            default_around_count: DEFAULT_AROUND_COUNT,
        }
    }
}

impl RankingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_top_limit(mut self, limit: usize) -> Self {
        self.default_top_limit = limit;
        self
    }

    pub fn with_around_count(mut self, count: usize) -> Self {
        self.default_around_count = count;
        self
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RankingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_top_limit == 0 {
            return Err(RankingError::invalid_config(
                "default_top_limit must be positive",
            ));
        }
        if self.default_around_count == 0 {
            return Err(RankingError::invalid_config(
                "default_around_count must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RankingConfig::default();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.default_top_limit, 10);
        assert_eq!(config.default_around_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = RankingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RankingConfig::default());
    }

    #[test]
    fn test_rejects_zero_defaults() {
        let result = RankingConfig::from_json_str(r#"{ "default_around_count": 0 }"#);
        assert!(matches!(result, Err(RankingError::InvalidConfig(_))));

        let config = RankingConfig::new().with_top_limit(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let result = RankingConfig::from_json_str(r#"{ "backend": "redis" }"#);
        assert!(matches!(result, Err(RankingError::Serde(_))));

        assert!("redis".parse::<StoreBackend>().is_err());
        assert_eq!("indexed".parse::<StoreBackend>().unwrap(), StoreBackend::Indexed);
        assert_eq!(StoreBackend::Indexed.to_string(), "indexed");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "backend": "indexed", "default_around_count": 7 }}"#).unwrap();

        let config = RankingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.backend, StoreBackend::Indexed);
        assert_eq!(config.default_around_count, 7);
        assert_eq!(config.default_top_limit, 10);
    }

    #[test]
    fn test_missing_file() {
        let result = RankingConfig::from_file("/nonexistent/ranking.json");
        assert!(matches!(result, Err(RankingError::Io(_))));
    }

    #[test]
    fn test_backend_builds_store() {
        for backend in [StoreBackend::Memory, StoreBackend::Indexed] {
            let store = backend.build();
            store.update_score("board", "alice", 1, crate::Timestamp::from_nanos(1));
            assert_eq!(store.player_count("board"), 1);
        }
    }
}
