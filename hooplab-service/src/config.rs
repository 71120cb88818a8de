//! CLI configuration — where the data lives and how pages are sized.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feed::{DEFAULT_MOST_LIKED_LIMIT, DEFAULT_NEWEST_LIMIT};
use crate::lfg::DEFAULT_POST_TTL_MINUTES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// TOML-loadable settings. Every field has a default so a partial (or
/// absent) config file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoopLabConfig {
    /// Directory holding the JSON collections.
    pub data_dir: PathBuf,
    /// Where the signed-in session is persisted.
    pub session_file: PathBuf,
    pub most_liked_limit: usize,
    pub newest_limit: usize,
    /// LFG posts older than this are purged on the next board read.
    pub lfg_ttl_minutes: i64,
}

impl Default for HoopLabConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("hooplab-data"),
            session_file: PathBuf::from("hooplab-data/session.json"),
            most_liked_limit: DEFAULT_MOST_LIKED_LIMIT,
            newest_limit: DEFAULT_NEWEST_LIMIT,
            lfg_ttl_minutes: DEFAULT_POST_TTL_MINUTES,
        }
    }
}

impl HoopLabConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
