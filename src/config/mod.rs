//! Configuration module - environment variables and the games definition file

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::error;

/// Process configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Path to the games definition file
    pub games_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            games_file: env::var("GAMES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("games.json")),
        }
    }
}

/// One match definition as it appears in the games file
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub display_name: String,
    pub max_players: usize,
    pub min_players: usize,
    pub world_name: String,
    /// Encoded as "X:<x>,Y:<y>,Z:<z>"
    pub lobby_point: String,
    #[serde(default)]
    pub spawn_points: Vec<String>,
    #[serde(default)]
    pub is_team_game: bool,
    #[serde(default)]
    pub normal_items: Vec<String>,
    #[serde(default)]
    pub rare_items: Vec<String>,
}

/// The games definition file: named match configurations
#[derive(Debug, Deserialize)]
pub struct GamesFile {
    pub games: BTreeMap<String, GameConfig>,
}

impl GamesFile {
    /// Read and parse the games file.
    ///
    /// A missing or syntactically broken file is fatal; per-entry problems
    /// (bad positions, unknown items, bad capacity) are handled downstream
    /// when each match is constructed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| {
            error!(path = %path.display(), %source, "Failed to read games file");
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        serde_json::from_str(&raw).map_err(|source| {
            error!(path = %path.display(), %source, "Failed to parse games file");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read games file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse games file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
