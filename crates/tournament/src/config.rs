//! Tournament roster configuration
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! name = "depth ladder"
//! output_dir = "boards"
//! move_timeout_ms = 30000
//!
//! [renderer]
//! kind = "command"
//! command = "python3"
//! args = ["drawBoard.py"]
//!
//! [[engines]]
//! id = "bot1depth4"
//! command = "./getBot1Move"
//! args = ["--depth=4"]
//! ```

use chess_core::{Dialect, PieceCase};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::match_runner::{EngineFailurePolicy, MatchConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("the roster lists no engines")]
    EmptyRoster,
    #[error("engine id {0:?} appears more than once")]
    DuplicateEngine(String),
    #[error("engine id {0:?} must be non-empty and use only letters, digits, '-', '_' or '.'")]
    InvalidEngineId(String),
    #[error("move_timeout_ms must be positive")]
    ZeroTimeout,
    #[error("max_plies must be positive")]
    ZeroPlyLimit,
}

/// One participant: how to invoke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEntry {
    pub id: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Terminal image viewer fed with the rendered board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub command: String,
    #[serde(default = "default_display_width")]
    pub width: u32,
    #[serde(default = "default_display_height")]
    pub height: u32,
}

fn default_display_width() -> u32 {
    1366
}

fn default_display_height() -> u32 {
    768
}

fn default_image_extension() -> String {
    "png".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RendererConfig {
    /// ASCII diagram written to `<artifact>.txt`.
    #[default]
    Text,
    /// External drawing program invoked as `<command> <args...> <dest> <board>`.
    Command {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_image_extension")]
        extension: String,
        #[serde(default)]
        display: Option<DisplayConfig>,
    },
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentConfig {
    pub name: String,
    /// Where per-pairing board artifacts are written.
    pub output_dir: PathBuf,
    /// JSON results file, rewritten after every pairing.
    pub results_file: Option<PathBuf>,
    pub move_timeout_ms: u64,
    pub max_plies: u32,
    pub repetition_limit: u32,
    pub dialect: Dialect,
    pub piece_case: PieceCase,
    pub on_engine_failure: EngineFailurePolicy,
    pub verbose: bool,
    pub renderer: RendererConfig,
    pub engines: Vec<EngineEntry>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        let game = MatchConfig::default();
        Self {
            name: "Round robin".to_string(),
            output_dir: PathBuf::from("."),
            results_file: None,
            move_timeout_ms: 30_000,
            max_plies: game.max_plies,
            repetition_limit: game.repetition_limit,
            dialect: game.dialect,
            piece_case: game.piece_case,
            on_engine_failure: game.on_engine_failure,
            verbose: game.verbose,
            renderer: RendererConfig::default(),
            engines: Vec::new(),
        }
    }
}

impl TournamentConfig {
    /// Read and validate a TOML roster file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TournamentConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engines.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.move_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_plies == 0 {
            return Err(ConfigError::ZeroPlyLimit);
        }

        let mut seen = HashSet::new();
        for entry in &self.engines {
            if !is_file_safe(&entry.id) {
                return Err(ConfigError::InvalidEngineId(entry.id.clone()));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::DuplicateEngine(entry.id.clone()));
            }
        }
        Ok(())
    }

    pub fn move_timeout(&self) -> Duration {
        Duration::from_millis(self.move_timeout_ms)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            max_plies: self.max_plies,
            repetition_limit: self.repetition_limit,
            dialect: self.dialect,
            piece_case: self.piece_case,
            on_engine_failure: self.on_engine_failure,
            verbose: self.verbose,
        }
    }
}

/// Ids end up in artifact file names.
fn is_file_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && id != "."
        && id != ".."
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
