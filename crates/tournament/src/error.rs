//! Errors that end a tournament run

use chess_core::{Move, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;

/// Everything here aborts the whole run, not just the current game.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// The board no longer matches what the engine believes it is playing on.
    #[error("{engine} played {mv} at ply {ply}: {source}")]
    Validation {
        engine: String,
        mv: Move,
        ply: u32,
        #[source]
        source: ValidationError,
    },

    #[error("engine {engine} failed: {source}")]
    Engine {
        engine: String,
        #[source]
        source: EngineError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to store results in {}: {source}", path.display())]
    Results {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
