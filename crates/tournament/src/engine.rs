//! Engine collaborators.
//!
//! An engine is an external program invoked once per move as
//! `<command> <args...> --play-white|--play-black <board-string>`. It prints
//! a single line holding its move and exits.

use async_trait::async_trait;
use chess_core::{MoveParseError, Side};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::config::EngineEntry;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("exited with {status}: {stderr}")]
    Exited { status: ExitStatus, stderr: String },
    #[error("no move within {0:?}")]
    Timeout(Duration),
    #[error("printed no move")]
    NoOutput,
    #[error(transparent)]
    InvalidMove(#[from] MoveParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Something that answers "what do you play here?".
#[async_trait]
pub trait MoveSource: Send {
    /// Roster identifier.
    fn id(&self) -> &str;

    /// Ask for a move on `board` with `side` to play. Returns the raw line.
    async fn request_move(&mut self, board: &str, side: Side) -> Result<String, EngineError>;
}

/// Creates a move source for each roster entry taking part in a game.
pub trait EngineLauncher: Send + Sync {
    fn launch(&self, entry: &EngineEntry) -> Box<dyn MoveSource>;
}

/// An engine run as a child process per move.
///
/// Every request is bounded by `timeout`. When the request future is
/// dropped, whether by the timeout or by the caller cancelling the run, the
/// child is killed.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    id: String,
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessEngine {
    pub fn new(entry: &EngineEntry, timeout: Duration) -> Self {
        Self {
            id: entry.id.clone(),
            command: entry.command.clone(),
            args: entry.args.clone(),
            timeout,
        }
    }
}

#[async_trait]
impl MoveSource for ProcessEngine {
    fn id(&self) -> &str {
        &self.id
    }

    async fn request_move(&mut self, board: &str, side: Side) -> Result<String, EngineError> {
        debug!(engine = %self.id, %side, board, "requesting move");

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(side.flag())
            .arg(board)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| EngineError::Timeout(self.timeout))??;

        if !output.status.success() {
            return Err(EngineError::Exited {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(EngineError::NoOutput)
    }
}

/// Launches roster entries as [`ProcessEngine`]s.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    pub timeout: Duration,
}

impl ProcessLauncher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl EngineLauncher for ProcessLauncher {
    fn launch(&self, entry: &EngineEntry) -> Box<dyn MoveSource> {
        Box::new(ProcessEngine::new(entry, self.timeout))
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
