//! Game loop between two engine collaborators

use chess_core::{Board, Dialect, Move, MoveApplier, PieceCase, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::engine::{EngineError, MoveSource};
use crate::error::TournamentError;
use crate::render::Renderer;

/// What to do when an engine crashes, times out or prints garbage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineFailurePolicy {
    /// Stop the whole tournament.
    #[default]
    Abort,
    /// Score the game as lost for the failing engine and carry on.
    Forfeit,
}

/// Configuration for a single game
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// The game is drawn once the ply counter exceeds this
    pub max_plies: u32,
    /// A board seen more often than this before is a draw
    pub repetition_limit: u32,
    /// Board string dialect handed to engines
    pub dialect: Dialect,
    pub piece_case: PieceCase,
    pub on_engine_failure: EngineFailurePolicy,
    /// Print every move to stdout
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 1000,
            repetition_limit: 10,
            dialect: Dialect::Ranked,
            piece_case: PieceCase::Exact,
            on_engine_failure: EngineFailurePolicy::Abort,
            verbose: true,
        }
    }
}

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::White => GameResult::WhiteWins,
            Side::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::WhiteWins => Some(Side::White),
            GameResult::BlackWins => Some(Side::Black),
            GameResult::Draw => None,
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    KingCaptured,
    Repetition,
    PlyLimit,
    Forfeit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    ToMove(Side),
    Terminal(GameResult),
}

/// Counts how often each board has been seen, keyed by fingerprint.
#[derive(Debug, Clone, Default)]
pub struct RepetitionCounter {
    counts: HashMap<u64, u32>,
}

impl RepetitionCounter {
    /// Record one more occurrence and return how often it was seen before.
    pub fn record(&mut self, board: &Board) -> u32 {
        let count = self.counts.entry(board.fingerprint()).or_insert(0);
        let prior = *count;
        *count += 1;
        prior
    }

    pub fn occurrences(&self, board: &Board) -> u32 {
        self.counts.get(&board.fingerprint()).copied().unwrap_or(0)
    }

    /// Number of distinct boards seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// State of one game in progress or finished.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub board: Board,
    pub plies: u32,
    pub moves: Vec<Move>,
    pub result: Option<GameResult>,
    pub termination: Option<Termination>,
    repetitions: RepetitionCounter,
}

impl GameRecord {
    pub fn new(board: Board) -> Self {
        let mut repetitions = RepetitionCounter::default();
        repetitions.record(&board);
        Self {
            board,
            plies: 0,
            moves: Vec::new(),
            result: None,
            termination: None,
            repetitions,
        }
    }

    pub fn repetitions(&self) -> &RepetitionCounter {
        &self.repetitions
    }

    fn finish(&mut self, result: GameResult, termination: Termination) -> GameState {
        self.result = Some(result);
        self.termination = Some(termination);
        GameState::Terminal(result)
    }

    /// Take the board produced by `mover`'s move and decide what comes next.
    fn advance(&mut self, next: Board, mv: Move, mover: Side, config: &MatchConfig) -> GameState {
        self.board = next;
        self.plies += 1;
        self.moves.push(mv);
        let prior = self.repetitions.record(&next);

        if !next.has_king(mover.other()) {
            self.finish(GameResult::won_by(mover), Termination::KingCaptured)
        } else if !next.has_king(mover) {
            self.finish(GameResult::won_by(mover.other()), Termination::KingCaptured)
        } else if prior > config.repetition_limit {
            self.finish(GameResult::Draw, Termination::Repetition)
        } else if self.plies > config.max_plies {
            self.finish(GameResult::Draw, Termination::PlyLimit)
        } else {
            GameState::ToMove(mover.other())
        }
    }
}

/// Where per-ply snapshots go before the game is over. The extension is kept
/// last so drawing programs still recognise the format.
pub fn partial_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.file_stem().unwrap_or_default().to_owned();
    name.push(".partial");
    if let Some(ext) = artifact.extension() {
        name.push(".");
        name.push(ext);
    }
    artifact.with_file_name(name)
}

/// Plays single games between two engines
pub struct MatchRunner {
    config: MatchConfig,
    applier: MoveApplier,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        let applier = MoveApplier::new(config.dialect, config.piece_case);
        Self { config, applier }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play one game from the starting position.
    ///
    /// Snapshots are rendered after every ply and the last one is moved onto
    /// `artifact` once the game is decided.
    pub async fn play_game(
        &self,
        white: &mut dyn MoveSource,
        black: &mut dyn MoveSource,
        renderer: &dyn Renderer,
        artifact: &Path,
    ) -> Result<GameRecord, TournamentError> {
        let mut record = GameRecord::new(Board::startpos());
        let mut state = GameState::ToMove(Side::White);
        let snapshot = partial_path(artifact);

        while let GameState::ToMove(side) = state {
            let engine: &mut dyn MoveSource = match side {
                Side::White => &mut *white,
                Side::Black => &mut *black,
            };
            let board_text = record.board.encode(self.config.dialect);

            let mv = match request(engine, &board_text, side).await {
                Ok(mv) => mv,
                Err(source) => match self.config.on_engine_failure {
                    EngineFailurePolicy::Abort => {
                        return Err(TournamentError::Engine {
                            engine: engine.id().to_string(),
                            source,
                        });
                    }
                    EngineFailurePolicy::Forfeit => {
                        warn!(engine = engine.id(), %side, error = %source, "engine forfeits");
                        state = record.finish(GameResult::won_by(side.other()), Termination::Forfeit);
                        break;
                    }
                },
            };

            if self.config.verbose {
                println!("{mv}");
            }
            debug!(engine = engine.id(), ply = record.plies + 1, %mv, "move");

            let next = self
                .applier
                .apply(&record.board, &mv)
                .map_err(|source| TournamentError::Validation {
                    engine: engine.id().to_string(),
                    mv,
                    ply: record.plies + 1,
                    source,
                })?;
            state = record.advance(next, mv, side, &self.config);

            let rendered = next.encode(self.config.dialect);
            if let Err(e) = renderer.render(&rendered, &snapshot).await {
                warn!(path = %snapshot.display(), error = %e, "rendering failed");
            }
        }

        info!(
            white = white.id(),
            black = black.id(),
            plies = record.plies,
            result = ?state,
            termination = ?record.termination,
            "game over"
        );
        finalize_artifact(&snapshot, artifact).await;
        Ok(record)
    }
}

async fn request(
    engine: &mut dyn MoveSource,
    board: &str,
    side: Side,
) -> Result<Move, EngineError> {
    let line = engine.request_move(board, side).await?;
    Ok(Move::parse(&line)?)
}

async fn finalize_artifact(snapshot: &Path, artifact: &Path) {
    match tokio::fs::rename(snapshot, artifact).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %artifact.display(), "no snapshot was rendered");
        }
        Err(e) => warn!(path = %artifact.display(), error = %e, "could not store artifact"),
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
