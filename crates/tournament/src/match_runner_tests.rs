use super::*;
use crate::render::{NullRenderer, TextRenderer};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Plays a fixed list of moves, cycling when `looping` is set.
struct Scripted {
    id: String,
    moves: VecDeque<String>,
    looping: bool,
    calls: usize,
    seen: Vec<(String, Side)>,
}

impl Scripted {
    fn new(id: &str, moves: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
            looping: false,
            calls: 0,
            seen: Vec::new(),
        }
    }

    fn looping(id: &str, moves: &[&str]) -> Self {
        Self {
            looping: true,
            ..Self::new(id, moves)
        }
    }
}

#[async_trait]
impl MoveSource for Scripted {
    fn id(&self) -> &str {
        &self.id
    }

    async fn request_move(&mut self, board: &str, side: Side) -> Result<String, EngineError> {
        self.calls += 1;
        self.seen.push((board.to_string(), side));
        let mv = self.moves.pop_front().ok_or(EngineError::NoOutput)?;
        if self.looping {
            self.moves.push_back(mv.clone());
        }
        Ok(format!("{mv}\n"))
    }
}

fn quiet() -> MatchConfig {
    MatchConfig {
        verbose: false,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_king_capture_ends_game_immediately() {
    // Scholar's mate, then the queen takes the king.
    let mut white = Scripted::new("w", &["Pe2e4", "Bf1c4", "Qd1h5", "Qh5f7", "Qf7e8"]);
    let mut black = Scripted::new("b", &["pe7e5", "nb8c6", "ng8f6", "pa7a6", "pa6a5"]);
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("board-w-b.txt");

    let runner = MatchRunner::new(quiet());
    let record = runner
        .play_game(&mut white, &mut black, &TextRenderer, &artifact)
        .await
        .unwrap();

    assert_eq!(record.result, Some(GameResult::WhiteWins));
    assert_eq!(record.termination, Some(Termination::KingCaptured));
    assert_eq!(record.plies, 9);
    assert_eq!(white.calls, 5);
    // No move was requested from the side that lost its king.
    assert_eq!(black.calls, 4);
    assert!(!record.board.has_king(Side::Black));

    assert!(artifact.exists());
    assert!(!partial_path(&artifact).exists());
}

#[tokio::test]
async fn test_engines_receive_board_and_side() {
    let mut white = Scripted::new("w", &["Pe2e4", "Qd1h5"]);
    let mut black = Scripted::new("b", &["pe7e5", "pa7a6"]);
    let runner = MatchRunner::new(MatchConfig {
        max_plies: 3,
        ..quiet()
    });

    let record = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap();

    assert_eq!(record.termination, Some(Termination::PlyLimit));
    assert_eq!(
        white.seen[0],
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(), Side::White)
    );
    assert_eq!(
        black.seen[0],
        ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR".to_string(), Side::Black)
    );
}

#[tokio::test]
async fn test_repetition_draw_on_eleventh_return() {
    let mut white = Scripted::looping("w", &["Ng1f3", "Nf3g1"]);
    let mut black = Scripted::looping("b", &["nb8c6", "nc6b8"]);

    let runner = MatchRunner::new(quiet());
    let record = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap();

    // The start board recurs every four plies; the 11th return is ply 44.
    assert_eq!(record.result, Some(GameResult::Draw));
    assert_eq!(record.termination, Some(Termination::Repetition));
    assert_eq!(record.plies, 44);
    assert_eq!(white.calls + black.calls, 44);
    assert_eq!(record.board, Board::startpos());
    assert_eq!(record.repetitions().occurrences(&Board::startpos()), 12);
    assert_eq!(record.repetitions().distinct(), 4);
}

#[tokio::test]
async fn test_repetition_limit_is_configurable() {
    let mut white = Scripted::looping("w", &["Ng1f3", "Nf3g1"]);
    let mut black = Scripted::looping("b", &["nb8c6", "nc6b8"]);

    let runner = MatchRunner::new(MatchConfig {
        repetition_limit: 2,
        ..quiet()
    });
    let record = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap();

    assert_eq!(record.termination, Some(Termination::Repetition));
    assert_eq!(record.plies, 12);
}

#[tokio::test]
async fn test_ply_limit_draw() {
    let mut white = Scripted::looping("w", &["Ng1f3", "Nf3g1"]);
    let mut black = Scripted::looping("b", &["nb8c6", "nc6b8"]);

    let runner = MatchRunner::new(MatchConfig {
        max_plies: 7,
        ..quiet()
    });
    let record = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap();

    assert_eq!(record.result, Some(GameResult::Draw));
    assert_eq!(record.termination, Some(Termination::PlyLimit));
    // Drawn once the counter goes past the cap.
    assert_eq!(record.plies, 8);
    assert_eq!(white.calls, 4);
    assert_eq!(black.calls, 4);
}

#[tokio::test]
async fn test_validation_error_aborts() {
    let mut white = Scripted::new("w", &["Pe2e4"]);
    let mut black = Scripted::new("b", &["Pe7e5"]);

    let runner = MatchRunner::new(quiet());
    let err = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap_err();

    match err {
        TournamentError::Validation { engine, ply, .. } => {
            assert_eq!(engine, "b");
            assert_eq!(ply, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_engine_failure_aborts_by_default() {
    let mut white = Scripted::new("w", &["Pe2e4"]);
    let mut black = Scripted::new("b", &[]);

    let runner = MatchRunner::new(quiet());
    let err = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap_err();

    assert!(matches!(err, TournamentError::Engine { ref engine, .. } if engine == "b"));
}

#[tokio::test]
async fn test_engine_failure_forfeits_when_configured() {
    let mut white = Scripted::new("w", &["Pe2e4"]);
    let mut black = Scripted::new("b", &["garbage"]);

    let runner = MatchRunner::new(MatchConfig {
        on_engine_failure: EngineFailurePolicy::Forfeit,
        ..quiet()
    });
    let record = runner
        .play_game(&mut white, &mut black, &NullRenderer, Path::new("unused"))
        .await
        .unwrap();

    assert_eq!(record.result, Some(GameResult::WhiteWins));
    assert_eq!(record.termination, Some(Termination::Forfeit));
    assert_eq!(record.plies, 1);
}

#[test]
fn test_partial_path() {
    assert_eq!(
        partial_path(Path::new("out/board-a-b.png")),
        PathBuf::from("out/board-a-b.partial.png")
    );
    assert_eq!(partial_path(Path::new("unused")), PathBuf::from("unused.partial"));
}

#[test]
fn test_repetition_counter_counts_prior_occurrences() {
    let mut counter = RepetitionCounter::default();
    let board = Board::startpos();
    assert_eq!(counter.record(&board), 0);
    assert_eq!(counter.record(&board), 1);
    assert_eq!(counter.occurrences(&board), 2);
    assert_eq!(counter.occurrences(&Board::empty()), 0);
}
