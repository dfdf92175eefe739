use super::*;

fn shell_engine(script: &str, timeout: Duration) -> ProcessEngine {
    // `sh -c <script>` receives the side flag as $0 and the board as $1.
    let entry = EngineEntry {
        id: "shell".to_string(),
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
    };
    ProcessEngine::new(&entry, timeout)
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_engine_returns_first_line() {
    let mut engine = shell_engine("echo Pe2e4; echo ignored", Duration::from_secs(5));
    let line = engine.request_move("8/8/8/8/8/8/8/8", Side::White).await.unwrap();
    assert_eq!(line, "Pe2e4");
    assert_eq!(engine.id(), "shell");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_engine_passes_side_and_board() {
    let mut engine = shell_engine("echo \"$0 $1\"", Duration::from_secs(5));
    let line = engine
        .request_move("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Side::Black)
        .await
        .unwrap();
    assert_eq!(line, "--play-black rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_engine_times_out() {
    let mut engine = shell_engine("sleep 5; echo Pe2e4", Duration::from_millis(100));
    let err = engine.request_move("8", Side::White).await.unwrap_err();
    assert!(matches!(err, EngineError::Timeout(_)), "{err}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_engine_reports_failed_exit() {
    let mut engine = shell_engine("echo broken >&2; exit 3", Duration::from_secs(5));
    let err = engine.request_move("8", Side::White).await.unwrap_err();
    match err {
        EngineError::Exited { status, stderr } => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "broken");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_engine_without_output() {
    let mut engine = shell_engine("true", Duration::from_secs(5));
    let err = engine.request_move("8", Side::White).await.unwrap_err();
    assert!(matches!(err, EngineError::NoOutput));
}

#[tokio::test]
async fn test_missing_executable_is_spawn_error() {
    let entry = EngineEntry {
        id: "ghost".to_string(),
        command: "./definitely-not-an-engine".to_string(),
        args: Vec::new(),
    };
    let mut engine = ProcessLauncher::new(Duration::from_secs(1)).launch(&entry);
    let err = engine.request_move("8", Side::White).await.unwrap_err();
    assert!(matches!(err, EngineError::Spawn { .. }));
}
