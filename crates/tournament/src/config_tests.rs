use super::*;

const ROSTER: &str = r#"
name = "depth ladder"
output_dir = "boards"
results_file = "boards/results.json"
move_timeout_ms = 5000
dialect = "compact"
piece_case = "ignore_case"
on_engine_failure = "forfeit"

[renderer]
kind = "command"
command = "python3"
args = ["drawBoard.py"]

[renderer.display]
command = "/usr/lib/w3m/w3mimgdisplay"

[[engines]]
id = "bot1depth4"
command = "./getBot1Move"
args = ["--depth=4"]

[[engines]]
id = "bot2depth5"
command = "./getBot2Move"
args = ["--depth=5"]
"#;

#[test]
fn test_parse_full_roster() {
    let config = TournamentConfig::from_toml_str(ROSTER).unwrap();

    assert_eq!(config.name, "depth ladder");
    assert_eq!(config.output_dir, PathBuf::from("boards"));
    assert_eq!(config.move_timeout(), Duration::from_secs(5));
    assert_eq!(config.dialect, Dialect::Compact);
    assert_eq!(config.piece_case, PieceCase::IgnoreCase);
    assert_eq!(config.on_engine_failure, EngineFailurePolicy::Forfeit);
    assert_eq!(config.engines.len(), 2);
    assert_eq!(config.engines[1].args, vec!["--depth=5".to_string()]);

    match &config.renderer {
        RendererConfig::Command {
            command,
            extension,
            display,
            ..
        } => {
            assert_eq!(command, "python3");
            assert_eq!(extension, "png");
            let display = display.as_ref().unwrap();
            assert_eq!((display.width, display.height), (1366, 768));
        }
        other => panic!("unexpected renderer {other:?}"),
    }
}

#[test]
fn test_defaults_apply() {
    let config = TournamentConfig::from_toml_str(
        r#"
[[engines]]
id = "solo"
command = "./engine"
"#,
    )
    .unwrap();

    assert_eq!(config.max_plies, 1000);
    assert_eq!(config.repetition_limit, 10);
    assert_eq!(config.dialect, Dialect::Ranked);
    assert_eq!(config.piece_case, PieceCase::Exact);
    assert_eq!(config.on_engine_failure, EngineFailurePolicy::Abort);
    assert_eq!(config.renderer, RendererConfig::Text);
    assert!(config.engines[0].args.is_empty());

    let game = config.match_config();
    assert_eq!(game.max_plies, 1000);
    assert_eq!(game.repetition_limit, 10);
}

#[test]
fn test_empty_roster_rejected() {
    let err = TournamentConfig::from_toml_str("name = \"nobody\"").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRoster));
}

#[test]
fn test_duplicate_ids_rejected() {
    let err = TournamentConfig::from_toml_str(
        r#"
[[engines]]
id = "twin"
command = "./a"

[[engines]]
id = "twin"
command = "./b"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateEngine(id) if id == "twin"));
}

#[test]
fn test_unsafe_ids_rejected() {
    for id in ["", "../escape", "with space", ".."] {
        let toml = format!("[[engines]]\nid = {id:?}\ncommand = \"./a\"\n");
        let err = TournamentConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEngineId(_)), "{id}: {err}");
    }
}

#[test]
fn test_zero_timeout_rejected() {
    let err = TournamentConfig::from_toml_str(
        "move_timeout_ms = 0\n[[engines]]\nid = \"a\"\ncommand = \"./a\"\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroTimeout));
}

#[test]
fn test_unknown_field_rejected() {
    let err = TournamentConfig::from_toml_str(
        "max_moves = 5\n[[engines]]\nid = \"a\"\ncommand = \"./a\"\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_missing_file() {
    let err = TournamentConfig::load(Path::new("/nonexistent/tournament.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
