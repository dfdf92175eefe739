//! Tournament CLI
//!
//! Play a roster of engine programs against each other and report results.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tournament::{render, ProcessLauncher, Standings, Tournament, TournamentConfig, TournamentResults};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "tournament.toml";

fn print_usage() {
    println!("Chess engine tournament runner");
    println!();
    println!("Usage:");
    println!("  tournament [CONFIG]          play every pairing not yet on disk");
    println!("  tournament run [CONFIG]      same as above");
    println!("  tournament report [CONFIG]   show stored results and standings");
    println!();
    println!("CONFIG defaults to {DEFAULT_CONFIG}.");
    println!("Set RUST_LOG (e.g. RUST_LOG=debug) for more detailed logs.");
    println!();
    println!("Examples:");
    println!("  tournament ladder.toml");
    println!("  tournament report ladder.toml");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_path(args: &[String]) -> PathBuf {
    PathBuf::from(args.first().map(String::as_str).unwrap_or(DEFAULT_CONFIG))
}

fn load_config(path: &Path) -> Result<TournamentConfig> {
    TournamentConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

async fn run_tournament(args: &[String]) -> Result<()> {
    let config = load_config(&config_path(args))?;
    let launcher = ProcessLauncher::new(config.move_timeout());
    let renderer = render::from_config(&config.renderer);
    let tournament = Tournament::new(config, Box::new(launcher), renderer);

    let results = tokio::select! {
        results = tournament.run() => results?,
        _ = tokio::signal::ctrl_c() => {
            // Dropping the run kills any engine still thinking.
            warn!("interrupted, stopping tournament");
            bail!("tournament interrupted");
        }
    };

    results.print_report();
    Standings::from_results(&results).print_leaderboard();
    Ok(())
}

fn show_report(args: &[String]) -> Result<()> {
    let config = load_config(&config_path(args))?;
    let Some(path) = &config.results_file else {
        bail!("no results_file configured in {}", config_path(args).display());
    };
    if !path.exists() {
        println!("No tournament data found. Run the tournament first!");
        return Ok(());
    }
    let results = TournamentResults::load(path)?;
    results.print_report();
    Standings::from_results(&results).print_leaderboard();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_tournament(&[]).await,
        Some("run") => run_tournament(&args[2..]).await,
        Some("report") => show_report(&args[2..]),
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(())
        }
        Some(_) => run_tournament(&args[1..]).await,
    }
}
