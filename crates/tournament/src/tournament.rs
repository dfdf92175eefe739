//! Round-robin over the roster

use std::path::PathBuf;
use tracing::info;

use crate::config::{EngineEntry, TournamentConfig};
use crate::engine::EngineLauncher;
use crate::error::TournamentError;
use crate::match_runner::MatchRunner;
use crate::render::Renderer;
use crate::results::{MatchEntry, Pairing, TournamentResults};

/// Plays every ordered pairing of the roster, one game each, in sequence.
pub struct Tournament {
    config: TournamentConfig,
    launcher: Box<dyn EngineLauncher>,
    renderer: Box<dyn Renderer>,
}

impl Tournament {
    pub fn new(
        config: TournamentConfig,
        launcher: Box<dyn EngineLauncher>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            config,
            launcher,
            renderer,
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Every engine plays every engine, itself included, once with each
    /// colour. White varies slowest.
    pub fn pairings(&self) -> Vec<Pairing> {
        let engines = &self.config.engines;
        engines
            .iter()
            .flat_map(|white| engines.iter().map(move |black| Pairing::new(&white.id, &black.id)))
            .collect()
    }

    /// `<output_dir>/board-<white>-<black>.<ext>`
    pub fn artifact_path(&self, white: &str, black: &str) -> PathBuf {
        self.config.output_dir.join(format!(
            "board-{white}-{black}.{}",
            self.renderer.extension()
        ))
    }

    fn entry(&self, id: &str) -> Option<&EngineEntry> {
        self.config.engines.iter().find(|e| e.id == id)
    }

    /// Results accumulated so far: the configured results file if present,
    /// otherwise an empty ledger.
    fn initial_results(&self) -> Result<TournamentResults, TournamentError> {
        let participants: Vec<String> = self.config.engines.iter().map(|e| e.id.clone()).collect();
        match &self.config.results_file {
            Some(path) if path.exists() => {
                let mut results = TournamentResults::load(path)?;
                results.name = self.config.name.clone();
                results.participants = participants;
                results.skipped.clear();
                Ok(results)
            }
            _ => Ok(TournamentResults::new(&self.config.name, participants)),
        }
    }

    /// Play all pairings whose artifact does not exist yet.
    ///
    /// A move that does not fit the board stops the whole run, as does an
    /// engine failure unless failures are configured to forfeit.
    pub async fn run(&self) -> Result<TournamentResults, TournamentError> {
        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| TournamentError::Io {
                path: output_dir.clone(),
                source,
            })?;

        let mut results = self.initial_results()?;
        let runner = MatchRunner::new(self.config.match_config());
        let pairings = self.pairings();
        info!(
            name = %self.config.name,
            engines = self.config.engines.len(),
            pairings = pairings.len(),
            "starting tournament"
        );

        for pairing in pairings {
            let artifact = self.artifact_path(&pairing.white, &pairing.black);
            if artifact.exists() {
                info!(white = %pairing.white, black = %pairing.black, "artifact present, skipping");
                results.add_skipped(pairing);
                continue;
            }

            // Both ids come from the roster itself.
            let (Some(white_entry), Some(black_entry)) =
                (self.entry(&pairing.white), self.entry(&pairing.black))
            else {
                continue;
            };
            let mut white = self.launcher.launch(white_entry);
            let mut black = self.launcher.launch(black_entry);

            info!(white = %pairing.white, black = %pairing.black, "starting game");
            let record = runner
                .play_game(white.as_mut(), black.as_mut(), self.renderer.as_ref(), &artifact)
                .await?;

            let (Some(result), Some(termination)) = (record.result, record.termination) else {
                continue;
            };
            let entry = MatchEntry {
                pairing,
                outcome: result.into(),
                termination,
                plies: record.plies,
            };
            println!("{}", entry.announcement());
            let (white, black) = (entry.pairing.white.clone(), entry.pairing.black.clone());
            if !results.add_match(entry) {
                info!(%white, %black, "pairing already recorded, keeping the stored result");
            }

            if let Some(path) = &self.config.results_file {
                results.save(path)?;
            }
        }

        Ok(results)
    }
}
