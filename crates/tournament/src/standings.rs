//! Points table derived from tournament results

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::results::{PairingOutcome, TournamentResults};

/// Points for a won game
pub const WIN_POINTS: u32 = 3;

/// Points for a drawn game
pub const DRAW_POINTS: u32 = 1;

/// Per-engine tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl EngineRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn points(&self) -> u32 {
        self.wins * WIN_POINTS + self.draws * DRAW_POINTS
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standings {
    records: HashMap<String, EngineRecord>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every finished pairing. Engines without games still get a row.
    ///
    /// A self-pairing counts once per side: a won self-game is one win and
    /// one loss for the same engine.
    pub fn from_results(results: &TournamentResults) -> Self {
        let mut standings = Self::new();
        for id in &results.participants {
            standings.records.entry(id.clone()).or_default();
        }
        for entry in &results.matches {
            standings.record(&entry.pairing.white, &entry.pairing.black, entry.outcome);
        }
        standings
    }

    /// Add one game between `white` and `black`.
    pub fn record(&mut self, white: &str, black: &str, outcome: PairingOutcome) {
        let (white_delta, black_delta) = match outcome {
            PairingOutcome::FirstWins => ((1, 0, 0), (0, 1, 0)),
            PairingOutcome::SecondWins => ((0, 1, 0), (1, 0, 0)),
            PairingOutcome::Draw => ((0, 0, 1), (0, 0, 1)),
        };
        self.apply(white, white_delta);
        self.apply(black, black_delta);
    }

    fn apply(&mut self, id: &str, (wins, losses, draws): (u32, u32, u32)) {
        let record = self.records.entry(id.to_string()).or_default();
        record.wins += wins;
        record.losses += losses;
        record.draws += draws;
    }

    pub fn get(&self, id: &str) -> Option<&EngineRecord> {
        self.records.get(id)
    }

    /// Sorted by points, then wins, then id.
    pub fn leaderboard(&self) -> Vec<(String, EngineRecord)> {
        let mut entries: Vec<_> = self
            .records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();
        entries.sort_by(|a, b| {
            b.1.points()
                .cmp(&a.1.points())
                .then(b.1.wins.cmp(&a.1.wins))
                .then(a.0.cmp(&b.0))
        });
        entries
    }

    /// Print leaderboard to stdout
    pub fn print_leaderboard(&self) {
        println!("\n=== Standings ===");
        println!(
            "{:<30} {:>6} {:>6} {:>6} {:>6} {:>6}",
            "Engine", "Points", "Won", "Drawn", "Lost", "Games"
        );
        println!("{}", "-".repeat(66));
        for (id, record) in self.leaderboard() {
            println!(
                "{:<30} {:>6} {:>6} {:>6} {:>6} {:>6}",
                id,
                record.points(),
                record.wins,
                record.draws,
                record.losses,
                record.games()
            );
        }
        println!();
    }
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;
