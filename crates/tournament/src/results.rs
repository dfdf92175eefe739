//! Tournament results storage and reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TournamentError;
use crate::match_runner::{GameResult, Termination};

/// One ordered combination of engines: `white` moves first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub white: String,
    pub black: String,
}

impl Pairing {
    pub fn new(white: &str, black: &str) -> Self {
        Self {
            white: white.to_string(),
            black: black.to_string(),
        }
    }
}

/// Outcome of a pairing from the pairing's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl From<GameResult> for PairingOutcome {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::WhiteWins => PairingOutcome::FirstWins,
            GameResult::BlackWins => PairingOutcome::SecondWins,
            GameResult::Draw => PairingOutcome::Draw,
        }
    }
}

impl PairingOutcome {
    /// Crosstable cell: `<` white won, `>` black won, `.` drawn.
    pub fn symbol(self) -> char {
        match self {
            PairingOutcome::FirstWins => '<',
            PairingOutcome::SecondWins => '>',
            PairingOutcome::Draw => '.',
        }
    }
}

/// A single finished pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    #[serde(flatten)]
    pub pairing: Pairing,
    pub outcome: PairingOutcome,
    pub termination: Termination,
    pub plies: u32,
}

impl MatchEntry {
    /// Line announcing the outcome, e.g. `Tournament: a vs b, winner: a`.
    pub fn announcement(&self) -> String {
        let Pairing { white, black } = &self.pairing;
        match self.outcome {
            PairingOutcome::FirstWins => format!("Tournament: {white} vs {black}, winner: {white}"),
            PairingOutcome::SecondWins => format!("Tournament: {white} vs {black}, winner: {black}"),
            PairingOutcome::Draw => format!("Tournament: {white} vs {black}, draw."),
        }
    }
}

/// Complete tournament results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the tournament
    pub name: String,
    pub started_at: DateTime<Utc>,
    /// Participating engines, in roster order
    pub participants: Vec<String>,
    /// Finished pairings, at most one entry each
    pub matches: Vec<MatchEntry>,
    /// Pairings skipped because their artifact already existed
    pub skipped: Vec<Pairing>,
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            started_at: Utc::now(),
            participants,
            matches: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Record a finished pairing. Entries are never overwritten: returns
    /// `false` and keeps the stored entry when the pairing already has one.
    pub fn add_match(&mut self, entry: MatchEntry) -> bool {
        self.skipped.retain(|p| *p != entry.pairing);
        if self.entry(&entry.pairing).is_some() {
            return false;
        }
        self.matches.push(entry);
        true
    }

    /// Note a pairing that was not played in this run.
    pub fn add_skipped(&mut self, pairing: Pairing) {
        if self.entry(&pairing).is_none() && !self.skipped.contains(&pairing) {
            self.skipped.push(pairing);
        }
    }

    pub fn entry(&self, pairing: &Pairing) -> Option<&MatchEntry> {
        self.matches.iter().find(|m| m.pairing == *pairing)
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), TournamentError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| TournamentError::Results {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| TournamentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TournamentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| TournamentError::Results {
            path: path.to_path_buf(),
            source,
        })
    }

    /// White engines down the side, black engines across the top.
    /// `-` marks pairings without a recorded result.
    pub fn crosstable(&self) -> String {
        let width = self.participants.iter().map(String::len).max().unwrap_or(0);
        let mut out = String::new();
        for white in &self.participants {
            out.push_str(&format!("{white:<width$} "));
            for black in &self.participants {
                let cell = self
                    .entry(&Pairing::new(white, black))
                    .map(|m| m.outcome.symbol())
                    .unwrap_or('-');
                out.push(cell);
            }
            out.push('\n');
        }
        out
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Started: {}\n\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<20} vs {:<20} {:>8} {:>14} {:>6}\n",
            "White", "Black", "Outcome", "Termination", "Plies"
        ));
        report.push_str(&"-".repeat(74));
        report.push('\n');

        for entry in &self.matches {
            let outcome = match entry.outcome {
                PairingOutcome::FirstWins => "1-0",
                PairingOutcome::SecondWins => "0-1",
                PairingOutcome::Draw => "1/2",
            };
            report.push_str(&format!(
                "{:<20} vs {:<20} {:>8} {:>14} {:>6}\n",
                entry.pairing.white,
                entry.pairing.black,
                outcome,
                format!("{:?}", entry.termination),
                entry.plies
            ));
        }

        if !self.skipped.is_empty() {
            report.push_str(&format!("\nSkipped (artifact present): {}\n", self.skipped.len()));
        }

        report.push_str("\nCrosstable:\n");
        report.push_str(&self.crosstable());
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
