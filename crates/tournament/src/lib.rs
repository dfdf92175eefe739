//! Round-robin tournament runner for external chess engines
//!
//! This crate provides infrastructure for:
//! - Playing one game per ordered pairing of a roster of engine programs
//! - Rendering the board after every ply to a per-pairing artifact
//! - Resuming an interrupted run by skipping pairings already drawn
//! - Reporting results and a points table
//!
//! # Usage
//!
//! ```bash
//! # Play the roster in tournament.toml
//! cargo run -p tournament
//!
//! # Play another roster, then show its stored results
//! cargo run -p tournament -- run ladder.toml
//! cargo run -p tournament -- report ladder.toml
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod match_runner;
pub mod render;
pub mod results;
pub mod standings;
pub mod tournament;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use match_runner::*;
pub use render::*;
pub use results::*;
pub use standings::*;
pub use tournament::*;
