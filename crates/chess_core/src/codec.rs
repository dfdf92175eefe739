//! Board string encoding.
//!
//! A board string lists the 64 cells from a8 to h1. Letters are pieces and
//! digits `1`..`8` stand for that many consecutive empty cells. Two dialects
//! are produced:
//! - `Compact`: one flat run, e.g. `rnbqkbnrpppppppp8888PPPPPPPPRNBQKBNR`
//! - `Ranked`: ranks separated by `/`, e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`
//!
//! Decoding accepts both, plus spaces as single empty cells.

use crate::board::Board;
use crate::types::Piece;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const RANK_DELIMITER: char = '/';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Compact,
    #[default]
    Ranked,
}

/// Non-fatal problem found while decoding a board string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Character that is neither a piece, a run length nor a delimiter.
    UnknownSymbol { position: usize, symbol: char },
    /// Cell past the 64th; dropped.
    Overflow { position: usize, symbol: char },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::UnknownSymbol { position, symbol } => {
                write!(f, "unknown symbol {symbol:?} at offset {position}")
            }
            DecodeWarning::Overflow { position, symbol } => {
                write!(f, "cell {symbol:?} at offset {position} lies beyond the 64th cell")
            }
        }
    }
}

/// Decode a board string, logging every warning.
pub fn decode(text: &str) -> Board {
    let (board, warnings) = decode_with_warnings(text);
    for w in &warnings {
        warn!(board = text, "{w}");
    }
    board
}

/// Decode a board string and hand the warnings back to the caller.
///
/// Short inputs are padded with empty cells.
pub fn decode_with_warnings(text: &str) -> (Board, Vec<DecodeWarning>) {
    let mut board = Board::empty();
    let mut warnings = Vec::new();
    let mut cursor = 0usize;

    for (position, ch) in text.chars().enumerate() {
        if let Some(piece) = Piece::from_char(ch) {
            place(&mut board, &mut cursor, Some(piece), position, ch, &mut warnings);
        } else if let Some(run @ 1..=8) = ch.to_digit(10) {
            for _ in 0..run {
                place(&mut board, &mut cursor, None, position, ch, &mut warnings);
            }
        } else if ch == ' ' {
            place(&mut board, &mut cursor, None, position, ch, &mut warnings);
        } else if ch == RANK_DELIMITER {
            continue;
        } else {
            warnings.push(DecodeWarning::UnknownSymbol { position, symbol: ch });
        }
    }

    (board, warnings)
}

fn place(
    board: &mut Board,
    cursor: &mut usize,
    cell: Option<Piece>,
    position: usize,
    symbol: char,
    warnings: &mut Vec<DecodeWarning>,
) {
    match board.cells_mut().get_mut(*cursor) {
        Some(slot) => *slot = cell,
        None => warnings.push(DecodeWarning::Overflow { position, symbol }),
    }
    *cursor += 1;
}

/// Encode a board, collapsing empty runs into digits of at most 8.
pub fn encode(board: &Board, dialect: Dialect) -> String {
    let mut out = String::with_capacity(72);
    let mut run = 0u32;

    for (i, cell) in board.cells().iter().enumerate() {
        if dialect == Dialect::Ranked && i > 0 && i % 8 == 0 {
            flush_run(&mut out, &mut run);
            out.push(RANK_DELIMITER);
        }
        match cell {
            Some(piece) => {
                flush_run(&mut out, &mut run);
                out.push(piece.symbol());
            }
            None => run += 1,
        }
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut u32) {
    while *run > 0 {
        let chunk = (*run).min(8);
        out.push(char::from(b'0' + chunk as u8));
        *run -= chunk;
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;
