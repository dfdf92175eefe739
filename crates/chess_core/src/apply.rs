//! Applying reported moves to a board.
//!
//! Moves are trusted: nothing checks chess legality. The only check is that
//! the declared piece actually stands on the source square, since a mismatch
//! means our board and the engine's view of it have drifted apart.

use crate::board::Board;
use crate::codec::{self, Dialect};
use crate::moves::{Move, MoveKind};
use crate::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the declared piece is compared against the source occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceCase {
    #[default]
    Exact,
    IgnoreCase,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("move declares {expected} on {square} but the board holds {}", describe_cell(.found))]
    PieceMismatch {
        square: Square,
        expected: Piece,
        found: Option<Piece>,
    },
}

fn describe_cell(cell: &Option<Piece>) -> String {
    match cell {
        Some(p) => p.to_string(),
        None => "nothing".to_string(),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MoveApplier {
    pub dialect: Dialect,
    pub piece_case: PieceCase,
}

impl MoveApplier {
    pub fn new(dialect: Dialect, piece_case: PieceCase) -> Self {
        Self { dialect, piece_case }
    }

    /// Apply `mv` to a copy of `board`.
    ///
    /// A castle also relocates the rook of the castling king's colour. Both
    /// relocations succeed together or the error is returned with `board`
    /// left as it was.
    pub fn apply(&self, board: &Board, mv: &Move) -> Result<Board, ValidationError> {
        let mut next = *board;
        let moved = self.relocate(&mut next, mv)?;

        // Under IgnoreCase the declared case says nothing about colour, so the
        // king actually standing on the source square decides.
        let castle = match (mv.kind, self.piece_case) {
            (MoveKind::Promotion(_), _) => None,
            (_, PieceCase::Exact) => Some(*mv),
            (_, PieceCase::IgnoreCase) => Some(Move::new(moved, mv.from, mv.to)),
        };
        if let Some(castle) = castle {
            if let Some((rook_from, rook_to)) = castle.rook_relocation() {
                let rook = Move::new(Piece::rook(castle.castling_side()), rook_from, rook_to);
                self.relocate(&mut next, &rook)?;
            }
        }

        Ok(next)
    }

    /// Decode `text`, apply `mv` and re-encode in this applier's dialect.
    pub fn apply_encoded(&self, text: &str, mv: &Move) -> Result<String, ValidationError> {
        let board = codec::decode(text);
        let next = self.apply(&board, mv)?;
        Ok(next.encode(self.dialect))
    }

    /// Move the source occupant (or the promotion piece) and return the
    /// occupant that left the source square.
    fn relocate(&self, board: &mut Board, mv: &Move) -> Result<Piece, ValidationError> {
        let occupant = board.get(mv.from);
        let matches = match (occupant, self.piece_case) {
            (Some(p), PieceCase::Exact) => p == mv.piece,
            (Some(p), PieceCase::IgnoreCase) => p.eq_ignore_case(mv.piece),
            (None, _) => false,
        };
        let moved = match occupant {
            Some(p) if matches => p,
            _ => {
                return Err(ValidationError::PieceMismatch {
                    square: mv.from,
                    expected: mv.piece,
                    found: occupant,
                });
            }
        };

        let placed = match (mv.kind, self.piece_case) {
            (MoveKind::Promotion(promo), PieceCase::Exact) => promo,
            (MoveKind::Promotion(promo), PieceCase::IgnoreCase) => promo.with_side(moved.side()),
            _ => moved,
        };
        board.set(mv.to, Some(placed));
        board.set(mv.from, None);
        Ok(moved)
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
