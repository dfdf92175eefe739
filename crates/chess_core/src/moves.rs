//! Engine move notation.
//!
//! Engines answer with one line such as `Pe2e4` or `Pe7e8Q`: the moving
//! piece, source square, destination square and an optional promotion
//! symbol. The move kind is settled here, once, so applying a move never has
//! to re-derive castling from coordinates.

use crate::types::*;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Castle(CastleSide),
    Promotion(Piece),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("engine produced no move")]
    Empty,
    #[error("move {0:?} is shorter than five characters")]
    TooShort(String),
    #[error("invalid piece symbol {0:?}")]
    BadPiece(char),
    #[error("invalid square {0:?}")]
    BadSquare(String),
    #[error("invalid promotion symbol {0:?}")]
    BadPromotion(char),
}

impl Move {
    /// Builds a move and classifies it as castling when a king leaves its
    /// own home square (`K` on e1, `k` on e8) for the g- or c-file.
    pub fn new(piece: Piece, from: Square, to: Square) -> Move {
        let kind = match castle_side(piece, from, to) {
            Some(side) => MoveKind::Castle(side),
            None => MoveKind::Normal,
        };
        Move { piece, from, to, kind }
    }

    pub fn promotion(piece: Piece, from: Square, to: Square, promo: Piece) -> Move {
        Move {
            piece,
            from,
            to,
            kind: MoveKind::Promotion(promo),
        }
    }

    /// Parse the first token of an engine's output line.
    pub fn parse(line: &str) -> Result<Move, MoveParseError> {
        let token = line.split_whitespace().next().ok_or(MoveParseError::Empty)?;
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 5 {
            return Err(MoveParseError::TooShort(token.to_string()));
        }

        let piece = Piece::from_char(chars[0]).ok_or(MoveParseError::BadPiece(chars[0]))?;
        let from = parse_square(chars[1], chars[2])?;
        let to = parse_square(chars[3], chars[4])?;

        match chars.get(5) {
            // The six-character layout repeats the moving piece when nothing
            // is promoted.
            None | Some('.') => Ok(Move::new(piece, from, to)),
            Some(&c) if c == piece.symbol() => Ok(Move::new(piece, from, to)),
            Some(&c) => {
                let promo = Piece::from_char(c).ok_or(MoveParseError::BadPromotion(c))?;
                Ok(Move::promotion(piece, from, to, promo))
            }
        }
    }

    /// Rook relocation implied by a castling move, as (from, to).
    pub fn rook_relocation(&self) -> Option<(Square, Square)> {
        let MoveKind::Castle(side) = self.kind else {
            return None;
        };
        let rank = char::from(b'0' + self.from.rank());
        let (from_file, to_file) = match side {
            CastleSide::King => ('h', 'f'),
            CastleSide::Queen => ('a', 'd'),
        };
        Some((
            Square::from_coords(from_file, rank)?,
            Square::from_coords(to_file, rank)?,
        ))
    }

    /// Side whose pieces castle.
    pub fn castling_side(&self) -> Side {
        self.piece.side()
    }
}

fn parse_square(file: char, rank: char) -> Result<Square, MoveParseError> {
    Square::from_coords(file.to_ascii_lowercase(), rank)
        .ok_or_else(|| MoveParseError::BadSquare(format!("{file}{rank}")))
}

fn castle_side(piece: Piece, from: Square, to: Square) -> Option<CastleSide> {
    if !piece.is_king() || from.file() != 4 || from.rank() != to.rank() {
        return None;
    }
    let home_rank = match piece.side() {
        Side::White => 1,
        Side::Black => 8,
    };
    if from.rank() != home_rank {
        return None;
    }
    match to.file() {
        6 => Some(CastleSide::King),
        2 => Some(CastleSide::Queen),
        _ => None,
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.piece, self.from, self.to)?;
        if let MoveKind::Promotion(p) = self.kind {
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
