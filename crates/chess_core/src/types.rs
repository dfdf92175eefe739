use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}
impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
    /// Command-line flag telling an engine which color it plays.
    pub fn flag(self) -> &'static str {
        match self {
            Side::White => "--play-white",
            Side::Black => "--play-black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

/// A piece symbol as it appears in a board string.
///
/// Uppercase letters belong to White, lowercase to Black. Any ASCII letter
/// is accepted because engines may place marker pieces of their own; the
/// standard set is `KQRBNP` / `kqrbnp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece(u8);

pub const STANDARD_SYMBOLS: [char; 12] = ['K', 'Q', 'R', 'B', 'N', 'P', 'k', 'q', 'r', 'b', 'n', 'p'];

impl Piece {
    pub fn from_char(c: char) -> Option<Piece> {
        if c.is_ascii_alphabetic() {
            Some(Piece(c as u8))
        } else {
            None
        }
    }

    pub fn king(side: Side) -> Piece {
        Piece(b'k').with_side(side)
    }

    pub fn rook(side: Side) -> Piece {
        Piece(b'r').with_side(side)
    }

    pub fn symbol(self) -> char {
        self.0 as char
    }

    pub fn side(self) -> Side {
        if self.0.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Lowercase letter identifying the kind regardless of side.
    pub fn kind(self) -> char {
        self.0.to_ascii_lowercase() as char
    }

    pub fn is_king(self) -> bool {
        self.kind() == 'k'
    }

    /// Same kind, owned by `side`.
    pub fn with_side(self, side: Side) -> Piece {
        match side {
            Side::White => Piece(self.0.to_ascii_uppercase()),
            Side::Black => Piece(self.0.to_ascii_lowercase()),
        }
    }

    pub fn eq_ignore_case(self, other: Piece) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Dense index 0..52 used by fingerprinting: `A..Z` then `a..z`.
    pub fn letter_idx(self) -> usize {
        if self.0.is_ascii_uppercase() {
            (self.0 - b'A') as usize
        } else {
            26 + (self.0 - b'a') as usize
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Board cell index 0..63, counted from a8 (0) to h1 (63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(idx: u8) -> Option<Square> {
        (idx < 64).then_some(Square(idx))
    }

    /// Builds a square from ASCII file (`a`..`h`) and rank (`1`..`8`).
    pub fn from_coords(file: char, rank: char) -> Option<Square> {
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let f = file as u8 - b'a';
        let r = b'8' - rank as u8;
        Some(Square(f + 8 * r))
    }

    pub fn parse(coord: &str) -> Option<Square> {
        let mut chars = coord.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Square::from_coords(file, rank)
    }

    pub fn idx(self) -> usize {
        self.0 as usize
    }

    /// File offset 0..7 from the a-file.
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank number 1..8 as printed on a board.
    pub fn rank(self) -> u8 {
        8 - self.0 / 8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank())
    }
}
