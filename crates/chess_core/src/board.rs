use crate::codec::{self, Dialect};
use crate::types::*;
use std::fmt;

/// Board string of the standard starting position.
pub const START_BOARD: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// A flat 64-cell board, indexed from a8 to h1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        let back = ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'];
        for (f, &kind) in back.iter().enumerate() {
            let black = Piece::from_char(kind);
            b.cells[f] = black;
            b.cells[8 + f] = Piece::from_char('p');
            b.cells[48 + f] = Piece::from_char('P');
            b.cells[56 + f] = black.map(|p| p.with_side(Side::White));
        }
        b
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.idx()]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.idx()] = piece;
    }

    pub fn cells(&self) -> &[Option<Piece>; 64] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Option<Piece>; 64] {
        &mut self.cells
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|c| **c == Some(piece)).count()
    }

    pub fn has_king(&self, side: Side) -> bool {
        self.count(Piece::king(side)) > 0
    }

    pub fn encode(&self, dialect: Dialect) -> String {
        codec::encode(self, dialect)
    }

    /// 8x8 text diagram with rank and file labels, rank 8 on top.
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        for (rank_idx, row) in self.cells.chunks(8).enumerate() {
            out.push_str(&format!("{} ", 8 - rank_idx));
            for cell in row {
                out.push(' ');
                out.push(cell.map(Piece::symbol).unwrap_or('.'));
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h\n");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self, Dialect::Ranked))
    }
}
