//! Zobrist-style board fingerprints.
//!
//! Repetition counting only needs to know whether two boards are identical,
//! so each board is reduced to a 64-bit value by XOR-ing one random key per
//! occupied (letter, square) pair. 52 letters × 64 squares = 3328 keys.

use crate::board::Board;
use crate::types::Piece;

const LETTERS: usize = 52;

/// Pre-computed random values for fingerprinting.
/// Generated using a fixed seed for reproducibility.
pub struct FingerprintKeys {
    /// Indexed by [letter][square]
    pub pieces: [[u64; 64]; LETTERS],
}

impl Default for FingerprintKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintKeys {
    /// Generate keys using xorshift64 with a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64;
        let mut pieces = [[0u64; 64]; LETTERS];
        let mut letter = 0;
        while letter < LETTERS {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                pieces[letter][sq] = state;
                sq += 1;
            }
            letter += 1;
        }

        FingerprintKeys { pieces }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: usize) -> u64 {
        self.pieces[piece.letter_idx()][sq]
    }
}

/// Global keys, computed at compile time.
pub static KEYS: FingerprintKeys = FingerprintKeys::new();

impl Board {
    pub fn fingerprint(&self) -> u64 {
        self.cells()
            .iter()
            .enumerate()
            .filter_map(|(sq, cell)| cell.map(|p| KEYS.piece_key(p, sq)))
            .fold(0, |acc, key| acc ^ key)
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod fingerprint_tests;
