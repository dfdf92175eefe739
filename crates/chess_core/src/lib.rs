pub mod apply;
pub mod board;
pub mod codec;
pub mod fingerprint;
pub mod moves;
pub mod types;

pub use apply::*;
pub use board::*;
pub use codec::{DecodeWarning, Dialect, RANK_DELIMITER, decode, decode_with_warnings, encode};
pub use moves::*;
pub use types::*;
