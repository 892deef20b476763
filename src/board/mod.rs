//! Board snapshot consumed by the hashing layer.
//!
//! [`BoardView`] is the read-only interface the key generator works against.
//! [`Board`] is a small mailbox implementation of it that parses FEN, applies
//! moves and keeps its key up to date incrementally, so callers and tests can
//! check incremental keys against full recomputation.
//!
//! # Example
//! ```
//! use chess_tt::board::Board;
//! use chess_tt::zobrist::compute_key;
//!
//! let mut board = Board::new();
//! let mv = board.parse_move("e2e4").unwrap();
//! board.make_move(mv);
//! assert_eq!(board.key(), compute_key(&board));
//! ```

mod error;
mod fen;
mod make_unmake;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use make_unmake::{NullMoveInfo, UnmakeInfo};
pub use state::{Board, BoardView};
pub use types::{CastlingRights, Color, Move, MoveKind, Piece, Square};
