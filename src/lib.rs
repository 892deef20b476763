//! Position hashing and transposition table for a chess engine.
//!
//! - [`zobrist`] turns a board into a 64-bit [`PositionKey`], from scratch or
//!   incrementally.
//! - [`tt`] caches search results by key in a fixed-size, 4-way bucketed
//!   [`TranspositionTable`] with generation-based replacement.
//! - [`board`] holds the read-only board interface the key generator uses and
//!   a simple board that implements it.
//!
//! # Example
//! ```
//! use chess_tt::board::Board;
//! use chess_tt::tt::{BoundType, TranspositionTable};
//! use chess_tt::zobrist::compute_key;
//!
//! let tt = TranspositionTable::new(1024);
//! let board = Board::new();
//! let key = compute_key(&board);
//! let e2e4 = board.parse_move("e2e4").unwrap();
//!
//! tt.store(key, 4, 20, 0, BoundType::Exact, Some(e2e4));
//! let entry = tt.probe(key, 4).unwrap();
//! assert_eq!(entry.value(0), 20);
//! assert_eq!(entry.best_move, Some(e2e4));
//! ```

pub mod board;
mod logging;
pub mod tt;
pub mod zobrist;

pub use board::{Board, BoardView, Color, Move, Piece, Square};
pub use tt::{BoundType, TTEntry, TranspositionTable};
pub use zobrist::{compute_key, PositionKey};
