//! Core chess types.
//!
//! This module contains the value types the hashing layer reads from a board:
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - (rank, file) board square
//! - `Move` - compact 16-bit move representation
//! - `CastlingRights` - castling state

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece};
pub use square::Square;
