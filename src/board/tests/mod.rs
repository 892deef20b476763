//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `hashing.rs` - Incremental keys against full recomputation
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `proptest.rs` - Property-based tests

mod hashing;
mod make_unmake;
mod proptest;

use crate::board::{Board, Move};

pub(super) const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Scripted games as (starting FEN, UCI moves). Between them they cover
/// castling on both wings, en passant, promotions, captures on rook corners
/// and king moves that drop castling rights.
pub(super) const GAMES: &[(&str, &[&str])] = &[
    (
        START_FEN,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1", "f8c5", "d2d3", "e8g8"],
    ),
    (
        START_FEN,
        &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6", "c7d6", "d2d4", "b7b5", "c2c4", "b5c4"],
    ),
    (
        "r3k2r/1P6/8/8/8/8/6p1/R3K2R w KQkq - 0 1",
        &["b7a8q", "g2h1q", "e1c1", "e8g8", "a8a7", "h1h2"],
    ),
    (
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        &["a1a2", "e8c8", "e1e2", "h8h1", "a2a8", "c8b8"],
    ),
    (
        "4k3/8/8/8/1p6/8/P1P5/4K3 w - - 0 1",
        &["a2a4", "b4a3", "c2c4", "e8d7", "e1d1"],
    ),
];

/// Parse and apply each UCI move in turn, calling `check` after every move.
pub(super) fn play(board: &mut Board, moves: &[&str], mut check: impl FnMut(&Board, Move)) {
    for uci in moves {
        let mv = board
            .parse_move(uci)
            .unwrap_or_else(|e| panic!("bad scripted move {uci}: {e}"));
        let _ = board.make_move(mv);
        check(board, mv);
    }
}
