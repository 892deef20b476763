//! Zobrist hashing for chess positions.
//!
//! Provides 64-bit position keys for transposition tables. A key is the XOR
//! of random constants selected by the board's content, so it can either be
//! computed from scratch with [`compute_key`] or maintained incrementally by
//! toggling the terms a move changes. Both paths produce the same value.

use std::fmt;

use once_cell::sync::Lazy;
use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{BoardView, CastlingRights, Color, Piece, Square};

/// Seed for the process-wide key table. Fixed so that keys are reproducible
/// across runs.
pub const ZOBRIST_SEED: u64 = 1_234_567_890;

/// Opaque 64-bit position fingerprint.
///
/// Only equality is meaningful; keys are not ordered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionKey(u64);

impl PositionKey {
    #[inline]
    #[must_use]
    pub const fn from_u64(raw: u64) -> Self {
        PositionKey(raw)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// XOR a piece on or off `sq`.
    #[inline]
    pub fn toggle_piece(&mut self, keys: &ZobristKeys, piece: Piece, color: Color, sq: Square) {
        self.0 ^= keys.piece(piece, color, sq);
    }

    /// Flip one castling right between present and absent.
    ///
    /// Applying the same toggle twice restores the original key.
    #[inline]
    pub fn toggle_castling(&mut self, keys: &ZobristKeys, color: Color, kingside: bool) {
        self.0 ^= keys.castling_toggle(color, kingside);
    }

    /// XOR the en passant term for `target` on or off.
    ///
    /// Callers only include this term while [`en_passant_capturable`] holds.
    #[inline]
    pub fn toggle_en_passant(&mut self, keys: &ZobristKeys, target: Square) {
        self.0 ^= keys.en_passant(target);
    }

    /// Flip the side to move.
    #[inline]
    pub fn toggle_side(&mut self, keys: &ZobristKeys) {
        self.0 ^= keys.side();
    }
}

impl fmt::Debug for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PositionKey({:#018x})", self.0)
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl From<u64> for PositionKey {
    fn from(raw: u64) -> Self {
        PositionKey(raw)
    }
}

/// Random constants that make up position keys.
///
/// Read-only after construction; share one instance between every caller
/// that needs comparable keys.
#[derive(Clone)]
pub struct ZobristKeys {
    // piece_keys[piece_type][color][square_index]
    piece_keys: [[[u64; 64]; 2]; 6],
    // en_passant_keys[target_square_index]
    en_passant_keys: [u64; 64],
    // castling_keys[right][0 = present, 1 = absent], rights in CastlingRights::RIGHTS order
    castling_keys: [[u64; 2]; 4],
    side_key: u64,
}

impl ZobristKeys {
    /// Keys generated from [`ZOBRIST_SEED`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(ZOBRIST_SEED)
    }

    /// Keys generated from an explicit seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut en_passant_keys = [0; 64];
        let mut castling_keys = [[0; 2]; 4];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let side_key = rng.gen();

        for right in &mut castling_keys {
            for key in right.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            en_passant_keys,
            castling_keys,
            side_key,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, piece: Piece, color: Color, sq: Square) -> u64 {
        self.piece_keys[piece.index()][color.index()][sq.as_index()]
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self, target: Square) -> u64 {
        self.en_passant_keys[target.as_index()]
    }

    /// Term contributed by one castling right in the given state.
    #[inline]
    #[must_use]
    pub fn castling(&self, color: Color, kingside: bool, present: bool) -> u64 {
        self.castling_keys[CastlingRights::index(color, kingside)][usize::from(!present)]
    }

    /// XOR difference between a right being present and absent.
    #[inline]
    #[must_use]
    pub fn castling_toggle(&self, color: Color, kingside: bool) -> u64 {
        let [present, absent] = self.castling_keys[CastlingRights::index(color, kingside)];
        present ^ absent
    }

    #[inline]
    #[must_use]
    pub fn side(&self) -> u64 {
        self.side_key
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide key table, built on first use and never mutated.
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Returns true if the side to move has a pawn that could capture onto
/// `target` en passant. Pins are not considered.
///
/// The en passant term is part of the key only while this holds, so that
/// positions differing only in an unusable en passant square share a key.
#[must_use]
pub fn en_passant_capturable(board: &impl BoardView, target: Square) -> bool {
    let us = board.side_to_move();
    let capture_rank = us.en_passant_capture_rank();
    let expected_target_rank = match us {
        Color::White => capture_rank + 1,
        Color::Black => capture_rank - 1,
    };
    if target.rank() != expected_target_rank {
        return false;
    }

    let file = target.file();
    [file.checked_sub(1), Some(file + 1)]
        .into_iter()
        .flatten()
        .filter_map(|f| Square::new(capture_rank, f))
        .any(|sq| board.piece_at(sq) == Some((us, Piece::Pawn)))
}

/// Compute the key of `board` from scratch using the process-wide table.
#[must_use]
pub fn compute_key(board: &impl BoardView) -> PositionKey {
    compute_key_with(board, &ZOBRIST)
}

/// Compute the key of `board` from scratch using `keys`.
///
/// Pure and infallible; an inconsistent board still yields a deterministic key.
#[must_use]
pub fn compute_key_with(board: &impl BoardView, keys: &ZobristKeys) -> PositionKey {
    let mut key = PositionKey::default();

    for (sq, color, piece) in board.occupied() {
        key.toggle_piece(keys, piece, color, sq);
    }

    if let Some(target) = board.en_passant_target() {
        if en_passant_capturable(board, target) {
            key.toggle_en_passant(keys, target);
        }
    }

    let rights = board.castling_rights();
    for (color, kingside) in CastlingRights::RIGHTS {
        key.0 ^= keys.castling(color, kingside, rights.has(color, kingside));
    }

    if board.side_to_move() == Color::Black {
        key.toggle_side(keys);
    }

    key
}
