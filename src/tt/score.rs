//! Score window constants and mate-distance normalization.
//!
//! Mate scores in search are relative to the root: `VALUE_MATE - n` means
//! mate `n` plies after the root. A table entry may be reached again at a
//! different ply, so mate scores are stored relative to the node instead and
//! translated back on retrieval.

/// Maximum search ply.
pub const MAX_PLY: usize = 128;

/// Largest depth the table stores.
pub const MAX_DEPTH: u32 = 127;

/// Score for delivering mate at the root.
pub const VALUE_MATE: i32 = 32_000;

/// Window bounds accepted by [`TranspositionTable::store`](super::TranspositionTable::store).
pub const VALUE_MAX: i32 = VALUE_MATE;
pub const VALUE_MIN: i32 = -VALUE_MATE;

/// Scores at or beyond these are mate scores; anything closer to zero is a
/// plain evaluation.
pub const VALUE_MATE_IN_MAX_PLY: i32 = VALUE_MATE - MAX_PLY as i32;
pub const VALUE_MATED_IN_MAX_PLY: i32 = -VALUE_MATE_IN_MAX_PLY;

/// Convert a root-relative search score to the node-relative form stored in
/// the table.
#[inline]
#[must_use]
pub fn to_table_value(score: i32, ply: usize) -> i32 {
    debug_assert!(ply < MAX_PLY, "ply {ply} out of range");
    let ply = ply as i32;
    if score >= VALUE_MATE_IN_MAX_PLY {
        score + ply
    } else if score <= VALUE_MATED_IN_MAX_PLY {
        score - ply
    } else {
        score
    }
}

/// Reverse of [`to_table_value`]: a stored score seen from `ply`.
#[inline]
#[must_use]
pub fn to_search_value(stored: i32, ply: usize) -> i32 {
    debug_assert!(ply < MAX_PLY, "ply {ply} out of range");
    let ply = ply as i32;
    if stored >= VALUE_MATE_IN_MAX_PLY {
        stored - ply
    } else if stored <= VALUE_MATED_IN_MAX_PLY {
        stored + ply
    } else {
        stored
    }
}
