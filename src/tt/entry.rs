//! Table entries and their packed slot encoding.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::score::to_search_value;
use crate::board::Move;
use crate::zobrist::PositionKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    fn to_bits(self) -> u64 {
        match self {
            BoundType::Exact => 0,
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
        }
    }

    fn from_bits(v: u64) -> Self {
        match v & 0x3 {
            0 => BoundType::Exact,
            1 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Number of distinct generations; the counter wraps at this value.
pub(crate) const GENERATION_CYCLE: u8 = 1 << 6;
pub(crate) const GENERATION_MASK: u8 = GENERATION_CYCLE - 1;

/// Snapshot of one table slot.
///
/// `score` is stored relative to the node that produced it; use
/// [`TTEntry::value`] to read it from the current ply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TTEntry {
    pub key: PositionKey,
    pub depth: u8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
    pub generation: u8,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// Stored score translated to a root-relative score at `ply`.
    #[must_use]
    pub fn value(&self, ply: usize) -> i32 {
        to_search_value(i32::from(self.score), ply)
    }

    /// Returns true if the stored score can cut off a node at `ply` searched
    /// with the window (`alpha`, `beta`).
    ///
    /// An upper bound is usable at or below alpha and a lower bound at or above
    /// beta. An exact score is used only when it also falls outside the
    /// window, so a cached exact score never replaces a search whose window
    /// it lies inside.
    #[must_use]
    pub fn can_use_value(&self, alpha: i32, beta: i32, ply: usize) -> bool {
        let value = self.value(ply);
        match self.bound_type {
            BoundType::UpperBound => value <= alpha,
            BoundType::LowerBound => value >= beta,
            BoundType::Exact => value <= alpha || value >= beta,
        }
    }
}

/// Packed entry format (fits in 64 bits):
/// - bits 0-15:  move (u16, 0 = no move)
/// - bits 16-31: score (i16 as u16)
/// - bits 32-39: depth (u8)
/// - bits 40-47: bound (2 bits) + generation (6 bits)
/// - bit  48:    occupied
///
/// An empty slot packs to 0; every stored entry has the occupied bit set.
pub(crate) const OCCUPIED: u64 = 1 << 48;

pub(crate) fn pack_entry(
    depth: u8,
    score: i16,
    bound_type: BoundType,
    best_move: Option<Move>,
    generation: u8,
) -> u64 {
    let mv = u64::from(best_move.map_or(0, Move::as_u16));
    let sc = u64::from(score as u16);
    let bound_gen = bound_type.to_bits() | (u64::from(generation & GENERATION_MASK) << 2);

    mv | (sc << 16) | (u64::from(depth) << 32) | (bound_gen << 40) | OCCUPIED
}

pub(crate) fn unpack_entry(key: PositionKey, data: u64) -> TTEntry {
    let mv_bits = (data & 0xFFFF) as u16;
    let score = ((data >> 16) & 0xFFFF) as u16 as i16;
    let depth = ((data >> 32) & 0xFF) as u8;
    let bound_gen = (data >> 40) & 0xFF;

    TTEntry {
        key,
        depth,
        score,
        bound_type: BoundType::from_bits(bound_gen),
        best_move: (mv_bits != 0).then(|| Move::from_u16(mv_bits)),
        generation: packed_generation(data),
    }
}

#[inline]
pub(crate) fn packed_generation(data: u64) -> u8 {
    ((data >> 42) as u8) & GENERATION_MASK
}

#[inline]
pub(crate) fn packed_depth(data: u64) -> u8 {
    ((data >> 32) & 0xFF) as u8
}

#[inline]
pub(crate) fn packed_move(data: u64) -> Option<Move> {
    let mv_bits = (data & 0xFFFF) as u16;
    (mv_bits != 0).then(|| Move::from_u16(mv_bits))
}

/// Same entry with its generation replaced.
#[inline]
pub(crate) fn with_generation(data: u64, generation: u8) -> u64 {
    let cleared = data & !(u64::from(GENERATION_MASK) << 42);
    cleared | (u64::from(generation & GENERATION_MASK) << 42)
}
