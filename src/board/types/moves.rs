//! Compact move type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

/// What a move does besides carrying a piece from one square to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    DoublePawnPush,
    /// King move of two files; the rook side follows from the destination.
    Castle,
    Capture,
    EnPassant,
    Promotion(Piece),
    PromotionCapture(Piece),
}

// Promotion kinds take 8..=15: bit 3 marks a promotion, bit 2 a capture,
// bits 0-1 the piece.
const PROMOTION_BIT: u16 = 0b1000;
const PROMOTION_CAPTURE_BIT: u16 = 0b0100;
const PROMOTION_PIECES: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

impl MoveKind {
    const fn to_bits(self) -> u16 {
        match self {
            MoveKind::Quiet => 0,
            MoveKind::DoublePawnPush => 1,
            MoveKind::Castle => 2,
            MoveKind::Capture => 3,
            MoveKind::EnPassant => 4,
            MoveKind::Promotion(piece) => PROMOTION_BIT | promotion_index(piece),
            MoveKind::PromotionCapture(piece) => {
                PROMOTION_BIT | PROMOTION_CAPTURE_BIT | promotion_index(piece)
            }
        }
    }

    const fn from_bits(bits: u16) -> Self {
        if bits & PROMOTION_BIT != 0 {
            let piece = PROMOTION_PIECES[(bits & 0b11) as usize];
            return if bits & PROMOTION_CAPTURE_BIT != 0 {
                MoveKind::PromotionCapture(piece)
            } else {
                MoveKind::Promotion(piece)
            };
        }
        match bits {
            1 => MoveKind::DoublePawnPush,
            2 => MoveKind::Castle,
            3 => MoveKind::Capture,
            4 => MoveKind::EnPassant,
            _ => MoveKind::Quiet,
        }
    }
}

/// Anything that is not a minor piece or rook promotes to a queen.
const fn promotion_index(piece: Piece) -> u16 {
    match piece {
        Piece::Knight => 0,
        Piece::Bishop => 1,
        Piece::Rook => 2,
        _ => 3,
    }
}

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-15: kind
///
/// The transposition table stores this word directly, with 0 meaning "no
/// move". A1 to A1 is never a real move, so no move encodes to 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        let from_idx = from.as_index() as u16;
        let to_idx = to.as_index() as u16;
        Move(from_idx | (to_idx << 6) | (kind.to_bits() << 12))
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_bits(self.0 >> 12)
    }

    /// Returns true if this move removes an enemy piece, en passant included.
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(
            self.kind(),
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind(), MoveKind::EnPassant)
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        matches!(self.kind(), MoveKind::Castle)
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.kind(), MoveKind::DoublePawnPush)
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.promotion().is_some()
    }

    /// Piece a pawn turns into, for promotions.
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match self.kind() {
            MoveKind::Promotion(piece) | MoveKind::PromotionCapture(piece) => Some(piece),
            _ => None,
        }
    }

    /// Raw 16-bit word, as packed into table entries.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?})", self.kind())
    }
}

/// UCI long algebraic notation.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}
