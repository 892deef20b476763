use super::{Board, CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::{en_passant_capturable, PositionKey, ZOBRIST};

/// State needed to take a move back.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_key: PositionKey,
}

/// State needed to take a null move back.
#[derive(Clone, Debug)]
pub struct NullMoveInfo {
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_key: PositionKey,
}

fn rook_castle_squares(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    if king_to.file() == 6 {
        (Square(rank, 7), Square(rank, 5))
    } else {
        (Square(rank, 0), Square(rank, 3))
    }
}

/// Castling right lost when something moves from or onto `sq`, if `sq` is a
/// rook's home corner.
fn corner_right(sq: Square) -> Option<(Color, bool)> {
    match (sq.rank(), sq.file()) {
        (0, 0) => Some((Color::White, false)),
        (0, 7) => Some((Color::White, true)),
        (7, 0) => Some((Color::Black, false)),
        (7, 7) => Some((Color::Black, true)),
        _ => None,
    }
}

impl Board {
    /// Drop the en passant term from `key` if it is currently part of it.
    fn clear_en_passant_term(&self, key: &mut PositionKey) {
        if let Some(target) = self.en_passant_target {
            if en_passant_capturable(self, target) {
                key.toggle_en_passant(&ZOBRIST, target);
            }
        }
    }

    /// Apply a move, updating the position key incrementally.
    ///
    /// The move is trusted to be legal for the side to move.
    ///
    /// # Panics
    /// Panics if the source square is empty.
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let mut key = self.key;
        let previous_key = self.key;
        let previous_en_passant_target = self.en_passant_target;
        let previous_castling_rights = self.castling_rights;
        let previous_halfmove_clock = self.halfmove_clock;

        let us = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        self.clear_en_passant_term(&mut key);

        let captured = if mv.is_en_passant() {
            let capture_sq = Square(from.rank(), to.file());
            let captured = self.remove_piece(capture_sq);
            if let Some((color, piece)) = captured {
                key.toggle_piece(&ZOBRIST, piece, color, capture_sq);
            }
            captured
        } else if mv.is_castling() {
            None
        } else {
            let captured = self.remove_piece(to);
            if let Some((color, piece)) = captured {
                key.toggle_piece(&ZOBRIST, piece, color, to);
            }
            captured
        };

        let (color, piece) = self.remove_piece(from).expect("make_move 'from' empty");
        key.toggle_piece(&ZOBRIST, piece, color, from);

        if mv.is_castling() {
            self.set_piece(to, color, Piece::King);
            key.toggle_piece(&ZOBRIST, Piece::King, color, to);

            let (rook_from, rook_to) = rook_castle_squares(to);
            if let Some((rook_color, rook)) = self.remove_piece(rook_from) {
                self.set_piece(rook_to, rook_color, rook);
                key.toggle_piece(&ZOBRIST, rook, rook_color, rook_from);
                key.toggle_piece(&ZOBRIST, rook, rook_color, rook_to);
            }
        } else {
            let placed = mv.promotion().unwrap_or(piece);
            self.set_piece(to, color, placed);
            key.toggle_piece(&ZOBRIST, placed, color, to);
        }

        let mut rights = self.castling_rights;
        if piece == Piece::King {
            rights.remove(us, true);
            rights.remove(us, false);
        }
        for (right_color, kingside) in [corner_right(from), corner_right(to)].into_iter().flatten() {
            rights.remove(right_color, kingside);
        }
        for (right_color, kingside) in CastlingRights::RIGHTS {
            if rights.has(right_color, kingside) != self.castling_rights.has(right_color, kingside) {
                key.toggle_castling(&ZOBRIST, right_color, kingside);
            }
        }
        self.castling_rights = rights;

        self.halfmove_clock = if piece == Piece::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = us.opponent();
        key.toggle_side(&ZOBRIST);

        self.en_passant_target = if mv.is_double_pawn_push() {
            Some(Square((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };
        if let Some(target) = self.en_passant_target {
            if en_passant_capturable(self, target) {
                key.toggle_en_passant(&ZOBRIST, target);
            }
        }

        self.key = key;
        debug_assert!(self.verify_key(), "incremental key diverged after {mv}");

        UnmakeInfo {
            captured,
            previous_en_passant_target,
            previous_castling_rights,
            previous_halfmove_clock,
            previous_key,
        }
    }

    /// Take back a move made with [`Board::make_move`].
    pub fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        let us = self.side_to_move.opponent();
        let from = mv.from();
        let to = mv.to();

        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }

        if let Some((color, placed)) = self.remove_piece(to) {
            let original = if mv.is_promotion() { Piece::Pawn } else { placed };
            self.set_piece(from, color, original);
        }

        if mv.is_castling() {
            let (rook_from, rook_to) = rook_castle_squares(to);
            if let Some((rook_color, rook)) = self.remove_piece(rook_to) {
                self.set_piece(rook_from, rook_color, rook);
            }
        }

        if let Some((color, piece)) = info.captured {
            let capture_sq = if mv.is_en_passant() {
                Square(from.rank(), to.file())
            } else {
                to
            };
            self.set_piece(capture_sq, color, piece);
        }

        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.key = info.previous_key;
    }

    /// Pass the turn without moving, as used by null-move pruning.
    pub fn make_null_move(&mut self) -> NullMoveInfo {
        let previous_key = self.key;
        let previous_en_passant_target = self.en_passant_target;

        let mut key = self.key;
        self.clear_en_passant_term(&mut key);
        self.en_passant_target = None;
        self.side_to_move = self.side_to_move.opponent();
        key.toggle_side(&ZOBRIST);
        self.key = key;
        debug_assert!(self.verify_key(), "incremental key diverged after null move");

        NullMoveInfo {
            previous_en_passant_target,
            previous_key,
        }
    }

    /// Take back a null move.
    pub fn unmake_null_move(&mut self, info: NullMoveInfo) {
        self.side_to_move = self.side_to_move.opponent();
        self.en_passant_target = info.previous_en_passant_target;
        self.key = info.previous_key;
    }
}
