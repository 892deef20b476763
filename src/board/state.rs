use super::{CastlingRights, Color, Piece, Square};
use crate::zobrist::{compute_key, PositionKey};

/// Read-only view of a position, everything the key generator needs.
pub trait BoardView {
    /// The piece standing on `sq`, if any.
    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)>;

    fn side_to_move(&self) -> Color;

    fn castling_rights(&self) -> CastlingRights;

    /// Square a pawn skipped over with a double push on the previous move.
    fn en_passant_target(&self) -> Option<Square>;

    /// All occupied squares in index order.
    fn occupied(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(color, piece)| (sq, color, piece)))
    }
}

/// Mailbox board snapshot that keeps its position key up to date.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) key: PositionKey,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (i, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square(0, i), Color::White, *piece);
            board.set_piece(Square(7, i), Color::Black, *piece);
            board.set_piece(Square(1, i), Color::White, Piece::Pawn);
            board.set_piece(Square(6, i), Color::Black, Piece::Pawn);
        }

        board.castling_rights = CastlingRights::all();
        board.key = compute_key(&board);
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            key: PositionKey::default(),
        }
    }

    /// Incrementally maintained position key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> PositionKey {
        self.key
    }

    /// Returns true if the maintained key equals a full recomputation.
    #[must_use]
    pub fn verify_key(&self) -> bool {
        self.key == compute_key(self)
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    // Placement helpers leave the key alone; callers toggle it themselves.
    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.squares[sq.as_index()] = Some((color, piece));
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.as_index()].take()
    }
}

impl BoardView for Board {
    #[inline]
    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.as_index()]
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
