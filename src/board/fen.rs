use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{Board, BoardView, CastlingRights, Color, Move, MoveKind, Piece, Square};
use crate::zobrist::compute_key;

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Returns an error if the FEN string is invalid. The halfmove clock and
    /// fullmove number fields are optional.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Parse piece placement
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { ranks: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(7 - rank_idx, file).ok_or(FenError::BadRankLength {
                    rank: 8 - rank_idx,
                    files: file + 1,
                })?;
                board.set_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank: 8 - rank_idx,
                    files: file,
                });
            }
        }

        // Parse side to move
        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        // Parse castling rights
        for c in parts[2].chars() {
            match c {
                'K' => board.castling_rights.set(Color::White, true),
                'Q' => board.castling_rights.set(Color::White, false),
                'k' => board.castling_rights.set(Color::Black, true),
                'q' => board.castling_rights.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        // Parse en passant target
        board.en_passant_target = if parts[3] == "-" {
            None
        } else {
            let target = parts[3]
                .parse::<Square>()
                .map_err(|_| FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                })?;
            if target.rank() != 2 && target.rank() != 5 {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            Some(target)
        };

        if let Some(clock) = parts.get(4) {
            board.halfmove_clock = clock
                .parse()
                .map_err(|_| FenError::InvalidHalfmoveClock {
                    found: (*clock).to_string(),
                })?;
        }
        if let Some(number) = parts.get(5) {
            board.fullmove_number = number
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber {
                    found: (*number).to_string(),
                })?;
        }

        board.key = compute_key(&board);
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling: String = CastlingRights::RIGHTS
            .iter()
            .filter(|&&(color, kingside)| self.castling_rights.has(color, kingside))
            .map(|&(color, kingside)| {
                let side = if kingside { Piece::King } else { Piece::Queen };
                side.to_fen_char(color)
            })
            .collect();
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// The move kind (capture, double push, castling, en passant) is inferred
    /// from the board. Legality is not checked.
    ///
    /// # Example
    /// ```
    /// use chess_tt::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert!(mv.is_double_pawn_push());
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&uci.len()) || !uci.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            None => None,
            Some(c @ ('n' | 'b' | 'r' | 'q')) => Piece::from_char(c),
            Some(c) => return Err(MoveParseError::InvalidPromotion { char: c }),
        };

        let us = self.side_to_move;
        let piece = match self.piece_at(from) {
            Some((color, piece)) if color == us => piece,
            _ => {
                return Err(MoveParseError::NoPieceToMove {
                    notation: uci.to_string(),
                })
            }
        };
        let is_capture = self.piece_at(to).is_some();
        let file_delta = from.file().abs_diff(to.file());

        let mv = match (piece, promotion) {
            (Piece::Pawn, Some(promo)) if is_capture => {
                Move::new(from, to, MoveKind::PromotionCapture(promo))
            }
            (Piece::Pawn, Some(promo)) => Move::new(from, to, MoveKind::Promotion(promo)),
            (_, Some(_)) => {
                return Err(MoveParseError::InvalidPromotion {
                    char: uci.as_bytes()[4] as char,
                })
            }
            (Piece::King, None) if file_delta == 2 => Move::new(from, to, MoveKind::Castle),
            (Piece::Pawn, None)
                if !is_capture && file_delta == 1 && Some(to) == self.en_passant_target =>
            {
                Move::new(from, to, MoveKind::EnPassant)
            }
            (Piece::Pawn, None) if from.rank().abs_diff(to.rank()) == 2 => {
                Move::new(from, to, MoveKind::DoublePawnPush)
            }
            (_, None) if is_capture => Move::new(from, to, MoveKind::Capture),
            (_, None) => Move::new(from, to, MoveKind::Quiet),
        };

        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
