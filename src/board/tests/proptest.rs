//! Property-based tests using proptest.

use super::GAMES;
use crate::board::{Board, CastlingRights, Color, Move, Piece, Square, UnmakeInfo};
use crate::zobrist::{compute_key, ZobristKeys, ZOBRIST};
use proptest::prelude::*;

/// Strategy for a pawn-free scatter of pieces with random side and rights.
/// Pawns are left out so no en passant term can appear.
fn board_strategy() -> impl Strategy<Value = Board> {
    (
        prop::collection::vec((0..64usize, 0..2usize, 1..6usize), 0..24),
        any::<bool>(),
        0..16u8,
    )
        .prop_map(|(placements, black_to_move, rights)| {
            let mut board = Board::empty();
            for (idx, color, piece) in placements {
                board.set_piece(Square::from_index(idx), Color::BOTH[color], Piece::ALL[piece]);
            }
            board.side_to_move = if black_to_move { Color::Black } else { Color::White };
            board.castling_rights = CastlingRights::from_u8(rights);
            board.key = compute_key(&board);
            board
        })
}

/// Strategy picking a scripted game and how many of its moves to play.
fn game_prefix_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0..GAMES.len()).prop_flat_map(|game| (Just(game), 0..=GAMES[game].1.len()))
}

proptest! {
    /// Property: the key depends only on the position
    #[test]
    fn prop_key_is_deterministic(board in board_strategy()) {
        let copy = board.clone();
        prop_assert_eq!(compute_key(&board), compute_key(&copy));
        prop_assert_eq!(compute_key(&board), board.key());
    }

    /// Property: a fresh table built from the same seed hashes identically
    #[test]
    fn prop_seeded_tables_agree(board in board_strategy()) {
        let keys = ZobristKeys::new();
        prop_assert_eq!(crate::zobrist::compute_key_with(&board, &keys), compute_key(&board));
    }

    /// Property: flipping one castling right changes the key by that right's toggle
    #[test]
    fn prop_castling_toggle_symmetry(board in board_strategy(), right in 0..4usize) {
        let (color, kingside) = CastlingRights::RIGHTS[right];
        let mut flipped = board.clone();
        if flipped.castling_rights.has(color, kingside) {
            flipped.castling_rights.remove(color, kingside);
        } else {
            flipped.castling_rights.set(color, kingside);
        }

        let diff = compute_key(&board).as_u64() ^ compute_key(&flipped).as_u64();
        prop_assert_eq!(diff, ZOBRIST.castling_toggle(color, kingside));

        let mut toggled = board.key();
        toggled.toggle_castling(&ZOBRIST, color, kingside);
        prop_assert_eq!(toggled, compute_key(&flipped));
    }

    /// Property: changing the side to move XORs exactly the side key
    #[test]
    fn prop_side_toggle(board in board_strategy()) {
        let mut flipped = board.clone();
        flipped.side_to_move = board.side_to_move.opponent();
        let diff = compute_key(&board).as_u64() ^ compute_key(&flipped).as_u64();
        prop_assert_eq!(diff, ZOBRIST.side());
    }

    /// Property: placing a piece on an empty square XORs exactly its piece key
    #[test]
    fn prop_piece_toggle(board in board_strategy(), idx in 0..64usize, color in 0..2usize, piece in 1..6usize) {
        let sq = Square::from_index(idx);
        prop_assume!(board.squares[idx].is_none());
        let (color, piece) = (Color::BOTH[color], Piece::ALL[piece]);

        let mut placed = board.clone();
        placed.set_piece(sq, color, piece);

        let mut key = board.key();
        key.toggle_piece(&ZOBRIST, piece, color, sq);
        prop_assert_eq!(key, compute_key(&placed));
    }

    /// Property: hash is always consistent with recomputed hash
    #[test]
    fn prop_key_consistency((game, len) in game_prefix_strategy()) {
        let (fen, moves) = GAMES[game];
        let mut board = Board::from_fen(fen);
        for uci in &moves[..len] {
            let mv = board.parse_move(uci).expect("scripted move");
            let _ = board.make_move(mv);
            prop_assert_eq!(board.key(), compute_key(&board));
        }
    }

    /// Property: make_move followed by unmake_move restores board state exactly
    #[test]
    fn prop_make_unmake_restores_state((game, len) in game_prefix_strategy()) {
        let (fen, moves) = GAMES[game];
        let mut board = Board::from_fen(fen);
        let initial_key = board.key();
        let initial_fen = board.to_fen();

        let mut history: Vec<(Move, UnmakeInfo)> = Vec::new();
        for uci in &moves[..len] {
            let mv = board.parse_move(uci).expect("scripted move");
            history.push((mv, board.make_move(mv)));
        }
        while let Some((mv, info)) = history.pop() {
            board.unmake_move(mv, info);
        }

        prop_assert_eq!(board.key(), initial_key);
        prop_assert_eq!(board.to_fen(), initial_fen);
    }
}
