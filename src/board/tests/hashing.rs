//! Incremental key maintenance checked against full recomputation.

use super::{play, GAMES, START_FEN};
use crate::board::{Board, BoardView, Color, Square};
use crate::zobrist::{compute_key, en_passant_capturable, ZOBRIST};

#[test]
fn test_incremental_key_matches_recomputation_every_move() {
    for (fen, moves) in GAMES {
        let mut board = Board::from_fen(fen);
        assert!(board.verify_key(), "initial key for {fen}");
        play(&mut board, moves, |b, mv| {
            assert_eq!(b.key(), compute_key(b), "after {mv} from {fen}");
        });
    }
}

#[test]
fn test_incremental_key_matches_fresh_fen_parse() {
    for (fen, moves) in GAMES {
        let mut board = Board::from_fen(fen);
        play(&mut board, moves, |b, mv| {
            let reparsed = Board::from_fen(&b.to_fen());
            assert_eq!(b.key(), reparsed.key(), "after {mv} from {fen}");
        });
    }
}

#[test]
fn test_transposed_move_orders_share_key() {
    let mut a = Board::new();
    let mut b = Board::new();
    play(&mut a, &["g1f3", "g8f6", "b1c3", "b8c6"], |_, _| {});
    play(&mut b, &["b1c3", "b8c6", "g1f3", "g8f6"], |_, _| {});
    assert_eq!(a.key(), b.key());
    assert_eq!(a.to_fen().split(' ').next(), b.to_fen().split(' ').next());
}

#[test]
fn test_knight_shuffle_returns_to_start_key() {
    let mut board = Board::new();
    let start = board.key();
    play(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8"], |_, _| {});
    assert_eq!(board.key(), start);
    assert_eq!(board.to_fen().split(' ').next(), START_FEN.split(' ').next());
}

#[test]
fn test_castling_drops_rights_from_key() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mut expected = board.key();
    play(&mut board, &["e1g1"], |_, _| {});

    // King e1->g1, rook h1->f1, both white rights gone, side flipped.
    use crate::board::Piece;
    expected.toggle_piece(&ZOBRIST, Piece::King, Color::White, Square(0, 4));
    expected.toggle_piece(&ZOBRIST, Piece::King, Color::White, Square(0, 6));
    expected.toggle_piece(&ZOBRIST, Piece::Rook, Color::White, Square(0, 7));
    expected.toggle_piece(&ZOBRIST, Piece::Rook, Color::White, Square(0, 5));
    expected.toggle_castling(&ZOBRIST, Color::White, true);
    expected.toggle_castling(&ZOBRIST, Color::White, false);
    expected.toggle_side(&ZOBRIST);

    assert_eq!(board.key(), expected);
}

#[test]
fn test_double_push_without_capturer_has_no_en_passant_term() {
    let mut board = Board::new();
    play(&mut board, &["e2e4"], |_, _| {});
    assert_eq!(board.en_passant_target(), Some(Square(2, 4)));
    assert!(!en_passant_capturable(&board, Square(2, 4)));

    let without_ep = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(board.key(), without_ep.key());
}

#[test]
fn test_double_push_next_to_enemy_pawn_has_en_passant_term() {
    let mut board = Board::from_fen("4k3/8/8/8/1p6/8/P7/4K3 w - - 0 1");
    play(&mut board, &["a2a4"], |_, _| {});

    let without_ep = Board::from_fen("4k3/8/8/8/Pp6/8/8/4K3 b - - 0 1");
    assert_ne!(board.key(), without_ep.key());

    let mut expected = without_ep.key();
    expected.toggle_en_passant(&ZOBRIST, Square(2, 0));
    assert_eq!(board.key(), expected);
}

#[test]
fn test_null_move_key() {
    let mut board = Board::from_fen("4k3/8/8/8/Pp6/8/8/4K3 b - a3 0 1");
    let _ = board.make_null_move();
    assert!(board.verify_key());
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.en_passant_target(), None);
}
