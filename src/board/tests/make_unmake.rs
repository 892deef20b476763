//! Make/unmake move tests.

use super::{play, GAMES};
use crate::board::{Board, BoardView, CastlingRights, Color, Piece, Square};

#[test]
fn test_unmake_restores_every_game() {
    for (fen, moves) in GAMES {
        let mut board = Board::from_fen(fen);
        let original_fen = board.to_fen();
        let original_key = board.key();

        let mut history = Vec::new();
        for uci in *moves {
            let mv = board.parse_move(uci).expect("scripted move");
            history.push((mv, board.make_move(mv)));
        }
        while let Some((mv, info)) = history.pop() {
            board.unmake_move(mv, info);
            assert!(board.verify_key());
        }

        assert_eq!(board.to_fen(), original_fen);
        assert_eq!(board.key(), original_key);
    }
}

#[test]
fn test_en_passant_make_unmake() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let original_key = board.key();
    let mv = board.parse_move("e5f6").expect("valid move");
    assert!(mv.is_en_passant());

    let info = board.make_move(mv);
    assert_eq!(board.piece_at(Square(4, 5)), None);
    assert_eq!(board.piece_at(Square(5, 5)), Some((Color::White, Piece::Pawn)));

    board.unmake_move(mv, info);
    assert_eq!(board.key(), original_key);
    assert_eq!(board.en_passant_target(), Some(Square(5, 5)));
    assert_eq!(board.piece_at(Square(4, 5)), Some((Color::Black, Piece::Pawn)));
}

#[test]
fn test_promotion_make_unmake() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let original_key = board.key();
    let mv = board.parse_move("a7a8q").expect("valid move");

    let info = board.make_move(mv);
    assert_eq!(board.piece_at(Square(7, 0)), Some((Color::White, Piece::Queen)));

    board.unmake_move(mv, info);
    assert_eq!(board.key(), original_key);
    assert_eq!(board.piece_at(Square(6, 0)), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.piece_at(Square(7, 0)), None);
}

#[test]
fn test_rook_capture_on_corner_removes_right() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = board.parse_move("a1a8").expect("valid move");
    let info = board.make_move(mv);

    let rights = board.castling_rights();
    assert!(!rights.has(Color::White, false));
    assert!(!rights.has(Color::Black, false));
    assert!(rights.has(Color::White, true));
    assert!(rights.has(Color::Black, true));

    board.unmake_move(mv, info);
    assert_eq!(board.castling_rights(), CastlingRights::all());
}

#[test]
fn test_null_move_make_unmake_restores_key_and_ep() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let original_key = board.key();
    let original_ep = board.en_passant_target();

    let info = board.make_null_move();
    assert_eq!(board.en_passant_target(), None);
    assert_ne!(board.key(), original_key);
    assert_eq!(board.side_to_move(), Color::Black);

    board.unmake_null_move(info);
    assert_eq!(board.key(), original_key);
    assert_eq!(board.en_passant_target(), original_ep);
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn test_move_counters() {
    let mut board = Board::new();
    play(&mut board, &["g1f3", "g8f6"], |_, _| {});
    assert_eq!(board.halfmove_clock(), 2);
    assert_eq!(board.fullmove_number(), 2);

    play(&mut board, &["e2e4"], |_, _| {});
    assert_eq!(board.halfmove_clock(), 0);
}
