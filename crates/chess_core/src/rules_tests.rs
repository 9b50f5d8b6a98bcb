use super::*;

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

#[test]
fn test_pawn_attacks_diagonals_only() {
    let b = Board::from_fen("8/8/8/8/4P3/8/8/8 w - - 0 1");
    assert!(is_square_attacked(&b, sq(5, 4), Color::White));
    assert!(is_square_attacked(&b, sq(5, 6), Color::White));
    assert!(!is_square_attacked(&b, sq(5, 5), Color::White));
    assert!(!is_square_attacked(&b, sq(3, 4), Color::White));
}

#[test]
fn test_knight_attack() {
    let b = Board::from_fen("8/8/8/8/4N3/8/8/8 w - - 0 1");
    // Knight on e4 hits d6/f6 but never the adjacent squares
    assert!(is_square_attacked(&b, sq(6, 4), Color::White));
    assert!(is_square_attacked(&b, sq(6, 6), Color::White));
    assert!(!is_square_attacked(&b, sq(5, 5), Color::White));
}

#[test]
fn test_slider_attack_blocked() {
    // White rook a1, black pawn a4: the file ray stops at the pawn
    let b = Board::from_fen("8/8/8/8/p7/8/8/R7 w - - 0 1");
    assert!(is_square_attacked(&b, sq(3, 1), Color::White));
    assert!(is_square_attacked(&b, sq(4, 1), Color::White));
    assert!(!is_square_attacked(&b, sq(5, 1), Color::White));
    assert!(is_square_attacked(&b, sq(1, 8), Color::White));
}

#[test]
fn test_in_check_by_queen() {
    let b = Board::from_fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(is_in_check(&b, Color::Black));
    assert!(!is_in_check(&b, Color::White));
}

#[test]
fn test_missing_king_is_not_in_check() {
    let b = Board::from_fen("8/8/8/4k3/8/8/8/4R3 b - - 0 1");
    assert!(is_in_check(&b, Color::Black));
    // No white king on the board at all
    assert!(!is_in_check(&b, Color::White));
}

#[test]
fn test_pinned_knight_has_no_legal_moves() {
    // Knight on e3 shields its king from the rook on e8
    let b = Board::from_fen("4r3/8/8/8/8/4N3/8/4K3 w - - 0 1");
    assert!(!movegen::pseudo_legal_moves(&b, sq(3, 5)).is_empty());
    assert!(legal_moves(&b, sq(3, 5)).is_empty());
}

#[test]
fn test_pinned_rook_slides_along_the_pin() {
    let b = Board::from_fen("4r3/8/8/8/8/4R3/8/4K3 w - - 0 1");
    let moves = legal_moves(&b, sq(3, 5));
    assert_eq!(moves.len(), 6, "file moves including the capture stay legal");
    for mv in &moves {
        assert_eq!(mv.to.col(), 5, "leaving the e-file would expose the king");
    }
}

#[test]
fn test_king_cannot_step_into_check() {
    // Kings in opposition: e3 king may not approach the e5 king
    let b = Board::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1");
    let moves = legal_moves(&b, sq(3, 5));
    assert_eq!(moves.len(), 5);
    for mv in &moves {
        assert!(mv.to.row() <= 3, "rank 4 squares touch the enemy king");
    }
}

#[test]
fn test_checked_king_must_leave_the_file() {
    let b = Board::from_fen("4r3/8/8/8/8/8/8/4K3 w - - 0 1");
    let moves = all_legal_moves(&b, Color::White);
    assert_eq!(moves.len(), 4);
    for mv in &moves {
        assert_ne!(mv.to.col(), 5);
    }
}

#[test]
fn test_double_check_only_the_king_may_move() {
    // Re1 and Nf6 both check the e8 king. The a6 rook can capture the
    // knight or block the file, never both, so only king moves survive.
    let b = Board::from_fen("4k3/8/r4N2/8/8/8/8/4R1K1 b - - 0 1");
    assert!(is_in_check(&b, Color::Black));
    assert!(!is_in_checkmate(&b, Color::Black));
    assert!(legal_moves(&b, sq(6, 1)).is_empty());

    let moves = all_legal_moves(&b, Color::Black);
    assert_eq!(moves.len(), 3, "d8, f8 and f7 escape the double check");
    for mv in &moves {
        assert_eq!(mv.from, sq(8, 5));
    }
}

#[test]
fn test_all_legal_moves_startpos() {
    let b = Board::startpos();
    assert_eq!(all_legal_moves(&b, Color::White).len(), 20);
    assert_eq!(all_legal_moves(&b, Color::Black).len(), 20);
    assert!(has_any_legal_move(&b, Color::White));
}

#[test]
fn test_scholars_mate_is_checkmate() {
    let b = Board::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(is_in_check(&b, Color::Black));
    assert!(is_in_checkmate(&b, Color::Black));
    assert!(!is_in_stalemate(&b, Color::Black));
    assert!(all_legal_moves(&b, Color::Black).is_empty());
}

#[test]
fn test_fools_mate_is_checkmate() {
    let b = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(is_in_checkmate(&b, Color::White));
    assert!(!is_in_checkmate(&b, Color::Black));
}

#[test]
fn test_stalemate_is_not_checkmate() {
    let b = Board::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(is_in_stalemate(&b, Color::Black));
    assert!(!is_in_checkmate(&b, Color::Black));
    assert!(!is_in_check(&b, Color::Black));
}

#[test]
fn test_check_with_escape_is_not_checkmate() {
    let b = Board::from_fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(is_in_check(&b, Color::Black));
    assert!(!is_in_checkmate(&b, Color::Black));
    assert!(has_any_legal_move(&b, Color::Black));
}

#[test]
fn test_mate_and_stalemate_are_mutually_exclusive() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
    ];
    for fen in fens {
        let b = Board::from_fen(fen);
        for side in [Color::White, Color::Black] {
            assert!(
                !(is_in_checkmate(&b, side) && is_in_stalemate(&b, side)),
                "mate and stalemate both true for {fen}"
            );
            if is_in_checkmate(&b, side) {
                assert!(is_in_check(&b, side), "mate without check for {fen}");
            }
            if is_in_stalemate(&b, side) {
                assert!(!is_in_check(&b, side), "stalemate in check for {fen}");
            }
        }
    }
}

#[test]
fn test_legal_moves_never_leave_own_king_attacked() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
        "8/2k5/8/8/3RK3/8/8/8 w - - 0 1",
    ];
    for fen in fens {
        let b = Board::from_fen(fen);
        for from in Square::all() {
            let Some(pc) = b.get(from) else {
                continue;
            };
            for mv in legal_moves(&b, from) {
                let mut trial = b.clone();
                trial.make_move(mv);
                assert!(
                    !is_in_check(&trial, pc.color),
                    "{mv} in {fen} leaves the king attacked"
                );
            }
        }
    }
}
