//! End-to-end scenarios exercising move validation, path clearance, the
//! scratch-board safety gate and the checkmate search through the public API.

use patzer::chess::board::Board;
use patzer::chess::core::{Colour, PieceKind, Square};
use patzer::game::{Game, Player, TurnOutcome};
use pretty_assertions::assert_eq;

#[test]
fn opening_double_pawn_push() {
    // From the initial position the two-square advance is legal: the pawn is
    // on its home rank and the intervening square is empty.
    let mut game = Game::new();
    assert_eq!(game.advance_turn(Square::E2, Square::E4), TurnOutcome::Continue);
    let board = game.board();
    assert!(!board.is_occupied(Square::E2));
    assert_eq!(board.piece_at(Square::E4).map(|piece| piece.kind), Some(PieceKind::Pawn));
}

#[test]
fn double_push_blocked_by_intervening_piece() {
    // A piece on e3 blocks e2-e4 even though e4 itself is free.
    let board = Board::from_fen("7k/8/8/8/8/4n3/4P3/4K3").unwrap();
    assert!(!board.validate_move(Colour::White, Square::E2, Square::E4));
    // Pawns only capture diagonally, so the single step onto the blocker is
    // rejected as well.
    assert!(!board.validate_move(Colour::White, Square::E2, Square::E3));
}

#[test]
fn rook_stopped_by_first_piece_on_the_line() {
    // White rook on a4, black knights on c4 and e4. Moving onto or past e4
    // is blocked by the knight on c4; capturing c4 itself is fine.
    let board = Board::from_fen("7k/8/8/8/R1n1n3/8/8/7K").unwrap();
    assert!(board.validate_move(Colour::White, Square::A4, Square::B4));
    assert!(board.validate_move(Colour::White, Square::A4, Square::C4));
    assert!(!board.validate_move(Colour::White, Square::A4, Square::D4));
    assert!(!board.validate_move(Colour::White, Square::A4, Square::E4));
}

#[test]
fn scratch_board_simulation_is_isolated() {
    let original = Board::starting();
    let mut scratch = original.clone();
    scratch.commit_move(Square::G1, Square::F3);
    scratch.commit_move(Square::E7, Square::E5);
    assert_eq!(original.fen(), Board::starting().fen());
    assert_ne!(scratch.fen(), original.fen());
}

#[test]
fn back_rank_mate_has_no_resolving_move() {
    // Black rook on a1 delivers a back-rank mate: the white king's pawns box
    // it in and no white piece can capture or interpose.
    let board = Board::from_fen("6k1/8/8/8/8/8/5PPP/r5K1").unwrap();
    assert!(board.in_check(Colour::White));
    assert!(!board.has_any_legal_move(Colour::White));
}

#[test]
fn checkmate_search_handles_crowded_boards() {
    // FEN only requires one king per side, so a side may field far more
    // pieces than a legal game could produce. The search must still answer:
    // the rook on a7 runs down the open a-file and captures the checker.
    let board = Board::from_fen("rrrrrrrr/rrrrrrrr/1r6/8/8/R7/8/k2K4").unwrap();
    assert!(board.in_check(Colour::Black));
    assert!(board.has_any_legal_move(Colour::Black));
}

#[test]
fn interposition_is_the_only_resolution() {
    // Back-rank check with the king boxed in by its own pawns: no flight
    // square exists and the checker on a1 is out of reach, so the only way
    // out is the rook dropping from b5 to b1 onto the checking line.
    let board = Board::from_fen("6k1/8/8/1R6/8/8/5PPP/r5K1").unwrap();
    assert!(board.in_check(Colour::White));
    assert!(board.has_any_legal_move(Colour::White));
    // Without the rook the same position is mate, so the resolution above
    // can only have come from the blockable-square widening.
    let board = Board::from_fen("6k1/8/8/8/8/8/5PPP/r5K1").unwrap();
    assert!(board.in_check(Colour::White));
    assert!(!board.has_any_legal_move(Colour::White));
}

#[test]
fn interposition_resolves_a_bishop_check() {
    // The bishop on b4 checks the king through c3 and d2; the rook on c1 can
    // interpose on c3.
    let board = Board::from_fen("7k/8/8/8/1b6/8/8/2R1K3").unwrap();
    assert!(board.in_check(Colour::White));
    assert!(board.has_any_legal_move(Colour::White));
}

#[test]
fn capturing_the_checker_resolves_the_check() {
    // A knight check can not be blocked, only captured or stepped away from.
    // Here the e-pawn takes the knight.
    let board = Board::from_fen("7k/8/8/8/8/3n4/R2PPP2/4K3").unwrap();
    assert!(board.in_check(Colour::White));
    assert!(board.has_any_legal_move(Colour::White));
}

#[test]
fn smothered_mate_by_a_knight() {
    // The black king is boxed in by its own pieces and the knight can not be
    // captured: checkmate.
    let board = Board::from_fen("6rk/5Npp/8/8/8/8/8/7K").unwrap();
    assert!(board.in_check(Colour::Black));
    assert!(!board.has_any_legal_move(Colour::Black));
}

#[test]
fn king_steps_out_of_a_double_check() {
    // Rook on e8 and bishop on h4 both check the king; no single capture or
    // block resolves both, but the king can step to d1 or d2.
    let board = Board::from_fen("4r2k/8/8/8/7b/8/8/4K3").unwrap();
    assert!(board.in_check(Colour::White));
    assert!(board.has_any_legal_move(Colour::White));
}

#[test]
fn discovered_self_check_is_rejected() {
    // The knight on e5 shields its king from the rook on e8. Moving the
    // knight is geometrically fine but exposes the king, so the attempt is
    // rejected and the board stays untouched.
    let mut board = Board::from_fen("4r2k/8/8/4N3/8/8/8/4K3").unwrap();
    let white = Player::new(Colour::White);
    let before = board.fen();
    assert!(board.validate_move(Colour::White, Square::E5, Square::C6));
    assert!(!white.attempt_move(&mut board, Square::E5, Square::C6));
    assert_eq!(board.fen(), before);
}

#[test]
fn fools_mate_through_the_game_loop() {
    let mut game = Game::new();
    for (from, to) in [
        (Square::F2, Square::F3),
        (Square::E7, Square::E5),
        (Square::G2, Square::G4),
    ] {
        assert_eq!(game.advance_turn(from, to), TurnOutcome::Continue);
    }
    assert_eq!(
        game.advance_turn(Square::D8, Square::H4),
        TurnOutcome::BlackWins
    );
}

#[test]
fn check_must_be_addressed() {
    // White is in check from the rook on e8; pushing the a-pawn ignores the
    // check and is rejected, while blocking on e5 is accepted.
    let board = Board::from_fen("4r2k/8/8/8/8/8/R6P/4K3").unwrap();
    let mut game = Game::with_position(board, Colour::White);
    assert!(game.is_check());
    assert_eq!(game.advance_turn(Square::H2, Square::H3), TurnOutcome::Rejected);
    assert_eq!(game.advance_turn(Square::A2, Square::E2), TurnOutcome::Continue);
    assert!(!game.is_check());
    assert_eq!(game.side_to_move(), Colour::Black);
}
