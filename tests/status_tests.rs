use bitcastle::board::{Board, Color};
use bitcastle::status::{GameResult, game_result};

fn result(fen: &str) -> GameResult {
    let mut b = Board::from_fen(fen).expect("valid FEN");
    let before = b.clone();
    let r = game_result(&mut b);
    assert_eq!(b, before, "status check changed the board");
    r
}

#[test]
fn checkmates() {
    assert_eq!(
        result("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
        GameResult::Checkmate { winner: Color::Black }
    );
    assert_eq!(
        result("6k1/5pp1/7p/8/8/8/5PPP/3r2K1 w - - 0 30"),
        GameResult::Checkmate { winner: Color::Black }
    );
}

#[test]
fn stalemate() {
    let r = result("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(r, GameResult::Stalemate);
    assert!(r.is_draw());
}

#[test]
fn fifty_move_rule() {
    assert_eq!(
        result("4k3/8/8/8/8/8/4P3/4K3 w - - 100 70"),
        GameResult::FiftyMoveRule
    );
    assert_eq!(result("4k3/8/8/8/8/8/4P3/4K3 w - - 99 70"), GameResult::InPlay);
}

#[test]
fn only_bare_kings_count_as_insufficient() {
    assert_eq!(result("8/8/4k3/8/8/3K4/8/8 w - - 0 1"), GameResult::InsufficientMaterial);
    // Coarse rule: a lone minor piece keeps the game going.
    assert_eq!(result("8/8/4k3/8/8/3KN3/8/8 w - - 0 1"), GameResult::InPlay);
}

#[test]
fn check_is_not_mate_when_escapable() {
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/3KR3 b - - 0 1").expect("valid FEN").in_check());
    let r = result("4k3/8/8/8/8/8/8/3KR3 b - - 0 1");
    assert_eq!(r, GameResult::InPlay);
    assert!(!r.is_over());
}
