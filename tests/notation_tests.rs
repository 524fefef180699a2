use bitcastle::board::{Board, Piece};
use bitcastle::moves::types::Move;
use bitcastle::square::Square;
use std::str::FromStr;

const OPENING: &str = "r1bk1bnr/p1p2ppp/1pnp4/1B2p3/4P2q/P1N2N1P/1PPP1PP1/R1BQK2R w KQ - 0 7";

fn mv(fen: &str, from: &str, to: &str, piece: Piece, promo: Option<Piece>) -> Move {
    let b = Board::from_fen(fen).expect("valid FEN");
    Move::classify(
        &b,
        Square::from_str(from).expect("valid square"),
        Square::from_str(to).expect("valid square"),
        piece,
        promo,
    )
}

#[test]
fn long_algebraic() {
    let cases = [
        (OPENING, "g2", "g3", Piece::Pawn, None, "g2-g3"),
        (OPENING, "h1", "f1", Piece::Rook, None, "Rh1-f1"),
        (OPENING, "c3", "d5", Piece::Knight, None, "Nc3-d5"),
        (OPENING, "f3", "h4", Piece::Knight, None, "Nf3xh4"),
        (OPENING, "b5", "c6", Piece::Bishop, None, "Bb5xc6"),
        (OPENING, "f3", "e5", Piece::Knight, None, "Nf3xe5"),
        (
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "e1", "g1", Piece::King, None, "0-0",
        ),
        (
            "r1bqk2r/pppp1ppp/2nb1n2/4p3/2B1P3/2P2N2/PP1P1PPP/RNBQ1RK1 b kq - 0 5",
            "e8", "g8", Piece::King, None, "0-0",
        ),
        (
            "r1bq1rk1/ppppbppp/2n2n2/4p1B1/4P3/2NP4/PPPQ1PPP/R3KBNR w KQ - 5 6",
            "e1", "c1", Piece::King, None, "0-0-0",
        ),
        (
            "r3kbnr/pp2pppp/1qn5/3pP3/3P2b1/5N2/PP2BPPP/RNBQ1RK1 b kq - 6 8",
            "e8", "c8", Piece::King, None, "0-0-0",
        ),
        ("8/1P6/4k3/1K6/8/8/8/8 w - - 0 1", "b7", "b8", Piece::Pawn, Some(Piece::Queen), "b7-b8=Q"),
        ("8/1P6/4k3/1K6/8/8/8/8 w - - 0 1", "b7", "b8", Piece::Pawn, Some(Piece::Rook), "b7-b8=R"),
        ("8/8/4k3/1K6/8/8/1p6/8 b - - 0 1", "b2", "b1", Piece::Pawn, Some(Piece::Bishop), "b2-b1=B"),
        ("8/8/4k3/1K6/8/8/1p6/8 b - - 0 1", "b2", "b1", Piece::Pawn, Some(Piece::Knight), "b2-b1=N"),
    ];
    for (fen, from, to, piece, promo, expected) in cases {
        let m = mv(fen, from, to, piece, promo);
        assert_eq!(m.notation(), expected);
        assert_eq!(format!("{m:#}"), expected);
    }
}

#[test]
fn uci_form() {
    let cases = [
        (OPENING, "g2", "g3", Piece::Pawn, None, "g2g3"),
        (OPENING, "f3", "h4", Piece::Knight, None, "f3h4"),
        (OPENING, "b5", "c6", Piece::Bishop, None, "b5c6"),
        (
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "e1", "g1", Piece::King, None, "e1g1",
        ),
        (
            "r3kbnr/pp2pppp/1qn5/3pP3/3P2b1/5N2/PP2BPPP/RNBQ1RK1 b kq - 6 8",
            "e8", "c8", Piece::King, None, "e8c8",
        ),
        ("8/1P6/4k3/1K6/8/8/8/8 w - - 0 1", "b7", "b8", Piece::Pawn, Some(Piece::Queen), "b7b8q"),
        ("8/8/4k3/1K6/8/8/1p6/8 b - - 0 1", "b2", "b1", Piece::Pawn, Some(Piece::Knight), "b2b1n"),
    ];
    for (fen, from, to, piece, promo, expected) in cases {
        let m = mv(fen, from, to, piece, promo);
        assert_eq!(m.to_uci(), expected);
        assert_eq!(m.to_string(), expected);
    }
}
