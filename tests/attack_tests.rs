use bitcastle::board::{Board, Color};
use bitcastle::moves::attacks::{attacks_by, in_check, is_square_attacked};
use bitcastle::moves::movegen::MoveGen;
use bitcastle::square::Square;
use std::str::FromStr;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid FEN")
}

#[test]
fn opponent_attack_maps() {
    let cases = [
        (
            "r1bk1bnr/p1p2ppp/1pnp4/1B2p3/4P2q/P1N2N1P/1PPP1PP1/R1BQK2R w KQ - 0 7",
            6836459791116673024u64,
        ),
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            18427602327210643456,
        ),
        ("5b1k/6Q1/1r6/4K3/r7/8/3r1r2/8 b - - 0 1", 16194935981344833600),
    ];
    for (fen, expected) in cases {
        let b = board(fen);
        let them = b.side_to_move().opposite();
        assert_eq!(attacks_by(&b, them), expected, "{fen}");
        assert_eq!(MoveGen::new(&b).opponent_attacks(), expected, "{fen}");
    }
}

#[test]
fn illegal_check_detection() {
    // Quiet opening position: nobody is left in check.
    let quiet = board("r1bk1bnr/p1p2ppp/1pnp4/1B2p3/4P2q/P1N2N1P/1PPP1PP1/R1BQK2R w KQ - 0 7");
    assert!(!quiet.in_illegal_check());

    // Black to move while the white king on e1 faces the queen on e6.
    let exposed = board("rnb1kbnr/ppp1pppp/4q3/8/8/2N2N2/PPPP1PPP/R1BQKB1R b KQkq - 3 4");
    assert!(exposed.in_illegal_check());

    let touching_kings = board("8/8/8/4k3/3K4/8/8/8 w - - 0 1");
    assert!(touching_kings.in_illegal_check());
}

#[test]
fn side_to_move_check() {
    let b = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(b.in_check());
    assert!(in_check(&b, Color::White));
    assert!(!in_check(&b, Color::Black));
    let e1 = Square::from_str("e1").expect("valid square");
    assert!(is_square_attacked(&b, e1, Color::Black));
}
