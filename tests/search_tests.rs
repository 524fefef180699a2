use bitcastle::board::{Board, Color};
use bitcastle::search::context::MAX_PLY;
use bitcastle::search::eval::{CHECKMATE_SCORE, DRAW_SCORE, NONE_SCORE};
use bitcastle::search::search::{SearchBudget, SearchStatus, search, search_depth, search_time};
use bitcastle::search::tt::TranspositionTable;
use bitcastle::status::{GameResult, game_result};
use std::time::Duration;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid FEN")
}

#[test]
fn finds_back_rank_mate_at_every_depth() {
    for depth in 1..=3 {
        let mut b = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let mut tt = TranspositionTable::new(1);
        let report = search_depth(&mut b, &mut tt, depth);

        assert!(report.score >= CHECKMATE_SCORE - MAX_PLY as i32, "depth {depth}: {}", report.score);
        assert!(report.is_mate());
        let best = report.best_move().expect("a move is found");
        assert_eq!(best.to_uci(), "a1a8");

        b.execute(best);
        assert_eq!(game_result(&mut b), GameResult::Checkmate { winner: bitcastle::Color::White });
    }
}

#[test]
fn black_finds_mate_too() {
    let mut b = board("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 2);
    assert_eq!(report.best_move().map(|m| m.to_uci()), Some("a8a1".to_string()));
    assert_eq!(report.score, CHECKMATE_SCORE - 1);
}

#[test]
fn takes_hanging_queen() {
    let mut b = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 2);
    assert_eq!(report.best_move().map(|m| m.to_uci()), Some("d2d5".to_string()));
    assert!(report.score > 300);
}

#[test]
fn mated_root_reports_no_move() {
    let mut b = board("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 4);
    assert!(report.pv.is_empty());
    assert_eq!(report.score, -CHECKMATE_SCORE);
    assert_eq!(report.depth, 1);
}

#[test]
fn stalemated_root_scores_draw() {
    let mut b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 3);
    assert!(report.best_move().is_none());
    assert_eq!(report.score, DRAW_SCORE);
}

#[test]
fn iterative_deepening_reports_last_depth() {
    let mut b = Board::new();
    let before = b.clone();
    let mut tt = TranspositionTable::new(1);
    let report = search(&mut b, &mut tt, SearchBudget::Depth(3));
    assert_eq!(report.status, SearchStatus::Completed);
    assert_eq!(report.depth, 3);
    assert!(!report.pv.is_empty());
    assert!(report.pv.len() <= 3);
    assert!(report.nodes > 20);
    assert!(report.score.abs() < 200);
    assert_eq!(b, before);
    assert!(tt.occupied() >= report.depth as usize);
}

#[test]
fn pv_is_playable() {
    let mut b = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let mut tt = TranspositionTable::new(4);
    let report = search_depth(&mut b, &mut tt, 3);
    for mv in &report.pv {
        let legal = bitcastle::moves::movegen::legal_moves(&mut b);
        assert!(legal.contains(mv), "{mv} is not legal in {}", b.to_fen());
        b.execute(*mv);
    }
}

#[test]
fn time_budget_keeps_completed_result() {
    let mut b = Board::new();
    let before = b.clone();
    let mut tt = TranspositionTable::new(4);
    let report = search_time(&mut b, &mut tt, Duration::from_millis(300));
    assert_eq!(report.status, SearchStatus::Aborted);
    assert!(report.depth >= 1);
    assert_ne!(report.score, NONE_SCORE);
    assert!(report.best_move().is_some());
    assert_eq!(b, before, "aborted search must unwind the board");
}

#[test]
fn zero_time_means_nothing_completed() {
    let mut b = Board::new();
    let mut tt = TranspositionTable::new(1);
    let report = search_time(&mut b, &mut tt, Duration::ZERO);
    assert_eq!(report.status, SearchStatus::Aborted);
    assert_eq!(report.depth, 0);
    assert_eq!(report.score, NONE_SCORE);
    assert!(report.best_move().is_none());
    assert_eq!(b.history_len(), 0);
}

#[test]
fn fifty_move_draw_below_root() {
    // Any quiet reply triggers the fifty-move rule, so even a rook up is a draw.
    let mut b = board("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 2);
    assert_eq!(report.score, DRAW_SCORE);
    assert!(report.best_move().is_some());
}

fn play_line(b: &mut Board, line: &[bitcastle::Move]) {
    for mv in line {
        let legal = bitcastle::moves::movegen::legal_moves(b);
        assert!(legal.contains(mv), "{mv} is not legal in {}", b.to_fen());
        b.execute(*mv);
    }
}

const ROOK_SAC_MATE: &str = "kbK5/pp6/1P6/8/8/8/8/R7 w - - 0 1";

#[test]
fn finds_mate_in_two_behind_a_quiet_sacrifice() {
    let mut b = board(ROOK_SAC_MATE);
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 8);

    assert_eq!(report.score, CHECKMATE_SCORE - 3);
    assert_eq!(report.best_move().map(|m| m.to_uci()), Some("a1a6".to_string()));
    assert_eq!(report.pv.len(), 3, "pv: {:?}", report.pv);

    play_line(&mut b, &report.pv);
    assert_eq!(
        game_result(&mut b),
        GameResult::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn warm_table_gives_the_same_answer() {
    let mut fresh_board = board(ROOK_SAC_MATE);
    let mut fresh_tt = TranspositionTable::new(1);
    let fresh = search_depth(&mut fresh_board, &mut fresh_tt, 8);

    let mut b = board(ROOK_SAC_MATE);
    let mut tt = TranspositionTable::new(1);
    let first = search_depth(&mut b, &mut tt, 8);
    let second = search_depth(&mut b, &mut tt, 8);

    assert_eq!(first.score, fresh.score);
    assert_eq!(second.score, fresh.score);
    assert_eq!(second.best_move(), fresh.best_move());
}

#[test]
fn mate_pv_runs_to_the_mating_move() {
    // Rg1+ Kxg1 Rxf1 is a double check with every flight square covered.
    let mut b = board("6k1/pp4p1/2p5/2bp4/8/P5Pb/1P3rrP/2BRRN1K b - - 0 1");
    let mut tt = TranspositionTable::new(1);
    let report = search_depth(&mut b, &mut tt, 6);

    assert_eq!(report.score, CHECKMATE_SCORE - 3);
    assert_eq!(report.pv.len(), 3, "pv: {:?}", report.pv);

    play_line(&mut b, &report.pv);
    assert_eq!(
        game_result(&mut b),
        GameResult::Checkmate {
            winner: Color::Black
        }
    );
}
