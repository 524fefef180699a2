use crate::board::{Board, Piece};
use crate::moves::types::Move;
use crate::search::tt::MoveSkeleton;

pub const TT_MOVE_SCORE: i32 = 3000;
pub const PV_MOVE_SCORE: i32 = 2500;
pub const KILLER1_SCORE: i32 = 2000;
pub const KILLER2_SCORE: i32 = 1900;
/// Non-capturing promotions rank just below the weakest capture.
pub const QUIET_PROMOTION_SCORE: i32 = 90;

/// `MVV_LVA[victim][aggressor]`, both in `Piece` order (P, N, B, R, Q, K).
/// Victim value dominates; among equal victims the cheaper aggressor wins.
#[rustfmt::skip]
pub const MVV_LVA: [[i32; 6]; 6] = [
    //  P    N    B    R    Q    K   <- aggressor
    [ 105, 104, 103, 102, 101, 100 ], // pawn victim
    [ 205, 204, 203, 202, 201, 200 ], // knight
    [ 305, 304, 303, 302, 301, 300 ], // bishop
    [ 405, 404, 403, 402, 401, 400 ], // rook
    [ 505, 504, 503, 502, 501, 500 ], // queen
    [ 999, 999, 999, 999, 999, 999 ], // king
];

/// MVV-LVA score of a capture, 0 for anything else. En passant is pawn takes pawn.
pub fn mvv_lva_score(mv: Move, board: &Board) -> i32 {
    if !mv.is_capture() {
        return 0;
    }
    let victim = if mv.is_en_passant() {
        Piece::Pawn
    } else {
        match board.piece_of(board.side_to_move().opposite(), mv.to) {
            Some(p) => p,
            None => return 0,
        }
    };
    MVV_LVA[victim as usize][mv.piece as usize]
}

/// Ordering hints available at one node.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderHints {
    pub tt_move: MoveSkeleton,
    pub pv_move: Option<Move>,
    pub killers: [Option<Move>; 2],
}

#[inline]
pub fn move_score(mv: Move, board: &Board, hints: &OrderHints) -> i32 {
    if hints.tt_move.matches(&mv) {
        return TT_MOVE_SCORE;
    }
    if hints.pv_move == Some(mv) {
        return PV_MOVE_SCORE;
    }
    if hints.killers[0] == Some(mv) {
        return KILLER1_SCORE;
    }
    if hints.killers[1] == Some(mv) {
        return KILLER2_SCORE;
    }
    if mv.is_capture() {
        return mvv_lva_score(mv, board);
    }
    if mv.is_promotion() {
        return QUIET_PROMOTION_SCORE;
    }
    0
}

/// Stable sort, best first: equal-scored moves keep generation order.
pub fn order_moves(moves: &mut [Move], board: &Board, hints: &OrderHints) {
    moves.sort_by_cached_key(|&mv| -move_score(mv, board, hints));
}
