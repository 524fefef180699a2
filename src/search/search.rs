use crate::board::Board;
use crate::moves::movegen::{generate_legal, generate_legal_captures};
use crate::moves::types::{Move, MoveList};
use crate::search::context::{Aborted, MAX_PLY, SearchContext};
use crate::search::eval::{CHECKMATE_SCORE, DRAW_SCORE, INF_SCORE, NONE_SCORE, static_eval};
use crate::search::ordering::{OrderHints, order_moves};
use crate::search::tt::{MoveSkeleton, NodeType, TranspositionTable};
use std::time::Duration;
use tracing::{debug, info};

/// Scores at least this far from zero are forced mates.
pub const MATE_THRESHOLD: i32 = CHECKMATE_SCORE - MAX_PLY as i32;
/// Deepest iteration either driver will start.
pub const MAX_SEARCH_DEPTH: u8 = 64;
/// Quiescence plies below the nominal horizon before stand-pat is forced.
pub const MAX_QUIESCENCE_PLY: usize = 32;

// Late move reductions
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_MOVES: usize = 3;

// Mate scores are stored relative to the node, not the root.
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// TT bound check shared by both searches.
fn tt_cutoff(flag: NodeType, score: i32, alpha: i32, beta: i32) -> bool {
    match flag {
        NodeType::Exact => true,
        NodeType::LowerBound => score >= beta,
        NodeType::UpperBound => score <= alpha,
    }
}

/// Depth reduction for the `idx`-th move, 0 when the move must be searched in full.
fn lmr_reduction(mv: Move, idx: usize, depth: i32, in_check: bool) -> i32 {
    if depth < LMR_MIN_DEPTH
        || idx < LMR_MIN_MOVES
        || in_check
        || mv.is_capture()
        || mv.is_promotion()
    {
        return 0;
    }
    let r = ((idx as u32 * depth as u32).ilog2() / 2).max(1) as i32;
    r.min(depth - 2)
}

/// Capture-only search below the horizon. All evasions are searched when in check.
pub fn quiescence(
    board: &mut Board,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
    ply: usize,
    qply: usize,
    mut alpha: i32,
    beta: i32,
) -> Result<i32, Aborted> {
    ctx.nodes += 1;
    ctx.clear_pv(ply);

    let in_check = board.in_check();
    let mut moves = MoveList::new();
    if in_check {
        generate_legal(board, &mut moves);
        if moves.is_empty() {
            return Ok(-CHECKMATE_SCORE + ply as i32);
        }
    } else {
        generate_legal_captures(board, &mut moves);
    }

    let hash = board.zobrist();
    let mut tt_move = MoveSkeleton::NONE;
    if let Some(entry) = tt.probe(hash) {
        tt_move = entry.best_move;
        let score = score_from_tt(entry.score as i32, ply);
        if tt_cutoff(entry.flag, score, alpha, beta) {
            return Ok(score);
        }
    }

    let original_alpha = alpha;
    if !in_check {
        let stand_pat = static_eval(board);
        if stand_pat >= beta {
            return Ok(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
    }

    if qply >= MAX_QUIESCENCE_PLY || ply >= MAX_PLY - 1 {
        return Ok(if in_check { static_eval(board) } else { alpha });
    }

    let hints = OrderHints {
        tt_move,
        ..OrderHints::default()
    };
    order_moves(&mut moves, board, &hints);

    let mut best_move = None;
    for &mv in moves.iter() {
        ctx.time.check_time()?;

        board.execute(mv);
        let result = quiescence(board, tt, ctx, ply + 1, qply + 1, -beta, -alpha);
        board.undo();
        let score = -result?;

        if score >= beta {
            tt.add(hash, score_to_tt(beta, ply), 0, NodeType::LowerBound, Some(mv));
            return Ok(beta);
        }
        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
    }

    let flag = if alpha > original_alpha {
        NodeType::Exact
    } else {
        NodeType::UpperBound
    };
    tt.add(hash, score_to_tt(alpha, ply), 0, flag, best_move);
    Ok(alpha)
}

/// One move's subtree under principal variation search: full window for the
/// first move, reduced then null-window probes for the rest, widening only
/// when a probe beats alpha.
#[allow(clippy::too_many_arguments)]
fn search_move(
    board: &mut Board,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
    mv: Move,
    idx: usize,
    depth: i32,
    ply: usize,
    alpha: i32,
    beta: i32,
    in_check: bool,
) -> Result<i32, Aborted> {
    if idx == 0 {
        return Ok(-alpha_beta(board, tt, ctx, depth - 1, ply + 1, -beta, -alpha)?);
    }

    let r = lmr_reduction(mv, idx, depth, in_check);
    let mut score = -alpha_beta(board, tt, ctx, depth - 1 - r, ply + 1, -alpha - 1, -alpha)?;

    if score > alpha && r > 0 {
        score = -alpha_beta(board, tt, ctx, depth - 1, ply + 1, -alpha - 1, -alpha)?;
    }
    if score > alpha && beta - alpha > 1 {
        score = -alpha_beta(board, tt, ctx, depth - 1, ply + 1, -beta, -alpha)?;
    }
    Ok(score)
}

/// Fail-hard negamax. The root (ply 0) never returns early from the TT or the
/// draw rules, so a playable root always yields a PV. Full-window nodes skip
/// TT cutoffs too, so the PV they report reaches the horizon.
pub fn alpha_beta(
    board: &mut Board,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
    depth: i32,
    ply: usize,
    mut alpha: i32,
    beta: i32,
) -> Result<i32, Aborted> {
    ctx.clear_pv(ply);

    if ply > 0 && board.is_rule_draw() {
        return Ok(DRAW_SCORE);
    }
    if depth <= 0 || ply >= MAX_PLY - 1 {
        return quiescence(board, tt, ctx, ply, 0, alpha, beta);
    }
    ctx.nodes += 1;

    let pv_node = beta - alpha > 1;
    let hash = board.zobrist();
    let mut tt_move = MoveSkeleton::NONE;
    if let Some(entry) = tt.probe(hash) {
        tt_move = entry.best_move;
        if ply > 0 && !pv_node && entry.depth as i32 >= depth {
            let score = score_from_tt(entry.score as i32, ply);
            if tt_cutoff(entry.flag, score, alpha, beta) {
                return Ok(score);
            }
        }
    }

    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);
    let in_check = board.in_check();
    if moves.is_empty() {
        return Ok(if in_check {
            -CHECKMATE_SCORE + ply as i32
        } else {
            DRAW_SCORE
        });
    }

    let hints = OrderHints {
        tt_move,
        pv_move: ctx.pv_hint(ply, &moves),
        killers: ctx.killers(ply),
    };
    order_moves(&mut moves, board, &hints);

    let original_alpha = alpha;
    let mut best_move = None;

    for (idx, &mv) in moves.iter().enumerate() {
        ctx.time.check_time()?;

        board.execute(mv);
        let result = search_move(board, tt, ctx, mv, idx, depth, ply, alpha, beta, in_check);
        board.undo();
        let score = result?;

        if score >= beta {
            if !mv.is_capture() {
                ctx.update_killer(ply, mv);
            }
            tt.add(
                hash,
                score_to_tt(beta, ply),
                depth as u8,
                NodeType::LowerBound,
                Some(mv),
            );
            return Ok(beta);
        }
        if score > alpha {
            alpha = score;
            best_move = Some(mv);
            ctx.update_pv(ply, mv);
        }
    }

    let flag = if alpha > original_alpha {
        NodeType::Exact
    } else {
        NodeType::UpperBound
    };
    tt.add(hash, score_to_tt(alpha, ply), depth as u8, flag, best_move);
    Ok(alpha)
}

/// How long a driver may search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchBudget {
    /// Iterate depth 1..=n.
    Depth(u8),
    /// Iterate until the wall-clock budget runs out.
    Time(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every iteration the driver started ran to the end.
    Completed,
    /// The deadline cut the last iteration short; its partial result was discarded.
    Aborted,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Score of the last completed depth, or `NONE_SCORE` when none completed.
    pub score: i32,
    pub pv: Vec<Move>,
    /// Last completed depth, 0 when none completed.
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub status: SearchStatus,
}

impl SearchReport {
    pub fn best_move(&self) -> Option<Move> {
        self.pv.first().copied()
    }

    pub fn is_mate(&self) -> bool {
        self.score != NONE_SCORE && self.score.abs() >= MATE_THRESHOLD
    }
}

/// Iterative deepening driver shared by both budgets.
pub fn search(board: &mut Board, tt: &mut TranspositionTable, budget: SearchBudget) -> SearchReport {
    let (max_depth, limit) = match budget {
        SearchBudget::Depth(d) => (d.clamp(1, MAX_SEARCH_DEPTH), None),
        SearchBudget::Time(t) => (MAX_SEARCH_DEPTH, Some(t)),
    };
    let mut ctx = SearchContext::new(limit);

    let mut report = SearchReport {
        score: NONE_SCORE,
        pv: Vec::new(),
        depth: 0,
        nodes: 0,
        elapsed: Duration::ZERO,
        status: SearchStatus::Completed,
    };

    for depth in 1..=max_depth {
        ctx.follow_pv = true;
        let result = alpha_beta(board, tt, &mut ctx, depth as i32, 0, -INF_SCORE, INF_SCORE);

        let Ok(score) = result else {
            debug!(depth, nodes = ctx.nodes, "search aborted, keeping depth {}", report.depth);
            report.status = SearchStatus::Aborted;
            break;
        };

        let pv = ctx.pv(0).to_vec();
        ctx.prev_pv.clear();
        ctx.prev_pv.extend(pv.iter().copied());

        report.score = score;
        report.depth = depth;
        report.pv = pv;

        info!(
            depth,
            score,
            nodes = ctx.nodes,
            elapsed_ms = ctx.time.elapsed().as_millis() as u64,
            tt_used = tt.occupied(),
            tt_permille = tt.usage_permille(),
            pv = %report.pv.iter().map(Move::to_uci).collect::<Vec<_>>().join(" "),
            "iteration complete"
        );

        if report.pv.is_empty() || score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    report.nodes = ctx.nodes;
    report.elapsed = ctx.time.elapsed();
    report
}

/// Fixed-depth iterative deepening.
pub fn search_depth(board: &mut Board, tt: &mut TranspositionTable, depth: u8) -> SearchReport {
    search(board, tt, SearchBudget::Depth(depth))
}

/// Time-boxed iterative deepening.
pub fn search_time(board: &mut Board, tt: &mut TranspositionTable, limit: Duration) -> SearchReport {
    search(board, tt, SearchBudget::Time(limit))
}
