use crate::board::Board;
use crate::moves::movegen::generate_legal;
use crate::moves::types::{Move, MoveList};
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only trace details for shallow divides

/// Per-edge tallies over a perft tree. `checks`/`checkmates` are counted at leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

/// Leaf count of the legal move tree `depth` plies deep.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    perft_inner(board, depth)
}

fn perft_inner(board: &mut Board, depth: u32) -> u64 {
    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);
    // Bulk count: the legal list already is the next ply.
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for &mv in moves.iter() {
        board.execute(mv);
        nodes += perft_inner(board, depth - 1);
        board.undo();
    }
    nodes
}

/// Per-root-move leaf counts, in generation order.
#[instrument(skip(board), fields(depth))]
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);

    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = moves.len(), "divide: root legal moves");
    }

    let mut out = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        board.execute(mv);
        let count = if depth <= 1 { 1 } else { perft_inner(board, depth - 1) };
        board.undo();

        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, nodes = count, "divide: root child total");
        }
        out.push((mv, count));
    }

    debug!(depth, total = out.iter().map(|(_, n)| n).sum::<u64>(), "divide: total");
    out
}

fn breakdown_recursive(board: &mut Board, depth: u32, out: &mut PerftCounters) {
    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);

    if depth == 0 {
        out.nodes += 1;
        if board.in_check() {
            out.checks += 1;
            if moves.is_empty() {
                out.checkmates += 1;
            }
        }
        return;
    }

    for &mv in moves.iter() {
        if mv.is_capture() {
            out.captures += 1;
            if mv.is_en_passant() {
                out.ep_captures += 1;
            }
        }
        if mv.is_castling() {
            out.castles += 1;
        }
        if mv.is_promotion() {
            out.promotions += 1;
        }

        #[cfg(debug_assertions)]
        let z0 = board.zobrist();

        board.execute(mv);
        breakdown_recursive(board, depth - 1, out);
        board.undo();

        #[cfg(debug_assertions)]
        debug_assert_eq!(board.zobrist(), z0, "zobrist changed across execute/undo");
    }
}

/// Perft with capture/castle/promotion/check tallies, for diagnosing generator bugs.
pub fn perft_with_breakdown(board: &mut Board, depth: u32) -> PerftCounters {
    let mut out = PerftCounters::default();
    breakdown_recursive(board, depth, &mut out);
    out
}
