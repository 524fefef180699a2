use crate::moves::types::Move;
use arrayvec::ArrayVec;
use std::time::{Duration, Instant};

/// Hard ceiling on distance from the root, quiescence included.
pub const MAX_PLY: usize = 128;

pub type PvLine = ArrayVec<Move, MAX_PLY>;

/// Returned up the stack when the deadline passes mid-search. Carries no score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aborted;

pub struct TimeManager {
    pub start_time: Instant,
    pub allotted: Option<Duration>,
    pub stop_signal: bool,
}

impl TimeManager {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start_time: Instant::now(),
            allotted: limit,
            stop_signal: false,
        }
    }

    /// `Err(Aborted)` once the allotted time is spent. Sticky: after the first
    /// miss every later call fails too.
    #[inline]
    pub fn check_time(&mut self) -> Result<(), Aborted> {
        if !self.stop_signal
            && let Some(limit) = self.allotted
            && self.start_time.elapsed() >= limit
        {
            self.stop_signal = true;
        }
        if self.stop_signal { Err(Aborted) } else { Ok(()) }
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Everything one search mutates besides the board and the TT.
pub struct SearchContext {
    pub killer_moves: Vec<[Option<Move>; 2]>,
    pv_table: Vec<PvLine>,
    /// PV of the last completed iteration, used to seed ordering.
    pub prev_pv: PvLine,
    /// True while the current path still matches `prev_pv`.
    pub follow_pv: bool,
    pub nodes: u64,
    pub time: TimeManager,
}

impl SearchContext {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            killer_moves: vec![[None; 2]; MAX_PLY],
            pv_table: vec![PvLine::new(); MAX_PLY + 1],
            prev_pv: PvLine::new(),
            follow_pv: false,
            nodes: 0,
            time: TimeManager::new(limit),
        }
    }

    pub fn killers(&self, ply: usize) -> [Option<Move>; 2] {
        self.killer_moves.get(ply).copied().unwrap_or([None; 2])
    }

    pub fn update_killer(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.killer_moves.get_mut(ply) else {
            return;
        };
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    /// Forget everything from a previous position: killers, PV, counters.
    pub fn clear(&mut self, limit: Option<Duration>) {
        self.killer_moves.fill([None; 2]);
        self.pv_table.iter_mut().for_each(|line| line.clear());
        self.prev_pv.clear();
        self.follow_pv = false;
        self.nodes = 0;
        self.time = TimeManager::new(limit);
    }

    #[inline]
    pub fn clear_pv(&mut self, ply: usize) {
        if let Some(line) = self.pv_table.get_mut(ply) {
            line.clear();
        }
    }

    /// `pv[ply] = mv :: pv[ply + 1]`.
    pub fn update_pv(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        let (head, tail) = self.pv_table.split_at_mut(ply + 1);
        let line = &mut head[ply];
        line.clear();
        line.push(mv);
        for &m in tail[0].iter().take(MAX_PLY - 1) {
            line.push(m);
        }
    }

    pub fn pv(&self, ply: usize) -> &[Move] {
        self.pv_table.get(ply).map_or(&[], |l| l.as_slice())
    }

    /// PV move to try first at `ply`, if the path so far followed the previous PV.
    pub fn pv_hint(&mut self, ply: usize, moves: &[Move]) -> Option<Move> {
        if !self.follow_pv {
            return None;
        }
        let hint = self.prev_pv.get(ply).copied().filter(|m| moves.contains(m));
        self.follow_pv = hint.is_some();
        hint
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::moves::types::QUIET;
    use crate::square::Square;

    fn mv(from: u8, to: u8) -> Move {
        Move::new(
            Square::from_index(from),
            Square::from_index(to),
            Piece::Knight,
            None,
            QUIET,
        )
    }

    #[test]
    fn killer_shift_skips_duplicates() {
        let mut ctx = SearchContext::default();
        ctx.update_killer(3, mv(1, 18));
        ctx.update_killer(3, mv(1, 18));
        assert_eq!(ctx.killers(3), [Some(mv(1, 18)), None]);
        ctx.update_killer(3, mv(6, 21));
        assert_eq!(ctx.killers(3), [Some(mv(6, 21)), Some(mv(1, 18))]);
        ctx.clear(None);
        assert_eq!(ctx.killers(3), [None, None]);
    }

    #[test]
    fn pv_prepends_child_line() {
        let mut ctx = SearchContext::default();
        ctx.update_pv(2, mv(10, 20));
        ctx.update_pv(1, mv(5, 15));
        ctx.update_pv(0, mv(1, 18));
        assert_eq!(ctx.pv(0), &[mv(1, 18), mv(5, 15), mv(10, 20)]);
    }

    #[test]
    fn zero_budget_aborts() {
        let mut tm = TimeManager::new(Some(Duration::ZERO));
        assert_eq!(tm.check_time(), Err(Aborted));
        let mut unlimited = TimeManager::new(None);
        assert_eq!(unlimited.check_time(), Ok(()));
    }
}
