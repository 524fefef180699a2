//! Driver-facing facade: one game, one board, one transposition table.
//!
//! A GUI or a protocol adapter talks to this type only. Moves handed to
//! [`Engine::make_move`] are trusted; use [`Engine::parse_uci_move`] or
//! [`Engine::legal_moves`] to obtain them.

use crate::board::{Board, Piece};
use crate::error::{EngineError, EngineResult};
use crate::moves::movegen::legal_moves;
use crate::moves::types::{Move, MoveList};
use crate::search::search::{SearchBudget, SearchReport, search};
use crate::search::tt::{DEFAULT_TT_MB, TranspositionTable};
use crate::square::Square;
use crate::status::{GameResult, game_result};
use std::str::FromStr;
use tracing::debug;

pub struct Engine {
    board: Board,
    tt: TranspositionTable,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_tt_size(DEFAULT_TT_MB)
    }

    pub fn with_tt_size(size_mb: usize) -> Self {
        Engine {
            board: Board::new(),
            tt: TranspositionTable::new(size_mb),
        }
    }

    /// Starting position, empty TT.
    pub fn new_game(&mut self) {
        self.board.reset();
        self.tt.reset();
    }

    /// Replace the position. On error the current position is kept.
    pub fn set_position(&mut self, fen: &str) -> EngineResult<()> {
        self.board.set_fen(fen)?;
        debug!(fen, "position set");
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn legal_moves(&mut self) -> MoveList {
        legal_moves(&mut self.board)
    }

    /// Play `mv`, which must be legal in the current position.
    pub fn make_move(&mut self, mv: Move) {
        self.board.execute(mv);
    }

    /// Take back the last move made through this engine.
    pub fn unmake_move(&mut self) -> EngineResult<()> {
        if self.board.history_len() == 0 {
            return Err(EngineError::NothingToUndo);
        }
        self.board.undo();
        Ok(())
    }

    /// Find the legal move written as `e2e4` / `e7e8q`.
    pub fn parse_uci_move(&mut self, text: &str) -> EngineResult<Move> {
        let illegal = || EngineError::IllegalMove(text.to_string());

        let (from, to) = match (text.get(0..2), text.get(2..4)) {
            (Some(f), Some(t)) => (
                Square::from_str(f).map_err(|_| illegal())?,
                Square::from_str(t).map_err(|_| illegal())?,
            ),
            _ => return Err(illegal()),
        };
        let promotion = match text.get(4..) {
            None | Some("") => None,
            Some("q") => Some(Piece::Queen),
            Some("r") => Some(Piece::Rook),
            Some("b") => Some(Piece::Bishop),
            Some("n") => Some(Piece::Knight),
            Some(_) => return Err(illegal()),
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or_else(illegal)
    }

    /// Parse and play a UCI move in one step.
    pub fn play_uci(&mut self, text: &str) -> EngineResult<Move> {
        let mv = self.parse_uci_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }

    pub fn search_best_move(&mut self, budget: SearchBudget) -> SearchReport {
        search(&mut self.board, &mut self.tt, budget)
    }

    pub fn game_result(&mut self) -> GameResult {
        game_result(&mut self.board)
    }
}
