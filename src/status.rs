use crate::board::{Board, Color};
use crate::moves::movegen::has_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InPlay,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl GameResult {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameResult::InPlay
    }

    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameResult::Stalemate | GameResult::FiftyMoveRule | GameResult::InsufficientMaterial
        )
    }
}

/// Only the kings remain. K+minor vs K still counts as in play.
pub fn is_insufficient_material(board: &Board) -> bool {
    board.only_kings_left()
}

pub fn is_draw_by_fifty_move(board: &Board) -> bool {
    board.is_fifty_move_draw()
}

/// Classify the current position.
///
/// Priority (highest → lowest):
///  1) `InsufficientMaterial`
///  2) `FiftyMoveRule`         (halfmove_clock ≥ 100)
///  3) `Checkmate` / `Stalemate` / `InPlay`
pub fn game_result(board: &mut Board) -> GameResult {
    if is_insufficient_material(board) {
        return GameResult::InsufficientMaterial;
    }
    if is_draw_by_fifty_move(board) {
        return GameResult::FiftyMoveRule;
    }

    if has_legal_move(board) {
        GameResult::InPlay
    } else if board.in_check() {
        GameResult::Checkmate {
            winner: board.side_to_move().opposite(),
        }
    } else {
        GameResult::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn start_position_in_play() {
        let mut b = Board::new();
        assert_eq!(game_result(&mut b), GameResult::InPlay);
        assert!(!game_result(&mut b).is_over());
    }

    #[test]
    fn back_rank_mate_names_winner() {
        let mut b = Board::from_str("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").expect("valid FEN");
        assert_eq!(
            game_result(&mut b),
            GameResult::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn bare_kings_beat_clock() {
        let mut b = Board::from_str("8/8/4k3/8/8/3K4/8/8 w - - 120 80").expect("valid FEN");
        assert_eq!(game_result(&mut b), GameResult::InsufficientMaterial);
        assert!(game_result(&mut b).is_draw());
    }
}
