use crate::board::castle_bits::*;
use crate::board::{Board, Color, Piece};
use crate::hash::zobrist::{xor_castling_rights_delta, zobrist_keys};
use crate::moves::types::Move;
use crate::square::Square;

/// (king_from, king_to, rook_from, rook_to) for each castle.
#[inline(always)]
fn castle_squares(color: Color, kingside: bool) -> (u8, u8, u8, u8) {
    match (color, kingside) {
        (Color::White, true) => (4, 6, 7, 5),
        (Color::White, false) => (4, 2, 0, 3),
        (Color::Black, true) => (60, 62, 63, 61),
        (Color::Black, false) => (60, 58, 56, 59),
    }
}

impl Board {
    /// XORs `piece` of `color` on `sq` in both the bitboard and the hash.
    #[inline(always)]
    fn toggle(&mut self, color: Color, piece: Piece, sq: u8) {
        self.state.pieces[color as usize][piece as usize] ^= 1u64 << sq;
        self.state.zobrist ^= zobrist_keys().piece[color as usize][piece as usize][sq as usize];
    }

    /// Plays `mv`, pushing the previous snapshot so [`Board::undo`] can restore it.
    ///
    /// `mv` must come from the move generator for this exact position (or be
    /// built with [`Move::classify`] against it). Nothing is re-validated here;
    /// feeding an illegal move corrupts the board.
    pub fn execute(&mut self, mv: Move) {
        self.history.push(self.state);

        let keys = zobrist_keys();
        let us = self.state.side_to_move;
        let them = us.opposite();
        let from = mv.from.index();
        let to = mv.to.index();

        if mv.is_castling() {
            let (kf, kt, rf, rt) = castle_squares(us, mv.is_kingside_castle());
            self.toggle(us, Piece::King, kf);
            self.toggle(us, Piece::King, kt);
            self.toggle(us, Piece::Rook, rf);
            self.toggle(us, Piece::Rook, rt);
        } else {
            if mv.is_capture() {
                if mv.is_en_passant() {
                    let victim = match us {
                        Color::White => to - 8,
                        Color::Black => to + 8,
                    };
                    self.toggle(them, Piece::Pawn, victim);
                } else if let Some(victim) = self.piece_of(them, mv.to) {
                    self.toggle(them, victim, to);
                }
            }

            self.toggle(us, mv.piece, from);
            match mv.promotion {
                Some(promo) => self.toggle(us, promo, to),
                None => self.toggle(us, mv.piece, to),
            }
        }

        if let Some(ep) = self.state.en_passant.take() {
            self.state.zobrist ^= keys.ep(ep);
        }

        if mv.is_pawn_move() || mv.is_capture() {
            self.state.halfmove_clock = 0;
        } else {
            self.state.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.state.fullmove_number += 1;
        }

        if mv.is_double_pawn_push() {
            let ep = Square::from_index(match us {
                Color::White => to - 8,
                Color::Black => to + 8,
            });
            self.state.en_passant = Some(ep);
            self.state.zobrist ^= keys.ep(ep);
        }

        let old_rights = self.state.castling_rights;
        if old_rights != 0 {
            let mut revoke = 0u8;
            if mv.is_castling() {
                revoke |= side_rights(us);
            }
            for color in [Color::White, Color::Black] {
                if self.bb(color, Piece::King) & mv.to.bb() != 0 {
                    revoke |= side_rights(color);
                }
            }
            if mv.piece == Piece::Rook {
                revoke |= right_for_rook_home(from);
            }
            // Whatever stood on a rook home square, the rook had already left
            // (and forfeited the right) unless it was the rook being captured.
            if mv.is_capture() {
                revoke |= right_for_rook_home(to);
            }

            let new_rights = old_rights & !revoke;
            if new_rights != old_rights {
                self.state.castling_rights = new_rights;
                xor_castling_rights_delta(&mut self.state.zobrist, keys, old_rights, new_rights);
            }
        }

        self.state.side_to_move = them;
        self.state.zobrist ^= keys.side_to_move;

        #[cfg(debug_assertions)]
        self.assert_hash();
    }

    /// Restores the snapshot pushed by the matching [`Board::execute`].
    ///
    /// # Panics
    /// If there is no move to take back. This is checked in every build.
    pub fn undo(&mut self) {
        match self.history.pop() {
            Some(prev) => self.state = prev,
            None => panic!("Board::undo called with an empty history"),
        }

        #[cfg(all(debug_assertions, feature = "paranoid_hash"))]
        self.assert_hash();
    }

}
