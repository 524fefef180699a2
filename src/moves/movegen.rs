use crate::bitboard::BitboardExt;
use crate::board::castle_bits::{kingside_right, queenside_right};
use crate::board::{Board, Color, Piece};
use crate::moves::attacks::{FILE_A, FILE_H, attacks_by};
use crate::moves::tables::{LookupTables, tables};
use crate::moves::types::{
    CAPTURE, DBL_PAWN_PUSH, EN_PASSANT, KS_CASTLE, Move, MoveBuffer, MoveList, PAWN_MOVE,
    PROMOTION, QS_CASTLE, QUIET,
};
use crate::square::Square;

// Predefined Rank Constants
const RANK1: u64 = 0x0000_0000_0000_00FF;
const RANK3: u64 = 0x0000_0000_00FF_0000;
const RANK6: u64 = 0x0000_FF00_0000_0000;
const RANK8: u64 = 0xFF00_0000_0000_0000;

// Squares that must be empty between king and rook.
const WHITE_KINGSIDE_BETWEEN: u64 = 0x0000_0000_0000_0060;
const WHITE_QUEENSIDE_BETWEEN: u64 = 0x0000_0000_0000_000E;
const BLACK_KINGSIDE_BETWEEN: u64 = 0x6000_0000_0000_0000;
const BLACK_QUEENSIDE_BETWEEN: u64 = 0x0E00_0000_0000_0000;

// Squares the king crosses or lands on; none may be attacked.
const WHITE_KINGSIDE_PATH: u64 = 0x0000_0000_0000_0060;
const WHITE_QUEENSIDE_PATH: u64 = 0x0000_0000_0000_000C;
const BLACK_KINGSIDE_PATH: u64 = 0x6000_0000_0000_0000;
const BLACK_QUEENSIDE_PATH: u64 = 0x0C00_0000_0000_0000;

// Promotion Array
const PROMOS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Which moves a generator pass should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    All,
    /// Only moves flagged CAPTURE (en passant and capture-promotions included).
    Captures,
}

/// Pseudo-legal generator for one position.
///
/// The opponent's attack map is computed up front since both check detection
/// and castling legality need it.
pub struct MoveGen<'a> {
    board: &'a Board,
    tables: &'static LookupTables,
    us: Color,
    own: u64,
    enemy: u64,
    occupied: u64,
    opp_attacks: u64,
}

impl<'a> MoveGen<'a> {
    pub fn new(board: &'a Board) -> Self {
        let us = board.side_to_move();
        let own = board.occupancy(us);
        let enemy = board.occupancy(us.opposite());
        MoveGen {
            board,
            tables: tables(),
            us,
            own,
            enemy,
            occupied: own | enemy,
            opp_attacks: attacks_by(board, us.opposite()),
        }
    }

    /// Every square the side not to move attacks.
    #[inline(always)]
    pub fn opponent_attacks(&self) -> u64 {
        self.opp_attacks
    }

    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.opp_attacks & self.board.pieces(Piece::King, self.us) != 0
    }

    /// All pseudo-legal moves (own king may be left in check).
    pub fn pseudo_legal(&self, mode: GenMode, moves: &mut impl MoveBuffer) {
        self.pawn_moves(mode, moves);
        self.knight_moves(mode, moves);
        self.slider_moves(Piece::Bishop, mode, moves);
        self.slider_moves(Piece::Rook, mode, moves);
        self.slider_moves(Piece::Queen, mode, moves);
        self.king_moves(mode, moves);
    }

    #[inline(always)]
    fn target_mask(&self, mode: GenMode) -> u64 {
        match mode {
            GenMode::All => !self.own,
            GenMode::Captures => self.enemy,
        }
    }

    /// Helper functionality to push latest found moves
    #[inline(always)]
    fn push_piece_moves(&self, from: u8, mut targets: u64, piece: Piece, moves: &mut impl MoveBuffer) {
        while targets != 0 {
            let to = targets.pop_lsb();
            let flags = if self.enemy & (1u64 << to) != 0 {
                CAPTURE
            } else {
                QUIET
            };
            moves.push(Move::new(
                Square::from_index(from),
                Square::from_index(to),
                piece,
                None,
                flags,
            ));
        }
    }

    pub fn knight_moves(&self, mode: GenMode, moves: &mut impl MoveBuffer) {
        let mask = self.target_mask(mode);
        let mut bb = self.board.pieces(Piece::Knight, self.us);
        while bb != 0 {
            let from = bb.pop_lsb();
            let targets = self.tables.knight[from as usize] & mask;
            self.push_piece_moves(from, targets, Piece::Knight, moves);
        }
    }

    /// Bishops, rooks and queens via first-blocker ray lookup.
    pub fn slider_moves(&self, piece: Piece, mode: GenMode, moves: &mut impl MoveBuffer) {
        let mask = self.target_mask(mode);
        let mut bb = self.board.pieces(piece, self.us);
        while bb != 0 {
            let from = bb.pop_lsb();
            let attacks = match piece {
                Piece::Bishop => self.tables.bishop_attacks(from, self.occupied),
                Piece::Rook => self.tables.rook_attacks(from, self.occupied),
                _ => self.tables.queen_attacks(from, self.occupied),
            };
            self.push_piece_moves(from, attacks & mask, piece, moves);
        }
    }

    pub fn king_moves(&self, mode: GenMode, moves: &mut impl MoveBuffer) {
        let king_bb = self.board.pieces(Piece::King, self.us);
        if king_bb == 0 {
            return;
        }
        let from = king_bb.trailing_zeros() as u8;
        let targets = self.tables.king[from as usize] & self.target_mask(mode);
        self.push_piece_moves(from, targets, Piece::King, moves);

        if mode == GenMode::All {
            self.castling_moves(from, moves);
        }
    }

    /// Castling requires: the right, an empty gap to the rook, no current
    /// check, and no attacked square on the king's path (destination included).
    fn castling_moves(&self, from: u8, moves: &mut impl MoveBuffer) {
        let home = match self.us {
            Color::White => 4,
            Color::Black => 60,
        };
        if from != home || self.in_check() {
            return;
        }
        let (ks_between, qs_between, ks_path, qs_path) = match self.us {
            Color::White => (
                WHITE_KINGSIDE_BETWEEN,
                WHITE_QUEENSIDE_BETWEEN,
                WHITE_KINGSIDE_PATH,
                WHITE_QUEENSIDE_PATH,
            ),
            Color::Black => (
                BLACK_KINGSIDE_BETWEEN,
                BLACK_QUEENSIDE_BETWEEN,
                BLACK_KINGSIDE_PATH,
                BLACK_QUEENSIDE_PATH,
            ),
        };

        if self.board.has_castling(kingside_right(self.us))
            && self.occupied & ks_between == 0
            && self.opp_attacks & ks_path == 0
        {
            moves.push(Move::new(
                Square::from_index(from),
                Square::from_index(from + 2),
                Piece::King,
                None,
                KS_CASTLE,
            ));
        }

        if self.board.has_castling(queenside_right(self.us))
            && self.occupied & qs_between == 0
            && self.opp_attacks & qs_path == 0
        {
            moves.push(Move::new(
                Square::from_index(from),
                Square::from_index(from - 2),
                Piece::King,
                None,
                QS_CASTLE,
            ));
        }
    }

    pub fn pawn_moves(&self, mode: GenMode, moves: &mut impl MoveBuffer) {
        let pawns = self.board.pieces(Piece::Pawn, self.us);
        let empty = !self.occupied;
        let ep_bb = self.board.en_passant_bb();

        // (push offset, rank a double push passes through, promotion rank)
        let (up, third_rank, promo_rank): (i8, u64, u64) = match self.us {
            Color::White => (8, RANK3, RANK8),
            Color::Black => (-8, RANK6, RANK1),
        };
        let forward = |bb: u64, n: u8| -> u64 {
            match self.us {
                Color::White => bb << n,
                Color::Black => bb >> n,
            }
        };
        let origin = |to: u8, back: i8| -> u8 { (to as i8 - back) as u8 };

        if mode == GenMode::All {
            // ===== Single pushes (promotion targets expand into 4) =====
            let single = forward(pawns, 8) & empty;
            let mut bb = single;
            while bb != 0 {
                let to = bb.pop_lsb();
                let from = origin(to, up);
                self.push_pawn_move(from, to, promo_rank, PAWN_MOVE, moves);
            }

            // ===== Double pushes (both squares empty, home rank only) =====
            let mut bb = forward(single & third_rank, 8) & empty;
            while bb != 0 {
                let to = bb.pop_lsb();
                let from = origin(to, 2 * up);
                moves.push(Move::new(
                    Square::from_index(from),
                    Square::from_index(to),
                    Piece::Pawn,
                    None,
                    PAWN_MOVE | DBL_PAWN_PUSH,
                ));
            }
        }

        // ===== Diagonal captures, file masks guard wraparound =====
        let (left, right) = match self.us {
            Color::White => ((pawns & !FILE_A) << 7, (pawns & !FILE_H) << 9),
            Color::Black => ((pawns & !FILE_H) >> 7, (pawns & !FILE_A) >> 9),
        };
        let (left_back, right_back) = match self.us {
            Color::White => (7i8, 9i8),
            Color::Black => (-7i8, -9i8),
        };

        for (targets, back) in [(left, left_back), (right, right_back)] {
            let mut bb = targets & self.enemy;
            while bb != 0 {
                let to = bb.pop_lsb();
                let from = origin(to, back);
                self.push_pawn_move(from, to, promo_rank, PAWN_MOVE | CAPTURE, moves);
            }
            if targets & ep_bb != 0 {
                let to = ep_bb.trailing_zeros() as u8;
                moves.push(Move::new(
                    Square::from_index(origin(to, back)),
                    Square::from_index(to),
                    Piece::Pawn,
                    None,
                    PAWN_MOVE | CAPTURE | EN_PASSANT,
                ));
            }
        }
    }

    #[inline(always)]
    fn push_pawn_move(&self, from: u8, to: u8, promo_rank: u64, flags: u8, moves: &mut impl MoveBuffer) {
        let from_sq = Square::from_index(from);
        let to_sq = Square::from_index(to);
        if promo_rank & (1u64 << to) != 0 {
            for &promo in PROMOS.iter() {
                moves.push(Move::new(from_sq, to_sq, Piece::Pawn, Some(promo), flags | PROMOTION));
            }
        } else {
            moves.push(Move::new(from_sq, to_sq, Piece::Pawn, None, flags));
        }
    }
}

/// Keeps only the moves in `pseudo` that do not leave the mover's king attacked,
/// by playing each one and taking it back.
fn filter_legal(board: &mut Board, pseudo: &[Move], out: &mut impl MoveBuffer) {
    for &mv in pseudo {
        board.execute(mv);
        let illegal = board.in_illegal_check();
        board.undo();
        if !illegal {
            out.push(mv);
        }
    }
}

/// Fully legal moves for the side to move, in generation order.
pub fn generate_legal(board: &mut Board, out: &mut impl MoveBuffer) {
    out.clear();
    let mut pseudo = MoveList::new();
    MoveGen::new(board).pseudo_legal(GenMode::All, &mut pseudo);
    filter_legal(board, &pseudo, out);
}

/// Legal captures only (quiescence input).
pub fn generate_legal_captures(board: &mut Board, out: &mut impl MoveBuffer) {
    out.clear();
    let mut pseudo = MoveList::new();
    MoveGen::new(board).pseudo_legal(GenMode::Captures, &mut pseudo);
    filter_legal(board, &pseudo, out);
}

/// Convenience wrapper returning a fresh list.
pub fn legal_moves(board: &mut Board) -> MoveList {
    let mut out = MoveList::new();
    generate_legal(board, &mut out);
    out
}

/// Stops at the first legal move found.
pub fn has_legal_move(board: &mut Board) -> bool {
    let mut pseudo = MoveList::new();
    MoveGen::new(board).pseudo_legal(GenMode::All, &mut pseudo);
    pseudo.iter().any(|&mv| {
        board.execute(mv);
        let illegal = board.in_illegal_check();
        board.undo();
        !illegal
    })
}
