use crate::bitboard::BitboardExt;
use crate::board::{Board, Color, Piece};
use crate::moves::tables::{LookupTables, tables};
use crate::square::Square;

/// Bitboard file masks (a1 = bit 0 … h8 = bit 63).
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = 0x8080_8080_8080_8080;

/// Returns a bitboard showing all the squares that *piece* could attack from *square*
#[inline]
pub fn attacks_from(piece: Piece, color: Color, square: u8, blockers: u64) -> u64 {
    let t = tables();
    match piece {
        Piece::Knight => t.knight[square as usize],
        Piece::King => t.king[square as usize],
        Piece::Pawn => t.pawn_attacks(color, square),
        Piece::Bishop => t.bishop_attacks(square, blockers),
        Piece::Rook => t.rook_attacks(square, blockers),
        Piece::Queen => t.queen_attacks(square, blockers),
    }
}

/// Every square `color` attacks in the current position, own pieces included
/// (a defended piece still counts as attacked for king-safety purposes).
pub fn attacks_by(board: &Board, color: Color) -> u64 {
    let t: &LookupTables = tables();
    let occupied = board.occupied();

    let pawns = board.pieces(Piece::Pawn, color);
    let mut attacked = match color {
        Color::White => ((pawns & !FILE_A) << 7) | ((pawns & !FILE_H) << 9),
        Color::Black => ((pawns & !FILE_H) >> 7) | ((pawns & !FILE_A) >> 9),
    };

    let mut knights = board.pieces(Piece::Knight, color);
    while knights != 0 {
        attacked |= t.knight[knights.pop_lsb() as usize];
    }

    let mut diagonal = board.pieces(Piece::Bishop, color) | board.pieces(Piece::Queen, color);
    while diagonal != 0 {
        attacked |= t.bishop_attacks(diagonal.pop_lsb(), occupied);
    }

    let mut straight = board.pieces(Piece::Rook, color) | board.pieces(Piece::Queen, color);
    while straight != 0 {
        attacked |= t.rook_attacks(straight.pop_lsb(), occupied);
    }

    let mut king = board.pieces(Piece::King, color);
    while king != 0 {
        attacked |= t.king[king.pop_lsb() as usize];
    }

    attacked
}

/// Reverse lookup: does any `attacker` piece reach `square`?
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let t = tables();
    let index = square.index();

    // A pawn of `attacker` hits `square` iff a defender pawn on `square` would hit it back.
    if t.pawn_attacks(attacker.opposite(), index) & board.pieces(Piece::Pawn, attacker) != 0 {
        return true;
    }
    if t.knight[index as usize] & board.pieces(Piece::Knight, attacker) != 0 {
        return true;
    }
    if t.king[index as usize] & board.pieces(Piece::King, attacker) != 0 {
        return true;
    }

    let occupied = board.occupied();
    let queens = board.pieces(Piece::Queen, attacker);

    if t.rook_attacks(index, occupied) & (board.pieces(Piece::Rook, attacker) | queens) != 0 {
        return true;
    }
    t.bishop_attacks(index, occupied) & (board.pieces(Piece::Bishop, attacker) | queens) != 0
}

#[inline]
pub fn in_check(board: &Board, side: Color) -> bool {
    match board.king_square(side) {
        Some(king_sq) => is_square_attacked(board, king_sq, side.opposite()),
        None => false,
    }
}

impl Board {
    /// Is the side to move in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        in_check(self, self.side_to_move())
    }

    /// After a trial `execute`: is the side that just moved (not the side to
    /// move) left with its king attacked?
    pub fn in_illegal_check(&self) -> bool {
        let mover = self.side_to_move().opposite();
        let king = self.pieces(Piece::King, mover);
        attacks_by(self, self.side_to_move()) & king != 0
    }
}
