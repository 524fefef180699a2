// Piece-square and mobility tables.
//
// Piece-square tables are written as the board is drawn from White's side:
// the first row is rank 8, the last row rank 1. `psqt_index` mirrors White's
// squares onto that layout; Black's raw index already reads it from Black's side.

use crate::board::{Color, Piece};
use crate::utils::mirror_vert;

#[rustfmt::skip]
pub const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
pub const BISHOP_TABLE: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
pub const ROOK_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
pub const QUEEN_TABLE: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,   5,   5,   5,   0, -10,
    -5,   0,   5,   5,   5,   5,   0,  -5,
     0,   0,   5,   5,   5,   5,   0,  -5,
   -10,   5,   5,   5,   5,   5,   0, -10,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
pub const KING_TABLE: [i32; 64] = [
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -10, -20, -20, -20, -20, -20, -20, -10,
    20,  20,   0,   0,   0,   0,  20,  20,
    20,  30,  10,   0,   0,  10,  30,  20,
];

// Mobility bonus indexed by the number of reachable non-friendly squares.
pub const KNIGHT_MOBILITY: [i32; 9] = [-15, -10, -5, 0, 4, 8, 12, 15, 18];
pub const BISHOP_MOBILITY: [i32; 14] = [-20, -12, -6, 0, 4, 8, 12, 16, 19, 22, 25, 27, 29, 30];
pub const ROOK_MOBILITY: [i32; 15] = [-15, -10, -6, -3, 0, 3, 6, 9, 12, 14, 16, 18, 20, 21, 22];
pub const QUEEN_MOBILITY: [i32; 28] = [
    -10, -8, -6, -4, -2, 0, 2, 4, 6, 8, 9, 10, 11, 12, 13, 14, 15, 16, 16, 17, 17, 18, 18, 19,
    19, 20, 20, 20,
];

#[inline(always)]
pub const fn table_for(piece: Piece) -> &'static [i32; 64] {
    match piece {
        Piece::Pawn => &PAWN_TABLE,
        Piece::Knight => &KNIGHT_TABLE,
        Piece::Bishop => &BISHOP_TABLE,
        Piece::Rook => &ROOK_TABLE,
        Piece::Queen => &QUEEN_TABLE,
        Piece::King => &KING_TABLE,
    }
}

/// Index into a White-oriented, rank-8-first table.
#[inline(always)]
pub const fn psqt_index(color: Color, sq: u8) -> usize {
    match color {
        Color::White => mirror_vert(sq),
        Color::Black => sq as usize,
    }
}

/// Bonus for `piece` having `reach` destination squares. Pawns and kings get none.
#[inline]
pub fn mobility_bonus(piece: Piece, reach: u32) -> i32 {
    let table: &[i32] = match piece {
        Piece::Knight => &KNIGHT_MOBILITY,
        Piece::Bishop => &BISHOP_MOBILITY,
        Piece::Rook => &ROOK_MOBILITY,
        Piece::Queen => &QUEEN_MOBILITY,
        Piece::Pawn | Piece::King => return 0,
    };
    table[(reach as usize).min(table.len() - 1)]
}
