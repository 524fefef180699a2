// src/board/castle_bits.rs

use super::Color;

/// Underlying bit type for castling rights.
pub type CastleBits = u8;

pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;
pub const CASTLE_ALL: CastleBits = CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ;

#[inline(always)]
pub const fn kingside_right(color: Color) -> CastleBits {
    match color {
        Color::White => CASTLE_WK,
        Color::Black => CASTLE_BK,
    }
}

#[inline(always)]
pub const fn queenside_right(color: Color) -> CastleBits {
    match color {
        Color::White => CASTLE_WQ,
        Color::Black => CASTLE_BQ,
    }
}

/// Both rights of one side.
#[inline(always)]
pub const fn side_rights(color: Color) -> CastleBits {
    kingside_right(color) | queenside_right(color)
}

/// Right forfeited when the rook home square `sq` is left or captured on.
#[inline(always)]
pub const fn right_for_rook_home(sq: u8) -> CastleBits {
    match sq {
        0 => CASTLE_WQ,  // a1
        7 => CASTLE_WK,  // h1
        56 => CASTLE_BQ, // a8
        63 => CASTLE_BK, // h8
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn castle_bits_single_and_disjoint() {
        assert_eq!(CASTLE_WK.count_ones(), 1);
        assert_eq!(CASTLE_WQ.count_ones(), 1);
        assert_eq!(CASTLE_BK.count_ones(), 1);
        assert_eq!(CASTLE_BQ.count_ones(), 1);
        assert_eq!(CASTLE_ALL.count_ones(), 4);
    }

    #[test]
    fn rook_homes_map_to_their_right() {
        assert_eq!(right_for_rook_home(0), CASTLE_WQ);
        assert_eq!(right_for_rook_home(63), CASTLE_BK);
        assert_eq!(right_for_rook_home(4), 0);
        assert_eq!(side_rights(Color::Black), CASTLE_BK | CASTLE_BQ);
    }
}
