// Small index helpers shared by move generation and evaluation.

/// Square index from 0-based file and rank.
#[inline(always)]
pub const fn square_index(file: u8, rank: u8) -> u8 {
    rank * 8 + file
}

/// Vertical mirror (a1 <-> a8).
#[inline(always)]
pub const fn mirror_vert(sq: u8) -> usize {
    (sq ^ 56) as usize
}
