// src/bitboard.rs
// Bit-scan helpers over raw u64 bitboards (bit 0 = a1, bit 63 = h8).

pub trait BitboardExt {
    /// Index of the least significant set bit. Undefined (64) on an empty board.
    fn lsb(self) -> u8;
    /// Index of the most significant set bit. Undefined on an empty board.
    fn msb(self) -> u8;
    /// Removes and returns the least significant set bit.
    fn pop_lsb(&mut self) -> u8;
    fn popcount(self) -> u32;
    fn has(self, sq: u8) -> bool;
}

impl BitboardExt for u64 {
    #[inline(always)]
    fn lsb(self) -> u8 {
        self.trailing_zeros() as u8
    }

    #[inline(always)]
    fn msb(self) -> u8 {
        63 - self.leading_zeros() as u8
    }

    #[inline(always)]
    fn pop_lsb(&mut self) -> u8 {
        let sq = self.trailing_zeros() as u8;
        *self &= *self - 1;
        sq
    }

    #[inline(always)]
    fn popcount(self) -> u32 {
        self.count_ones()
    }

    #[inline(always)]
    fn has(self, sq: u8) -> bool {
        (self >> sq) & 1 != 0
    }
}

/// Iterates the set squares of a bitboard, least significant first.
pub struct BitIter(pub u64);

impl Iterator for BitIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }
}
