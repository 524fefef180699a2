use crate::error::SquareParseError;
use std::fmt;
use std::str::FromStr;

/// A board square, 0 = a1 through 63 = h8 (little-endian rank-file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Builds a square from a raw index. Callers guarantee `idx < 64`.
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Self {
        debug_assert!(idx < 64);
        Square(idx)
    }

    #[inline(always)]
    pub const fn from_coords(file: u8, rank: u8) -> Self {
        Square(rank * 8 + file)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 0 = rank 1 … 7 = rank 8
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// 0 = a-file … 7 = h-file
    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline(always)]
    pub const fn bb(self) -> u64 {
        1u64 << self.0
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareParseError;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        if idx < 64 {
            Ok(Square(idx))
        } else {
            Err(SquareParseError::OutOfRange(idx))
        }
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError::Malformed(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(SquareParseError::Malformed(s.to_string()));
        }
        Ok(Square::from_coords(file, rank))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_round_trip() {
        for idx in 0..64u8 {
            let sq = Square::from_index(idx);
            let parsed: Square = sq.to_string().parse().expect("valid square");
            assert_eq!(parsed, sq);
        }
    }

    #[test]
    fn corners() {
        assert_eq!("a1".parse::<Square>().unwrap().index(), 0);
        assert_eq!("h8".parse::<Square>().unwrap().index(), 63);
        assert_eq!("e3".parse::<Square>().unwrap().index(), 20);
    }

    #[test]
    fn rejects_garbage() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!(Square::try_from(64).is_err());
    }
}
