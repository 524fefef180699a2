// src/moves/tables.rs
// Per-square attack tables, built once on first use.

use crate::bitboard::BitboardExt;
use crate::board::Color;
use crate::utils::square_index;
use once_cell::sync::OnceCell;

/// Ray directions. The first four walk towards higher square indices, so the
/// nearest blocker on them is the lowest set bit; the rest use the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    North,
    East,
    NorthEast,
    NorthWest,
    South,
    West,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const STRAIGHT: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline(always)]
    const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    #[inline(always)]
    const fn is_increasing(self) -> bool {
        (self as u8) < 4
    }
}

pub struct LookupTables {
    pub knight: [u64; 64],
    pub king: [u64; 64],
    /// `[color][square]`: squares a pawn of that color on that square attacks.
    pub pawn: [[u64; 64]; 2],
    /// `[direction][square]`: every square along the ray up to the board edge.
    pub rays: [[u64; 64]; 8],
}

pub fn tables() -> &'static LookupTables {
    static TABLES: OnceCell<LookupTables> = OnceCell::new();
    TABLES.get_or_init(LookupTables::build)
}

/// Sets the bit for (file + df, rank + dr) when it stays on the board.
#[inline]
fn offset(sq: u8, df: i8, dr: i8) -> u64 {
    let file = (sq % 8) as i8 + df;
    let rank = (sq / 8) as i8 + dr;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        1u64 << square_index(file as u8, rank as u8)
    } else {
        0
    }
}

impl LookupTables {
    fn build() -> Self {
        const KNIGHT_JUMPS: [(i8, i8); 8] = [
            (1, 2),
            (2, 1),
            (2, -1),
            (1, -2),
            (-1, -2),
            (-2, -1),
            (-2, 1),
            (-1, 2),
        ];
        const KING_STEPS: [(i8, i8); 8] = [
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 1),
        ];
        const ALL_DIRS: [Direction; 8] = [
            Direction::North,
            Direction::East,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::South,
            Direction::West,
            Direction::SouthEast,
            Direction::SouthWest,
        ];

        let mut t = LookupTables {
            knight: [0; 64],
            king: [0; 64],
            pawn: [[0; 64]; 2],
            rays: [[0; 64]; 8],
        };

        for sq in 0..64u8 {
            let s = sq as usize;
            t.knight[s] = KNIGHT_JUMPS.iter().fold(0, |acc, &(df, dr)| acc | offset(sq, df, dr));
            t.king[s] = KING_STEPS.iter().fold(0, |acc, &(df, dr)| acc | offset(sq, df, dr));
            t.pawn[Color::White as usize][s] = offset(sq, -1, 1) | offset(sq, 1, 1);
            t.pawn[Color::Black as usize][s] = offset(sq, -1, -1) | offset(sq, 1, -1);

            for dir in ALL_DIRS {
                let (df, dr) = dir.delta();
                let mut ray = 0u64;
                let mut step = 1i8;
                loop {
                    let bit = offset(sq, df * step, dr * step);
                    if bit == 0 {
                        break;
                    }
                    ray |= bit;
                    step += 1;
                }
                t.rays[dir as usize][s] = ray;
            }
        }
        t
    }

    /// Ray from `sq` in `dir`, cut after the first occupied square (which is included).
    #[inline(always)]
    pub fn ray_attacks(&self, dir: Direction, sq: u8, occupied: u64) -> u64 {
        let ray = self.rays[dir as usize][sq as usize];
        let blockers = ray & occupied;
        if blockers == 0 {
            return ray;
        }
        let first = if dir.is_increasing() {
            blockers.lsb()
        } else {
            blockers.msb()
        };
        ray ^ self.rays[dir as usize][first as usize]
    }

    #[inline]
    pub fn rook_attacks(&self, sq: u8, occupied: u64) -> u64 {
        Direction::STRAIGHT
            .iter()
            .fold(0, |acc, &d| acc | self.ray_attacks(d, sq, occupied))
    }

    #[inline]
    pub fn bishop_attacks(&self, sq: u8, occupied: u64) -> u64 {
        Direction::DIAGONAL
            .iter()
            .fold(0, |acc, &d| acc | self.ray_attacks(d, sq, occupied))
    }

    #[inline]
    pub fn queen_attacks(&self, sq: u8, occupied: u64) -> u64 {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }

    #[inline(always)]
    pub fn pawn_attacks(&self, color: Color, sq: u8) -> u64 {
        self.pawn[color as usize][sq as usize]
    }
}
