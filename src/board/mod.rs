mod fen;

use crate::bitboard::BitboardExt;
use crate::error::{FenError, PositionError};
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

pub mod castle_bits;
mod fen_tables;
pub use castle_bits::*;

// ===== White side (ranks 1 & 2) =====
const WHITE_PAWN_MASK: u64 = 0x0000_0000_0000_FF00;
const WHITE_ROOK_MASK: u64 = (1 << 0) | (1 << 7);
const WHITE_KNIGHT_MASK: u64 = (1 << 1) | (1 << 6);
const WHITE_BISHOP_MASK: u64 = (1 << 2) | (1 << 5);
const WHITE_QUEEN_MASK: u64 = 1 << 3;
const WHITE_KING_MASK: u64 = 1 << 4;

// ===== Black side (ranks 7 & 8) =====
const BLACK_PAWN_MASK: u64 = 0x00FF_0000_0000_0000;
const BLACK_ROOK_MASK: u64 = (1 << 56) | (1 << 63);
const BLACK_KNIGHT_MASK: u64 = (1 << 57) | (1 << 62);
const BLACK_BISHOP_MASK: u64 = (1 << 58) | (1 << 61);
const BLACK_QUEEN_MASK: u64 = 1 << 59;
const BLACK_KING_MASK: u64 = 1 << 60;

/// Halfmove clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_PLIES: u32 = 100;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece enum to hold all types of pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const COLORS: [Color; 2] = [Color::White, Color::Black];
pub const PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// One complete position snapshot. `Copy` so the undo stack is a flat `Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardState {
    /// `pieces[color][piece]`
    pub pieces: [[u64; 6]; 2],
    /// bit 0=White kingside, 1=White queenside, 2=Black kingside, 3=Black queenside
    pub castling_rights: u8,
    pub side_to_move: Color,
    /// Square skipped by the last double pawn push, if any.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after Black's move.
    pub fullmove_number: u32,
    pub zobrist: u64,
}

impl BoardState {
    const EMPTY: BoardState = BoardState {
        pieces: [[0u64; 6]; 2],
        castling_rights: 0,
        side_to_move: Color::White,
        en_passant: None,
        halfmove_clock: 0,
        fullmove_number: 1,
        zobrist: 0,
    };
}

/// The authoritative position plus the stack of snapshots `undo` restores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) state: BoardState,
    pub(crate) history: Vec<BoardState>,
}

impl Board {
    /// Standard starting position.
    pub fn new() -> Self {
        let mut b = Board::new_empty();
        b.reset();
        b
    }

    /// No pieces, no rights, White to move.
    pub fn new_empty() -> Self {
        let mut b = Board {
            state: BoardState::EMPTY,
            history: Vec::with_capacity(128),
        };
        b.refresh_zobrist();
        b
    }

    /// Parses `fen` into a fresh board.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::new_empty();
        board.set_fen(fen)?;
        Ok(board)
    }

    /// Restores the starting position and drops any undo history.
    pub fn reset(&mut self) {
        let mut s = BoardState::EMPTY;
        let w = Color::White as usize;
        let b = Color::Black as usize;
        s.pieces[w] = [
            WHITE_PAWN_MASK,
            WHITE_KNIGHT_MASK,
            WHITE_BISHOP_MASK,
            WHITE_ROOK_MASK,
            WHITE_QUEEN_MASK,
            WHITE_KING_MASK,
        ];
        s.pieces[b] = [
            BLACK_PAWN_MASK,
            BLACK_KNIGHT_MASK,
            BLACK_BISHOP_MASK,
            BLACK_ROOK_MASK,
            BLACK_QUEEN_MASK,
            BLACK_KING_MASK,
        ];
        s.castling_rights = CASTLE_ALL;
        self.state = s;
        self.history.clear();
        self.refresh_zobrist();
    }

    /// Recompute from current state and store into the snapshot.
    #[inline]
    pub fn refresh_zobrist(&mut self) {
        self.state.zobrist = self.compute_zobrist_full();
    }

    /// Full recompute from current state. Must match the incremental hash at all times.
    pub fn compute_zobrist_full(&self) -> u64 {
        crate::hash::zobrist::hash_state(&self.state)
    }

    #[inline(always)]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline(always)]
    pub fn bb(&self, color: Color, piece: Piece) -> u64 {
        self.state.pieces[color as usize][piece as usize]
    }

    /// Same as [`Board::bb`] with the argument order the generators read best in.
    #[inline(always)]
    pub fn pieces(&self, piece: Piece, color: Color) -> u64 {
        self.bb(color, piece)
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline(always)]
    pub fn castling_rights(&self) -> u8 {
        self.state.castling_rights
    }

    #[inline(always)]
    pub fn has_castling(&self, flag: u8) -> bool {
        self.state.castling_rights & flag != 0
    }

    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.state.en_passant
    }

    /// En-passant target as a single-bit bitboard, 0 when none.
    #[inline(always)]
    pub fn en_passant_bb(&self) -> u64 {
        self.state.en_passant.map_or(0, Square::bb)
    }

    #[inline(always)]
    pub fn halfmove_clock(&self) -> u32 {
        self.state.halfmove_clock
    }

    #[inline(always)]
    pub fn fullmove_number(&self) -> u32 {
        self.state.fullmove_number
    }

    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.state.zobrist
    }

    /// Number of moves that can currently be taken back.
    #[inline(always)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline(always)]
    fn side_pieces(&self, color: Color) -> u64 {
        let p = &self.state.pieces[color as usize];
        p[0] | p[1] | p[2] | p[3] | p[4] | p[5]
    }

    pub fn white_pieces(&self) -> u64 {
        self.side_pieces(Color::White)
    }

    pub fn black_pieces(&self) -> u64 {
        self.side_pieces(Color::Black)
    }

    #[inline(always)]
    /// Bitboard of all pieces for one side.
    pub fn occupancy(&self, color: Color) -> u64 {
        self.side_pieces(color)
    }

    #[inline(always)]
    /// Bitboard of all pieces (both colors).
    pub fn occupied(&self) -> u64 {
        self.white_pieces() | self.black_pieces()
    }

    /// Returns the piece and color at a given square, or None if empty.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = sq.bb();
        for color in COLORS {
            if self.side_pieces(color) & bit == 0 {
                continue;
            }
            for piece in PIECES {
                if self.bb(color, piece) & bit != 0 {
                    return Some((color, piece));
                }
            }
        }
        None
    }

    /// Only the piece kind on `sq`, for the given side.
    #[inline]
    pub fn piece_of(&self, color: Color, sq: Square) -> Option<Piece> {
        PIECES
            .into_iter()
            .find(|&p| self.bb(color, p).has(sq.index()))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king_bb = self.bb(color, Piece::King);
        if king_bb == 0 {
            None
        } else {
            Some(Square::from_index(king_bb.lsb()))
        }
    }

    /// True once 100 plies have passed without a capture or pawn move.
    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.state.halfmove_clock >= FIFTY_MOVE_PLIES
    }

    /// Coarse rule: only the two kings are left on the board.
    #[inline]
    pub fn only_kings_left(&self) -> bool {
        let kings = self.bb(Color::White, Piece::King) | self.bb(Color::Black, Piece::King);
        self.occupied() & !kings == 0
    }

    /// Draw conditions that need no move generation.
    #[inline]
    pub fn is_rule_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.only_kings_left()
    }

    /// No legal moves, fifty-move rule, or bare kings.
    pub fn is_game_over(&mut self) -> bool {
        self.is_rule_draw() || !crate::moves::movegen::has_legal_move(self)
    }

    /// Checks that no square is claimed twice and each side has one king.
    pub fn validate(&self) -> Result<(), PositionError> {
        const NAMES: [[&str; 6]; 2] = [
            [
                "white_pawns",
                "white_knights",
                "white_bishops",
                "white_rooks",
                "white_queens",
                "white_king",
            ],
            [
                "black_pawns",
                "black_knights",
                "black_bishops",
                "black_rooks",
                "black_queens",
                "black_king",
            ],
        ];

        let mut seen: u64 = 0;
        for color in COLORS {
            for piece in PIECES {
                let bb = self.bb(color, piece);
                if seen & bb != 0 {
                    return Err(PositionError::Overlap(
                        NAMES[color as usize][piece as usize],
                    ));
                }
                seen |= bb;
            }
        }
        if self.bb(Color::White, Piece::King).popcount() != 1 {
            return Err(PositionError::KingCount("white"));
        }
        if self.bb(Color::Black, Piece::King).popcount() != 1 {
            return Err(PositionError::KingCount("black"));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    #[inline]
    pub(crate) fn assert_hash(&self) {
        let full = self.compute_zobrist_full();
        debug_assert_eq!(
            self.state.zobrist, full,
            "Zobrist parity mismatch: stored={:#018x}, full={:#018x}",
            self.state.zobrist, full
        );
    }
}

impl Color {
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black.
    #[inline(always)]
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Piece {
    /// Material value in centipawns. The king carries none.
    #[inline(always)]
    pub fn value(self) -> i32 {
        match self {
            Piece::Pawn => 100,
            Piece::Knight => 300,
            Piece::Bishop => 310,
            Piece::Rook => 500,
            Piece::Queen => 900,
            Piece::King => 0,
        }
    }

    /// Upper-case letter used by long algebraic notation (`None` for pawns).
    pub fn letter(self) -> Option<char> {
        match self {
            Piece::Pawn => None,
            Piece::Knight => Some('N'),
            Piece::Bishop => Some('B'),
            Piece::Rook => Some('R'),
            Piece::Queen => Some('Q'),
            Piece::King => Some('K'),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
