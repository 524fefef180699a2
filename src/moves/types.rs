use crate::board::{Board, Color, Piece};
use crate::square::Square;
use arrayvec::ArrayVec;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Upper bound on legal moves in any reachable position (218) with headroom.
pub const MAX_MOVES: usize = 256;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        Vec::push(self, mv);
    }
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        ArrayVec::push(self, mv);
    }
    fn clear(&mut self) {
        ArrayVec::clear(self);
    }
}

// Move flag bits. Several may be set at once (an en-passant capture carries
// EN_PASSANT | CAPTURE | PAWN_MOVE).
pub const QUIET: u8 = 0;
pub const CAPTURE: u8 = 1 << 0;
pub const KS_CASTLE: u8 = 1 << 1;
pub const QS_CASTLE: u8 = 1 << 2;
pub const DBL_PAWN_PUSH: u8 = 1 << 3;
pub const EN_PASSANT: u8 = 1 << 4;
pub const PROMOTION: u8 = 1 << 5;
pub const PAWN_MOVE: u8 = 1 << 6;

/// One ply. Flags are fixed when the move is built and never re-derived.
///
/// Equality compares every field, so two moves match only if they were
/// classified identically. "No move" is `Option::<Move>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<Piece>,
    pub flags: u8,
}

impl Move {
    #[inline(always)]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        promotion: Option<Piece>,
        flags: u8,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            promotion,
            flags,
        }
    }

    /// Builds a move and derives its flags from `board`, the position it is
    /// about to be played in. The move is not checked for legality.
    pub fn classify(
        board: &Board,
        from: Square,
        to: Square,
        piece: Piece,
        promotion: Option<Piece>,
    ) -> Self {
        let us = board.side_to_move();
        let mut flags = QUIET;

        if board.occupancy(us.opposite()) & to.bb() != 0 {
            flags |= CAPTURE;
        }

        match piece {
            Piece::Pawn => {
                flags |= PAWN_MOVE;
                let (home_rank, push_rank, back_rank) = match us {
                    Color::White => (1, 3, 7),
                    Color::Black => (6, 4, 0),
                };
                if to.rank() == back_rank {
                    flags |= PROMOTION;
                }
                if from.rank() == home_rank && to.rank() == push_rank {
                    flags |= DBL_PAWN_PUSH;
                }
                if board.en_passant() == Some(to) && from.file() != to.file() {
                    flags |= EN_PASSANT | CAPTURE;
                }
            }
            Piece::King => {
                let home = match us {
                    Color::White => 4,
                    Color::Black => 60,
                };
                if from.index() == home {
                    if to.index() == home + 2 {
                        flags |= KS_CASTLE;
                    } else if to.index() == home - 2 {
                        flags |= QS_CASTLE;
                    }
                }
            }
            _ => {}
        }

        let promotion = if flags & PROMOTION != 0 {
            Some(promotion.unwrap_or(Piece::Queen))
        } else {
            None
        };

        Move::new(from, to, piece, promotion, flags)
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.flags & CAPTURE != 0
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.flags & EN_PASSANT != 0
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        self.flags & (KS_CASTLE | QS_CASTLE) != 0
    }

    #[inline(always)]
    pub fn is_kingside_castle(&self) -> bool {
        self.flags & KS_CASTLE != 0
    }

    #[inline(always)]
    pub fn is_queenside_castle(&self) -> bool {
        self.flags & QS_CASTLE != 0
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.flags & PROMOTION != 0
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flags & DBL_PAWN_PUSH != 0
    }

    #[inline(always)]
    pub fn is_pawn_move(&self) -> bool {
        self.flags & PAWN_MOVE != 0
    }

    /// Neither a capture nor a promotion.
    #[inline(always)]
    pub fn is_quiet(&self) -> bool {
        self.flags & (CAPTURE | PROMOTION) == 0
    }

    /// UCI form: `e2e4`, `e1g1`, `b7b8q`.
    pub fn to_uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(p) = self.promotion {
            s.push(promo_char(p));
        }
        s
    }

    /// Long algebraic form: `Nf3xh4`, `e2-e4`, `b7-b8=Q`, `0-0`, `0-0-0`.
    pub fn notation(&self) -> String {
        if self.is_kingside_castle() {
            return "0-0".to_string();
        }
        if self.is_queenside_castle() {
            return "0-0-0".to_string();
        }

        let mut s = String::with_capacity(8);
        if let Some(letter) = self.piece.letter() {
            s.push(letter);
        }
        s.push_str(&self.from.to_string());
        s.push(if self.is_capture() { 'x' } else { '-' });
        s.push_str(&self.to.to_string());
        if let Some(p) = self.promotion {
            s.push('=');
            s.push(promo_char(p).to_ascii_uppercase());
        }
        s
    }
}

#[inline]
fn promo_char(p: Piece) -> char {
    match p {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        // Never produced by the generator.
        Piece::Pawn | Piece::King => '?',
    }
}

/// `{}` prints UCI, `{:#}` prints long algebraic.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.notation())
        } else {
            f.write_str(&self.to_uci())
        }
    }
}
