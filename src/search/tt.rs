//! Transposition table: one slot per index, `index = hash % len`.
//!
//! Only the low 16 bits of the hash are stored. Two positions sharing both the
//! slot and those 16 bits are indistinguishable; such collisions are accepted
//! silently in exchange for a compact entry and are never reported as errors.

use crate::board::Piece;
use crate::moves::types::Move;
use crate::square::Square;
use tracing::debug;

pub const DEFAULT_TT_MB: usize = 16;

/// Bound type of a stored score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum NodeType {
    /// Score lies strictly inside the search window.
    #[default]
    Exact = 0,
    /// Failed high: the true score is at least the stored one.
    LowerBound = 1,
    /// Failed low: the true score is at most the stored one.
    UpperBound = 2,
}

/// From/to/promotion packed into 16 bits. Zero means "no move".
///
/// bits 0-5 from, 6-11 to, 12-14 promotion (0 none, 1 N, 2 B, 3 R, 4 Q), 15 set when present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MoveSkeleton(u16);

impl MoveSkeleton {
    pub const NONE: MoveSkeleton = MoveSkeleton(0);

    pub fn from_move(mv: Option<Move>) -> Self {
        match mv {
            None => Self::NONE,
            Some(mv) => {
                let promo: u16 = match mv.promotion {
                    None => 0,
                    Some(Piece::Knight) => 1,
                    Some(Piece::Bishop) => 2,
                    Some(Piece::Rook) => 3,
                    Some(_) => 4,
                };
                MoveSkeleton(
                    mv.from.index() as u16
                        | (mv.to.index() as u16) << 6
                        | promo << 12
                        | 1 << 15,
                )
            }
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 & (1 << 15) == 0
    }

    pub fn from_sq(self) -> Square {
        Square::from_index((self.0 & 0x3F) as u8)
    }

    pub fn to_sq(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3F) as u8)
    }

    pub fn promotion(self) -> Option<Piece> {
        match (self.0 >> 12) & 0x7 {
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Does this skeleton describe `mv`? Flags are not stored, so a generated
    /// move is matched on squares and promotion piece only.
    #[inline]
    pub fn matches(self, mv: &Move) -> bool {
        !self.is_none() && self == MoveSkeleton::from_move(Some(*mv))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TTEntry {
    /// Low 16 bits of the position hash.
    pub partial_hash: u16,
    pub score: i16,
    pub depth: u8,
    pub flag: NodeType,
    pub best_move: MoveSkeleton,
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
}

#[inline(always)]
fn partial(hash: u64) -> u16 {
    (hash & 0xFFFF) as u16
}

impl TranspositionTable {
    /// Allocates `size_mb` MiB worth of entries. The size never changes afterwards.
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TTEntry>();
        let num_entries = ((size_mb * 1024 * 1024) / entry_size).max(1);
        Self {
            entries: vec![TTEntry::default(); num_entries],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Zero every slot.
    pub fn reset(&mut self) {
        self.entries.fill(TTEntry::default());
        debug!(entries = self.entries.len(), "transposition table reset");
    }

    /// Stores a result, subject to the replacement policy: a deeper EXACT entry
    /// for the same position survives a shallower non-EXACT one; anything else
    /// (including a different position in the slot) is overwritten.
    pub fn add(&mut self, hash: u64, score: i32, depth: u8, flag: NodeType, mv: Option<Move>) {
        let idx = self.index(hash);
        let slot = &mut self.entries[idx];
        let same_position = slot.partial_hash == partial(hash);

        if same_position
            && slot.depth > depth
            && slot.flag == NodeType::Exact
            && flag != NodeType::Exact
        {
            return;
        }

        *slot = TTEntry {
            partial_hash: partial(hash),
            score: score.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            depth,
            flag,
            best_move: MoveSkeleton::from_move(mv),
        };
    }

    /// Raw slot read. The caller must compare `partial_hash` before trusting it.
    #[inline]
    pub fn get_entry(&self, hash: u64) -> &TTEntry {
        &self.entries[self.index(hash)]
    }

    /// `get_entry` plus the partial-hash check. Never-written slots are skipped.
    #[inline]
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        let entry = self.get_entry(hash);
        (entry.partial_hash == partial(hash) && *entry != TTEntry::default()).then_some(entry)
    }

    /// Number of slots that have been written since the last reset.
    pub fn occupied(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| **e != TTEntry::default())
            .count()
    }

    /// Occupied slots per thousand, over the whole table.
    pub fn usage_permille(&self) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        self.occupied() * 1000 / self.entries.len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_MB)
    }
}
