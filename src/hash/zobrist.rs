// src/hash/zobrist.rs

use crate::board::BoardState;
use crate::board::castle_bits::*;
use crate::square::Square;
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Fixed seed: identical positions hash identically across runs and processes.
const ZOBRIST_SEED: u64 = 0x00a3_db3b;

pub struct ZobristKeys {
    /// [color][piece][square] with {White=0, Black=1} and {P,N,B,R,Q,K}={0..5}
    pub piece: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// [0]=K, [1]=Q, [2]=k, [3]=q  (bit order K,Q,k,q)
    pub castling: [u64; 4],
    /// a..h => 0..7
    pub ep_file: [u64; 8],
}

impl ZobristKeys {
    #[inline(always)]
    pub fn ep(&self, sq: Square) -> u64 {
        self.ep_file[sq.file() as usize]
    }
}

/// Global keys, initialized on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_keys(StdRng::seed_from_u64(ZOBRIST_SEED)))
}

fn generate_keys(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0u64; 4],
        ep_file: [0u64; 8],
    };

    for color in keys.piece.iter_mut() {
        for piece in color.iter_mut() {
            for key in piece.iter_mut() {
                *key = non_zero(&mut rng);
            }
        }
    }
    for key in keys.castling.iter_mut() {
        *key = non_zero(&mut rng);
    }
    for key in keys.ep_file.iter_mut() {
        *key = non_zero(&mut rng);
    }
    keys.side_to_move = non_zero(&mut rng);

    keys
}

/// XOR of the castling keys for every right set in `rights`.
#[inline]
pub fn castling_key(keys: &ZobristKeys, rights: u8) -> u64 {
    let mut h = 0;
    for (i, bit) in [CASTLE_WK, CASTLE_WQ, CASTLE_BK, CASTLE_BQ].into_iter().enumerate() {
        if rights & bit != 0 {
            h ^= keys.castling[i];
        }
    }
    h
}

/// Toggles exactly the keys of rights that differ between `old` and `new_`.
#[inline]
pub fn xor_castling_rights_delta(hash: &mut u64, keys: &ZobristKeys, old: u8, new_: u8) {
    *hash ^= castling_key(keys, old ^ new_);
}

/// Full hash of a snapshot from scratch. The incremental hash must always equal this.
pub fn hash_state(state: &BoardState) -> u64 {
    let keys = zobrist_keys();
    let mut h: u64 = 0;

    for (ci, color) in state.pieces.iter().enumerate() {
        for (pi, &bb) in color.iter().enumerate() {
            let mut bb = bb;
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                h ^= keys.piece[ci][pi][sq];
                bb &= bb - 1;
            }
        }
    }

    if state.side_to_move == crate::board::Color::Black {
        h ^= keys.side_to_move;
    }
    h ^= castling_key(keys, state.castling_rights);
    if let Some(ep) = state.en_passant {
        h ^= keys.ep(ep);
    }
    h
}
