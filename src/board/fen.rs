// src/board/fen.rs

use super::fen_tables::{glyph_to_piece, piece_to_glyph};
use super::{Board, BoardState, Color, Piece, castle_bits::*};
use crate::bitboard::BitboardExt;
use crate::error::FenError;
use crate::square::Square;
use crate::utils::square_index;

impl Board {
    /// Replaces the position with the one described by `fen`.
    ///
    /// Clocks may be omitted (defaulting to `0 1`). On error the board is left
    /// exactly as it was. Undo history is cleared on success.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut s = BoardState {
            pieces: [[0u64; 6]; 2],
            castling_rights: 0,
            side_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist: 0,
        };

        parse_placement(fields[0], &mut s)?;

        s.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        s.castling_rights = parse_castling(fields[2])?;

        s.en_passant = match fields[3] {
            "-" => None,
            text => {
                let sq: Square = text
                    .parse()
                    .map_err(|_| FenError::EnPassant(text.to_string()))?;
                // Only the square behind a pawn that just double-pushed is meaningful.
                let expected_rank = match s.side_to_move {
                    Color::White => 5,
                    Color::Black => 2,
                };
                if sq.rank() != expected_rank || !en_passant_consistent(&s, sq) {
                    return Err(FenError::EnPassant(text.to_string()));
                }
                Some(sq)
            }
        };

        if let Some(hm) = fields.get(4) {
            s.halfmove_clock = hm
                .parse()
                .map_err(|_| FenError::HalfmoveClock(hm.to_string()))?;
        }
        if let Some(fm) = fields.get(5) {
            s.fullmove_number = fm
                .parse()
                .map_err(|_| FenError::FullmoveNumber(fm.to_string()))?;
        }

        let candidate = Board {
            state: s,
            history: Vec::new(),
        };
        candidate.validate().map_err(|_| FenError::KingCount)?;

        self.state = candidate.state;
        self.history.clear();
        self.refresh_zobrist();
        Ok(())
    }

    /// Forsyth–Edwards string for the current position.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece_to_glyph(color, piece));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = self.castling_rights();
        if rights == 0 {
            out.push('-');
        } else {
            for (bit, c) in [(CASTLE_WK, 'K'), (CASTLE_WQ, 'Q'), (CASTLE_BK, 'k'), (CASTLE_BQ, 'q')] {
                if rights & bit != 0 {
                    out.push(c);
                }
            }
        }

        out.push(' ');
        match self.en_passant() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));
        out
    }
}

/// Rank 8 first, files a→h, digits for runs of empty squares.
fn parse_placement(placement: &str, s: &mut BoardState) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (i, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file: u8 = 0;
        for c in rank_text.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::PieceGlyph(c));
                }
                file += run as u8;
            } else {
                let (color, piece) = glyph_to_piece(c).ok_or(FenError::PieceGlyph(c))?;
                if file > 7 {
                    return Err(FenError::RankWidth {
                        rank: rank + 1,
                        files: file + 1,
                    });
                }
                s.pieces[color as usize][piece as usize] |= 1u64 << square_index(file, rank);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth {
                rank: rank + 1,
                files: file,
            });
        }
    }

    Ok(())
}

/// The pawn that just double-pushed must sit in front of `target`, with
/// `target` and the square it crossed from both empty.
fn en_passant_consistent(s: &BoardState, target: Square) -> bool {
    let t = target.index();
    let (pawn_sq, origin_sq) = match s.side_to_move {
        Color::White => (t - 8, t + 8),
        Color::Black => (t + 8, t - 8),
    };
    let pusher = s.side_to_move.opposite();
    let occupied = s.pieces.iter().flatten().fold(0u64, |acc, bb| acc | bb);
    let pawns = s.pieces[pusher as usize][Piece::Pawn as usize];

    pawns.has(pawn_sq) && !occupied.has(t) && !occupied.has(origin_sq)
}

fn parse_castling(field: &str) -> Result<u8, FenError> {
    if field == "-" {
        return Ok(0);
    }
    let mut rights = 0u8;
    for c in field.chars() {
        let bit = match c {
            'K' => CASTLE_WK,
            'Q' => CASTLE_WQ,
            'k' => CASTLE_BK,
            'q' => CASTLE_BQ,
            _ => return Err(FenError::Castling(field.to_string())),
        };
        if rights & bit != 0 {
            return Err(FenError::Castling(field.to_string()));
        }
        rights |= bit;
    }
    Ok(rights)
}
