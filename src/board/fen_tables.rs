// src/board/fen_tables.rs
// Constant glyph <-> (color, piece) maps shared by FEN and notation.

use super::{Color, Piece};

/// `GLYPHS[color][piece]`, indexed in `Piece` declaration order.
pub(crate) const GLYPHS: [[char; 6]; 2] = [
    ['P', 'N', 'B', 'R', 'Q', 'K'],
    ['p', 'n', 'b', 'r', 'q', 'k'],
];

const PIECE_BY_INDEX: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// ASCII byte -> (color, piece); `None` for anything that is not a piece glyph.
pub(crate) const CHAR_TO_PC: [Option<(Color, Piece)>; 128] = {
    let mut table: [Option<(Color, Piece)>; 128] = [None; 128];
    let mut p = 0;
    while p < 6 {
        table[GLYPHS[0][p] as usize] = Some((Color::White, PIECE_BY_INDEX[p]));
        table[GLYPHS[1][p] as usize] = Some((Color::Black, PIECE_BY_INDEX[p]));
        p += 1;
    }
    table
};

#[inline]
pub(crate) fn glyph_to_piece(c: char) -> Option<(Color, Piece)> {
    if c.is_ascii() {
        CHAR_TO_PC[c as usize]
    } else {
        None
    }
}

#[inline]
pub(crate) const fn piece_to_glyph(color: Color, piece: Piece) -> char {
    GLYPHS[color as usize][piece as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_round_trips() {
        for color in [Color::White, Color::Black] {
            for piece in PIECE_BY_INDEX {
                let g = piece_to_glyph(color, piece);
                assert_eq!(glyph_to_piece(g), Some((color, piece)), "glyph {g}");
            }
        }
    }

    #[test]
    fn non_glyphs_are_rejected() {
        for c in ['x', '1', '/', ' ', 'é'] {
            assert_eq!(glyph_to_piece(c), None);
        }
    }
}
