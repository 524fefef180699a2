use crate::bitboard::{BitIter, BitboardExt};
use crate::board::{Board, COLORS, Color, Piece};
use crate::moves::movegen::has_legal_move;
use crate::moves::tables::tables;
use crate::search::psqt::{mobility_bonus, psqt_index, table_for};

pub const INF_SCORE: i32 = 32000;
pub const CHECKMATE_SCORE: i32 = 30000;
/// Marks an aborted search. Never a real score.
pub const NONE_SCORE: i32 = -32001;
pub const DRAW_SCORE: i32 = 0;

const MATERIAL_PIECES: [Piece; 5] = [
    Piece::Queen,
    Piece::Rook,
    Piece::Bishop,
    Piece::Knight,
    Piece::Pawn,
];

/// White material minus Black material, from the side to move's point of view.
pub fn count_material(board: &Board) -> i32 {
    let mut score = 0;
    for piece in MATERIAL_PIECES {
        let white = board.pieces(piece, Color::White).count_ones() as i32;
        let black = board.pieces(piece, Color::Black).count_ones() as i32;
        score += (white - black) * piece.value();
    }
    score * board.side_to_move().sign()
}

/// Piece-square sum for one side, White-positive.
fn positional(board: &Board, color: Color) -> i32 {
    let mut score = 0;
    for piece in crate::board::PIECES {
        let table = table_for(piece);
        for sq in BitIter(board.pieces(piece, color)) {
            score += table[psqt_index(color, sq)];
        }
    }
    score
}

/// Mobility of knights and sliders: reachable squares not held by own pieces.
fn mobility(board: &Board, color: Color) -> i32 {
    let t = tables();
    let occupied = board.occupied();
    let not_own = !board.occupancy(color);
    let mut score = 0;

    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        let mut bb = board.pieces(piece, color);
        while bb != 0 {
            let sq = bb.pop_lsb();
            let reach = match piece {
                Piece::Knight => t.knight[sq as usize],
                Piece::Bishop => t.bishop_attacks(sq, occupied),
                Piece::Rook => t.rook_attacks(sq, occupied),
                _ => t.queen_attacks(sq, occupied),
            } & not_own;
            score += mobility_bonus(piece, reach.count_ones());
        }
    }
    score
}

/// Material + piece-square + mobility for the side to move. Does not look for
/// mate or stalemate; callers that care use [`evaluate`].
pub fn static_eval(board: &Board) -> i32 {
    let mut white_pov = 0;
    for color in COLORS {
        let side = positional(board, color) + mobility(board, color);
        white_pov += side * color.sign();
    }
    count_material(board) + white_pov * board.side_to_move().sign()
}

/// Full leaf evaluation. With no legal moves: `-CHECKMATE_SCORE + halfmove clock`
/// when in check (so faster mates compare better), otherwise 0 for stalemate.
pub fn evaluate(board: &mut Board) -> i32 {
    if !has_legal_move(board) {
        return if board.in_check() {
            -CHECKMATE_SCORE + board.halfmove_clock() as i32
        } else {
            DRAW_SCORE
        };
    }
    static_eval(board)
}
