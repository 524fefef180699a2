use thiserror::Error;

/// Reasons a FEN string is rejected. The board is never partially updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated FEN fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files, expected 8")]
    RankWidth { rank: u8, files: u8 },

    #[error("invalid piece glyph '{0}'")]
    PieceGlyph(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling field '{0}'")]
    Castling(String),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("invalid halfmove clock '{0}'")]
    HalfmoveClock(String),

    #[error("invalid fullmove number '{0}'")]
    FullmoveNumber(String),

    #[error("position must contain exactly one king per side")]
    KingCount,
}

/// Structural problems found by `Board::validate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("bitboard `{0}` overlaps with another piece")]
    Overlap(&'static str),

    #[error("{0} must have exactly one king")]
    KingCount(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("malformed square '{0}'")]
    Malformed(String),

    #[error("square index {0} out of range")]
    OutOfRange(u8),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("illegal move '{0}' in current position")]
    IllegalMove(String),

    #[error("no move to take back")]
    NothingToUndo,
}

pub type EngineResult<T> = Result<T, EngineError>;
