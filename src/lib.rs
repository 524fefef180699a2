pub mod bitboard;
pub mod board;
pub mod engine;
pub mod error;
pub mod hash;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod search;
pub mod square;
pub mod status;
pub mod utils;

pub use board::{Board, Color, Piece};
pub use engine::Engine;
pub use error::{EngineError, FenError};
pub use moves::types::Move;
