//! Rules of two-player chess: board state, per-piece move generation, and legality checks.
//!
//! The [`Board`] owns every [`Piece`] by value. Candidate moves come from [`candidate_moves`],
//! and are filtered into legal moves by [`move_into_check`], which tries each move on a throwaway clone of the board.
//!
//! # Example
//! ```
//! use hotseat_rules::prelude::*;
//!
//! let mut board = Board::new_game();
//! board.validate_and_move(Square::F2, Square::F3, Color::White).unwrap();
//! board.validate_and_move(Square::E7, Square::E5, Color::Black).unwrap();
//! board.validate_and_move(Square::G2, Square::G4, Color::White).unwrap();
//! board.validate_and_move(Square::D8, Square::H4, Color::Black).unwrap();
//!
//! assert!(board.in_check(Color::White));
//! assert!(board.is_checkmate(Color::White));
//! ```

/// The board itself, complete with check, checkmate, and castling logic.
///
/// You probably want to look here.
pub mod board;
/// Reasons a move or castle may be rejected.
pub mod error;
/// All code related to generating moves (candidate and legal) for pieces on a board.
pub mod movegen;
/// Enums for piece kinds and colors, and a struct for a chess piece.
pub mod piece;
/// Squares on a chessboard.
pub mod square;
/// Movement deltas and other constants.
pub mod utils;

pub use board::*;
pub use error::*;
pub use movegen::*;
pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::error::*;
    pub use crate::movegen::*;
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
