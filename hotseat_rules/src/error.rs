use std::{error::Error, fmt};

use super::{Color, Square};

/// Reasons a proposed move may be rejected by [`Board::validate_and_move`](crate::Board::validate_and_move).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum IllegalMove {
    /// There is no piece on the source square.
    NoPiece { square: Square },

    /// The piece on the source square belongs to the other player.
    NotYourPiece { square: Square, color: Color },

    /// The piece cannot reach the destination.
    Unreachable { from: Square, to: Square },

    /// The move would leave the mover's own King in check.
    SelfCheck { from: Square, to: Square },
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPiece { square } => write!(f, "No piece to move at {square}"),
            Self::NotYourPiece { square, color } => {
                write!(f, "Can't move the other player's piece at {square} as {color}")
            }
            Self::Unreachable { from, to } => write!(f, "Piece at {from} can not move to {to}"),
            Self::SelfCheck { from, to } => {
                write!(f, "Moving {from} to {to} would place yourself in check")
            }
        }
    }
}

impl Error for IllegalMove {
    //
}

/// Reasons a castle may be rejected by [`Board::castle`](crate::Board::castle).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum IllegalCastle {
    /// The King has already moved (or is not on its starting square).
    KingMoved,

    /// There is no friendly Rook in the corner on the chosen side.
    RookMissing { square: Square },

    /// The Rook on the chosen side has already moved.
    RookMoved { square: Square },

    /// A piece stands between the King and the Rook.
    Blocked { square: Square },

    /// The King is in check, or would pass through or land on an attacked square.
    Attacked { square: Square },
}

impl fmt::Display for IllegalCastle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KingMoved => write!(f, "King has already moved, can't castle"),
            Self::RookMissing { square } => write!(f, "No rook at {square}, can't castle"),
            Self::RookMoved { square } => {
                write!(f, "Rook at {square} has already moved, can't castle")
            }
            Self::Blocked { square } => write!(f, "Piece in the way at {square}, can't castle"),
            Self::Attacked { square } => {
                write!(f, "King would cross or stand on attacked square {square}, can't castle")
            }
        }
    }
}

impl Error for IllegalCastle {
    //
}
