/// Maximum number of candidate destinations a single piece can have.
///
/// A Queen in the middle of an otherwise empty board reaches 27 squares; no other piece reaches more.
pub const MAX_CANDIDATES: usize = 27;

/// Deltas for the movement of the Queen, as `(row, column)` pairs.
///
/// These are also the one-step offsets of the King.
pub const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
pub const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the King.
pub const KING_DELTAS: [(i8, i8); 8] = QUEEN_DELTAS;

/// Deltas for the movement of the Knight.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Column deltas of the two squares a Pawn may capture on, relative to its forward direction.
pub const PAWN_CAPTURE_COLS: [i8; 2] = [-1, 1];
