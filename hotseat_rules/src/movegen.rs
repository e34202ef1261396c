use log::trace;

use super::{
    Board, Piece, PieceKind, Square, BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS, MAX_CANDIDATES,
    PAWN_CAPTURE_COLS, QUEEN_DELTAS, ROOK_DELTAS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_CANDIDATES`] destination squares.
pub type SquareList = arrayvec::ArrayVec<Square, MAX_CANDIDATES>;

/// The rule by which a kind of piece moves.
///
/// Every [`PieceKind`] maps onto exactly one of these through [`PieceKind::movement`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Movement {
    /// Walk outward along each delta until blocked or off the board.
    Slide(&'static [(i8, i8)]),

    /// Apply each delta exactly once.
    Step(&'static [(i8, i8)]),

    /// Push forward onto empty squares, capture diagonally forward.
    Pawn,
}

impl Movement {
    /// Fetches the [`Movement`] of the provided [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Movement, PieceKind, ROOK_DELTAS};
    /// assert_eq!(Movement::of(PieceKind::Rook), Movement::Slide(&ROOK_DELTAS));
    /// assert_eq!(PieceKind::Pawn.movement(), Movement::Pawn);
    /// ```
    pub const fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => Self::Pawn,
            PieceKind::Knight => Self::Step(&KNIGHT_DELTAS),
            PieceKind::Bishop => Self::Slide(&BISHOP_DELTAS),
            PieceKind::Rook => Self::Slide(&ROOK_DELTAS),
            PieceKind::Queen => Self::Slide(&QUEEN_DELTAS),
            PieceKind::King => Self::Step(&KING_DELTAS),
        }
    }
}

/// Computes every destination `piece` could reach on `board`.
///
/// Does not consider whether the move would leave the mover's own King in check; see [`move_into_check`] for that.
///
/// # Example
/// ```
/// # use hotseat_rules::{candidate_moves, Board, Square};
/// let board = Board::new_game();
/// let knight = board.occupant_at(Square::G1).unwrap();
/// let moves = candidate_moves(&knight, &board);
/// assert_eq!(moves.len(), 2);
/// assert!(moves.contains(&Square::F3));
/// assert!(moves.contains(&Square::H3));
/// ```
pub fn candidate_moves(piece: &Piece, board: &Board) -> SquareList {
    let mut moves = SquareList::new();

    match piece.kind().movement() {
        Movement::Slide(deltas) => sliding_moves(piece, board, deltas, &mut moves),
        Movement::Step(deltas) => stepping_moves(piece, board, deltas, &mut moves),
        Movement::Pawn => pawn_moves(piece, board, &mut moves),
    }

    moves
}

fn sliding_moves(piece: &Piece, board: &Board, deltas: &[(i8, i8)], moves: &mut SquareList) {
    let color = piece.color();

    for &(drow, dcol) in deltas {
        let mut ray = piece.square();

        while let Some(to) = ray.offset(drow, dcol) {
            match board.color_at(to) {
                None => moves.push(to),
                Some(other) => {
                    // Blocked; the blocker itself is only reachable if it can be captured
                    if other != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            ray = to;
        }
    }
}

fn stepping_moves(piece: &Piece, board: &Board, deltas: &[(i8, i8)], moves: &mut SquareList) {
    let color = piece.color();

    for &(drow, dcol) in deltas {
        let Some(to) = piece.square().offset(drow, dcol) else {
            continue;
        };

        if board.color_at(to) != Some(color) {
            moves.push(to);
        }
    }
}

fn pawn_moves(piece: &Piece, board: &Board, moves: &mut SquareList) {
    let color = piece.color();
    let from = piece.square();
    let forward = color.forward();

    // Pushes; a blocked single push also blocks the double push
    if let Some(one) = from.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
        moves.push(one);

        if piece.first_move() {
            if let Some(two) = one.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
                moves.push(two);
            }
        }
    }

    // Diagonal captures; never valid for a quiet move
    for dcol in PAWN_CAPTURE_COLS {
        let Some(to) = from.offset(forward, dcol) else {
            continue;
        };

        if board.color_at(to) == Some(color.opponent()) {
            moves.push(to);
        }
    }
}

/// Computes every square `piece` attacks on `board`.
///
/// This equals [`candidate_moves`] for every piece except the Pawn, which attacks both forward diagonals
/// whether or not they hold an enemy, and never attacks the squares it pushes to.
pub fn attacks(piece: &Piece, board: &Board) -> SquareList {
    if !piece.is_pawn() {
        return candidate_moves(piece, board);
    }

    let forward = piece.color().forward();
    PAWN_CAPTURE_COLS
        .into_iter()
        .filter_map(|dcol| piece.square().offset(forward, dcol))
        .collect()
}

/// Returns `true` if moving `piece` to `to` would leave its own King in check.
///
/// The move is tried on a clone of `board`, which is discarded afterwards. `board` itself is never modified.
///
/// # Example
/// ```
/// # use hotseat_rules::{move_into_check, Board, Color, Piece, PieceKind, Square};
/// let mut board = Board::new();
/// board.place(Piece::new(Color::White, PieceKind::King, Square::E1));
/// board.place(Piece::new(Color::White, PieceKind::Rook, Square::E2));
/// board.place(Piece::new(Color::Black, PieceKind::Rook, Square::E8));
/// board.place(Piece::new(Color::Black, PieceKind::King, Square::A8));
///
/// let pinned = board.occupant_at(Square::E2).unwrap();
/// assert!(move_into_check(&board, &pinned, Square::D2));
/// assert!(!move_into_check(&board, &pinned, Square::E5));
/// ```
pub fn move_into_check(board: &Board, piece: &Piece, to: Square) -> bool {
    let mut hypothetical = board.clone();
    hypothetical.apply_move(piece.square(), to);

    let exposed = hypothetical.in_check(piece.color());
    if exposed {
        trace!(
            "{} {} {}{to} would expose its King",
            piece.color(),
            piece.kind(),
            piece.square()
        );
    }

    exposed
}

/// Computes every legal destination of `piece` on `board`: its candidate moves that do not leave its own King in check.
pub fn legal_moves(piece: &Piece, board: &Board) -> SquareList {
    candidate_moves(piece, board)
        .into_iter()
        .filter(|&to| !move_into_check(board, piece, to))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Color;

    /// Checks if `moves` and `expected` contain all the same elements, ignoring order
    fn lists_match(moves: &SquareList, expected: &[Square]) {
        assert_eq!(
            moves.len(),
            expected.len(),
            "\nMoves: {moves:?}\nExpected: {expected:?}"
        );

        for mv in moves {
            assert!(expected.contains(mv), "{mv} not found in {expected:?}");
        }
    }

    fn lone(color: Color, kind: PieceKind, square: Square) -> (Board, Piece) {
        let mut board = Board::new();
        let piece = Piece::new(color, kind, square);
        board.place(piece);
        (board, piece)
    }

    #[test]
    fn queen_on_empty_board_reaches_maximum() {
        let (board, queen) = lone(Color::White, PieceKind::Queen, Square::D4);
        assert_eq!(candidate_moves(&queen, &board).len(), MAX_CANDIDATES);
    }

    #[test]
    fn rook_blockers() {
        // . . . . . . . .
        // . . . . . . . .
        // . . . p . . . .
        // . . . . . . . .
        // . . . R . . P .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        let (mut board, rook) = lone(Color::White, PieceKind::Rook, Square::D4);
        board.place(Piece::new(Color::Black, PieceKind::Pawn, Square::D6));
        board.place(Piece::new(Color::White, PieceKind::Pawn, Square::G4));

        let expected = [
            Square::D1,
            Square::D2,
            Square::D3,
            Square::D5,
            Square::D6,
            Square::A4,
            Square::B4,
            Square::C4,
            Square::E4,
            Square::F4,
        ];

        lists_match(&candidate_moves(&rook, &board), &expected);
    }

    #[test]
    fn bishop_in_corner() {
        let (board, bishop) = lone(Color::Black, PieceKind::Bishop, Square::A1);
        let expected = [
            Square::B2,
            Square::C3,
            Square::D4,
            Square::E5,
            Square::F6,
            Square::G7,
            Square::H8,
        ];

        lists_match(&candidate_moves(&bishop, &board), &expected);
    }

    #[test]
    fn knight_steps_over_pieces() {
        let mut board = Board::new_game();
        let knight = board.occupant_at(Square::B1).unwrap();
        lists_match(&candidate_moves(&knight, &board), &[Square::A3, Square::C3]);

        // Own pieces are excluded, enemy pieces are included
        board.place(Piece::new(Color::Black, PieceKind::Pawn, Square::C3));
        board.place(Piece::new(Color::White, PieceKind::Pawn, Square::A3));
        lists_match(&candidate_moves(&knight, &board), &[Square::C3]);
    }

    #[test]
    fn king_in_corner() {
        let (board, king) = lone(Color::White, PieceKind::King, Square::H1);
        lists_match(
            &candidate_moves(&king, &board),
            &[Square::G1, Square::G2, Square::H2],
        );
    }

    #[test]
    fn pawn_double_push_requires_both_squares_empty() {
        let (mut board, pawn) = lone(Color::White, PieceKind::Pawn, Square::E2);
        lists_match(&candidate_moves(&pawn, &board), &[Square::E3, Square::E4]);

        board.place(Piece::new(Color::Black, PieceKind::Knight, Square::E4));
        lists_match(&candidate_moves(&pawn, &board), &[Square::E3]);

        board.place(Piece::new(Color::Black, PieceKind::Knight, Square::E3));
        lists_match(&candidate_moves(&pawn, &board), &[]);
    }

    #[test]
    fn moved_pawn_pushes_once() {
        let (mut board, _) = lone(Color::Black, PieceKind::Pawn, Square::C7);
        board.apply_move(Square::C7, Square::C6);
        let pawn = board.occupant_at(Square::C6).unwrap();

        lists_match(&candidate_moves(&pawn, &board), &[Square::C5]);
    }

    #[test]
    fn pawn_captures_only_enemies_diagonally() {
        let (mut board, pawn) = lone(Color::Black, PieceKind::Pawn, Square::D7);
        board.place(Piece::new(Color::White, PieceKind::Bishop, Square::C6));
        board.place(Piece::new(Color::Black, PieceKind::Bishop, Square::E6));

        lists_match(
            &candidate_moves(&pawn, &board),
            &[Square::D6, Square::D5, Square::C6],
        );
    }

    #[test]
    fn pawn_on_last_row_has_no_moves() {
        let (board, pawn) = lone(Color::White, PieceKind::Pawn, Square::A8);
        assert!(candidate_moves(&pawn, &board).is_empty());
    }

    #[test]
    fn legal_moves_exclude_pinned_directions() {
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::King, Square::A1));
        board.place(Piece::new(Color::White, PieceKind::Rook, Square::C1));
        board.place(Piece::new(Color::Black, PieceKind::Rook, Square::H1));
        board.place(Piece::new(Color::Black, PieceKind::King, Square::H8));

        let rook = board.occupant_at(Square::C1).unwrap();
        lists_match(
            &legal_moves(&rook, &board),
            &[Square::B1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1],
        );
    }
}
