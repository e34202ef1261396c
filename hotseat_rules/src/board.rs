use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};
use log::{debug, trace};

use super::{
    attacks, candidate_moves, legal_moves, move_into_check, Color, IllegalCastle, IllegalMove,
    Piece, PieceKind, Square, SquareList,
};

/// The side of the board toward which a King castles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    /// Toward the `h` file ("short" castle).
    Kingside,

    /// Toward the `a` file ("long" castle).
    Queenside,
}

impl CastleSide {
    /// Column on which the King starts, on either side.
    const KING_COL: u8 = 4;

    /// Returns the starting square of the Rook that castles on this side for the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{CastleSide, Color, Square};
    /// assert_eq!(CastleSide::Kingside.rook_square(Color::White), Square::H1);
    /// assert_eq!(CastleSide::Queenside.rook_square(Color::Black), Square::A8);
    /// ```
    pub const fn rook_square(&self, color: Color) -> Square {
        let col = match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        };
        Square::new_unchecked(color.home_row(), col)
    }

    /// Returns the destination of the King after castling on this side with the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{CastleSide, Color, Square};
    /// assert_eq!(CastleSide::Kingside.king_destination(Color::White), Square::G1);
    /// assert_eq!(CastleSide::Queenside.king_destination(Color::Black), Square::C8);
    /// ```
    pub const fn king_destination(&self, color: Color) -> Square {
        let col = match self {
            Self::Kingside => 6,
            Self::Queenside => 2,
        };
        Square::new_unchecked(color.home_row(), col)
    }

    /// Returns the destination of the Rook after castling on this side with the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{CastleSide, Color, Square};
    /// assert_eq!(CastleSide::Kingside.rook_destination(Color::White), Square::F1);
    /// assert_eq!(CastleSide::Queenside.rook_destination(Color::Black), Square::D8);
    /// ```
    pub const fn rook_destination(&self, color: Color) -> Square {
        let col = match self {
            Self::Kingside => 5,
            Self::Queenside => 3,
        };
        Square::new_unchecked(color.home_row(), col)
    }

    /// Returns the starting square of the King for the supplied [`Color`].
    pub const fn king_square(color: Color) -> Square {
        Square::new_unchecked(color.home_row(), Self::KING_COL)
    }

    /// All squares strictly between the King and the Rook on this side.
    fn between(&self, color: Color) -> impl Iterator<Item = Square> {
        let row = color.home_row();
        let cols = match self {
            Self::Kingside => 5..7,
            Self::Queenside => 1..4,
        };
        cols.map(move |col| Square::new_unchecked(row, col))
    }

    /// The squares the King stands on, crosses, and lands on when castling on this side.
    fn king_path(&self, color: Color) -> [Square; 3] {
        let from = Self::king_square(color);
        let to = self.king_destination(color);
        let crossed = self.rook_destination(color);
        [from, crossed, to]
    }

    /// Fetches a human-readable name for this [`CastleSide`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Kingside => "kingside",
            Self::Queenside => "queenside",
        }
    }
}

impl FromStr for CastleSide {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kingside" | "king" | "short" | "o-o" | "0-0" => Ok(Self::Kingside),
            "queenside" | "queen" | "long" | "o-o-o" | "0-0-0" => Ok(Self::Queenside),
            _ => bail!("Castle side must be \"kingside\" or \"queenside\". Got {s:?}"),
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An `8x8` grid of squares, each holding at most one [`Piece`].
///
/// The board owns its pieces by value. Cloning a board therefore yields a fully independent copy:
/// moving a piece on the clone never affects the original, and vice versa.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Board;
    /// let board = Board::new();
    /// assert_eq!(board.iter().count(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            grid: [[None; 8]; 8],
        }
    }

    /// Creates a [`Board`] set up for the start of a game.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Board, Color, PieceKind, Square};
    /// let board = Board::new_game();
    /// assert_eq!(board.piece_at(Square::E1), Some((Color::White, PieceKind::King)));
    /// assert_eq!(board.piece_at(Square::D8), Some((Color::Black, PieceKind::Queen)));
    /// assert_eq!(board.iter().count(), 32);
    /// ```
    pub fn new_game() -> Self {
        let mut board = Self::new();

        for color in Color::iter() {
            for (col, kind) in PieceKind::home_row_order().into_iter().enumerate() {
                let square = Square::new_unchecked(color.home_row(), col as u8);
                board.place(Piece::new(color, kind, square));
            }

            for col in Square::MIN..=Square::MAX {
                let square = Square::new_unchecked(color.pawn_row(), col);
                board.place(Piece::new(color, PieceKind::Pawn, square));
            }
        }

        board
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    pub const fn occupant_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    /// Returns `true` if there is no piece at the given [`Square`].
    pub const fn is_empty(&self, square: Square) -> bool {
        self.occupant_at(square).is_none()
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    pub const fn has(&self, square: Square) -> bool {
        !self.is_empty(square)
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Board, Color, Square};
    /// let board = Board::default();
    /// assert_eq!(board.color_at(Square::A2), Some(Color::White));
    /// assert_eq!(board.color_at(Square::E8), Some(Color::Black));
    /// assert!(board.color_at(Square::E4).is_none());
    /// ```
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.occupant_at(square).map(|piece| piece.color())
    }

    /// Fetches the [`Color`] and [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        self.occupant_at(square).map(|piece| piece.parts())
    }

    /// Places `piece` on its own square, returning whatever piece stood there before.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self[piece.square()].replace(piece)
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Board, PieceKind, Square};
    /// let mut board = Board::default();
    /// let taken = board.take(Square::B1);
    /// assert_eq!(taken.map(|piece| piece.kind()), Some(PieceKind::Knight));
    /// assert!(board.is_empty(Square::B1));
    /// ```
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self[square].take()
    }

    /// An iterator over every piece on the board, row by row starting from `a8`.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().flatten().copied()
    }

    /// An iterator over every piece of `color` on the board.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |piece| piece.color() == color)
    }

    /// Fetches the [`Square`] of the King of the provided [`Color`].
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|piece| piece.is_king())
            .map(|king| king.square())
    }

    /// Moves whatever piece is at `from` to `to`, capturing anything at `to`. No enforcement of legality.
    ///
    /// The moved piece's square is updated and it is marked as having moved.
    /// Returns the captured piece, if any. Does nothing if `from` is empty.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        // Exit early if there is no piece to move
        let mut piece = self.take(from)?;

        piece.update_position(to);
        let captured = self.place(piece);
        trace!("{} {} {from}{to}", piece.color(), piece.kind());

        captured
    }

    /// Moves the piece at `from` to `to` on behalf of `player`, if that move is legal.
    ///
    /// On success, returns the captured piece, if any.
    /// On failure, the board is left exactly as it was.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Board, Color, IllegalMove, Square};
    /// let mut board = Board::new_game();
    /// assert!(board.validate_and_move(Square::E2, Square::E4, Color::White).is_ok());
    /// assert_eq!(
    ///     board.validate_and_move(Square::E7, Square::E5, Color::White),
    ///     Err(IllegalMove::NotYourPiece { square: Square::E7, color: Color::White })
    /// );
    /// ```
    pub fn validate_and_move(
        &mut self,
        from: Square,
        to: Square,
        player: Color,
    ) -> Result<Option<Piece>, IllegalMove> {
        self.check_legality_of(from, to, player)
            .inspect_err(|err| debug!("Rejected {player} move {from}{to}: {err}"))?;

        Ok(self.apply_move(from, to))
    }

    /// Checks whether `player` may move the piece at `from` to `to`.
    pub fn check_legality_of(
        &self,
        from: Square,
        to: Square,
        player: Color,
    ) -> Result<(), IllegalMove> {
        let Some(piece) = self.occupant_at(from) else {
            return Err(IllegalMove::NoPiece { square: from });
        };

        if piece.color() != player {
            return Err(IllegalMove::NotYourPiece {
                square: from,
                color: player,
            });
        }

        if !piece.candidate_moves(self).contains(&to) {
            return Err(IllegalMove::Unreachable { from, to });
        }

        if move_into_check(self, &piece, to) {
            return Err(IllegalMove::SelfCheck { from, to });
        }

        Ok(())
    }

    /// Fetches every legal destination of the piece at `square`.
    ///
    /// Returns an empty list if `square` is empty.
    pub fn legal_moves_from(&self, square: Square) -> SquareList {
        self.occupant_at(square)
            .map(|piece| legal_moves(&piece, self))
            .unwrap_or_default()
    }

    /// Castles `player`'s King toward the chosen `side`.
    ///
    /// The King moves two squares toward the Rook, and the Rook lands on the square the King crossed.
    /// Castling requires that neither the King nor that Rook has moved, that every square between them is empty,
    /// and that the King is not in check and does not cross or land on an attacked square.
    /// On failure, the board is left exactly as it was.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Board, CastleSide, Color, IllegalCastle, Square};
    /// let mut board = Board::new_game();
    /// assert_eq!(
    ///     board.castle(Color::White, CastleSide::Kingside),
    ///     Err(IllegalCastle::Blocked { square: Square::F1 })
    /// );
    ///
    /// board.take(Square::F1);
    /// board.take(Square::G1);
    /// assert!(board.castle(Color::White, CastleSide::Kingside).is_ok());
    /// assert!(board.occupant_at(Square::G1).unwrap().is_king());
    /// assert!(board.occupant_at(Square::F1).unwrap().is_rook());
    /// ```
    pub fn castle(&mut self, player: Color, side: CastleSide) -> Result<(), IllegalCastle> {
        self.check_castle(player, side)
            .inspect_err(|err| debug!("Rejected {player} {side} castle: {err}"))?;

        self.apply_move(
            CastleSide::king_square(player),
            side.king_destination(player),
        );
        self.apply_move(side.rook_square(player), side.rook_destination(player));

        Ok(())
    }

    /// Checks whether `player` may castle toward `side`.
    pub fn check_castle(&self, player: Color, side: CastleSide) -> Result<(), IllegalCastle> {
        let king = self
            .occupant_at(CastleSide::king_square(player))
            .filter(|piece| piece.is_king() && piece.color() == player);
        if !king.is_some_and(|king| king.first_move()) {
            return Err(IllegalCastle::KingMoved);
        }

        let rook_square = side.rook_square(player);
        let Some(rook) = self
            .occupant_at(rook_square)
            .filter(|piece| piece.is_rook() && piece.color() == player)
        else {
            return Err(IllegalCastle::RookMissing {
                square: rook_square,
            });
        };

        if rook.has_moved() {
            return Err(IllegalCastle::RookMoved {
                square: rook_square,
            });
        }

        if let Some(square) = side.between(player).find(|&square| self.has(square)) {
            return Err(IllegalCastle::Blocked { square });
        }

        let opponent = player.opponent();
        if let Some(square) = side
            .king_path(player)
            .into_iter()
            .find(|&square| self.is_attacked(square, opponent))
        {
            return Err(IllegalCastle::Attacked { square });
        }

        Ok(())
    }

    /// Returns `true` if any piece of color `by` attacks `square`.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        self.pieces(by)
            .any(|piece| attacks(&piece, self).contains(&square))
    }

    /// Returns `true` if `player`'s King stands on a square that some opposing piece could move to.
    ///
    /// Returns `false` if `player` has no King on the board.
    pub fn in_check(&self, player: Color) -> bool {
        let Some(king_square) = self.king_square(player) else {
            return false;
        };

        self.pieces(player.opponent())
            .any(|piece| candidate_moves(&piece, self).contains(&king_square))
    }

    /// Returns `true` if any piece of `player` has at least one legal move.
    pub fn has_legal_moves(&self, player: Color) -> bool {
        self.pieces(player).any(|piece| {
            candidate_moves(&piece, self)
                .into_iter()
                .any(|to| !move_into_check(self, &piece, to))
        })
    }

    /// Returns `true` if `player` has no legal move anywhere on the board.
    ///
    /// This does not distinguish checkmate from stalemate: a player with no legal moves who is *not* in check
    /// is also reported as checkmated. Combine with [`Board::in_check`] to tell the two apart.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Board, Color};
    /// let board = Board::new_game();
    /// assert!(!board.is_checkmate(Color::White));
    /// assert!(!board.is_checkmate(Color::Black));
    /// ```
    pub fn is_checkmate(&self, player: Color) -> bool {
        !self.has_legal_moves(player)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.grid[index.row() as usize][index.col() as usize]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.grid[index.row() as usize][index.col() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for row in Square::MIN..=Square::MAX {
            board += &format!("{}| ", 8 - row);

            for col in Square::MIN..=Square::MAX {
                let occupant = match self.occupant_at(Square::new_unchecked(row, col)) {
                    Some(piece) => piece.char(),
                    None => '.',
                };

                board.push(occupant);
                board.push(' ');
            }

            board += "\n";
        }
        board += " +";
        for _ in Square::MIN..=Square::MAX {
            board += "--";
        }
        board += "\n   ";
        for file in 'a'..='h' {
            board.push(file);
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        for piece in self.iter() {
            let moved = if piece.has_moved() { "moved" } else { "unmoved" };
            writeln!(f, "{:?} {} {} ({moved})", piece.square(), piece.color(), piece.kind())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_game_places_every_piece_on_its_own_square() {
        let board = Board::new_game();
        for square in Square::iter() {
            if let Some(piece) = board.occupant_at(square) {
                assert_eq!(piece.square(), square);
                assert!(piece.first_move());
            }
        }

        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn apply_move_captures_and_clears_source() {
        let mut board = Board::new_game();
        let captured = board.apply_move(Square::A1, Square::A7);

        assert_eq!(captured.map(|piece| piece.parts()), Some((Color::Black, PieceKind::Pawn)));
        assert!(board.is_empty(Square::A1));

        let rook = board.occupant_at(Square::A7).unwrap();
        assert_eq!(rook.square(), Square::A7);
        assert!(rook.has_moved());
    }

    #[test]
    fn place_and_take_go_through_square_indexing() {
        let mut board = Board::new();
        let knight = Piece::new(Color::Black, PieceKind::Knight, Square::C6);

        assert!(board.place(knight).is_none());
        assert_eq!(board[Square::C6], Some(knight));
        assert_eq!(board[Square::C6], board.occupant_at(Square::C6));

        let replaced = board.place(Piece::new(Color::White, PieceKind::Bishop, Square::C6));
        assert_eq!(replaced, Some(knight));
        assert_eq!(board[Square::C6].map(|piece| piece.kind()), Some(PieceKind::Bishop));

        assert!(board.take(Square::C6).is_some());
        assert!(board[Square::C6].is_none());
        assert!(board.take(Square::C6).is_none());
    }

    #[test]
    fn apply_move_from_empty_square_does_nothing() {
        let mut board = Board::new_game();
        let before = board.clone();
        assert!(board.apply_move(Square::E4, Square::E5).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn display_draws_white_at_the_bottom() {
        let board = Board::new_game();
        let drawn = board.to_string();
        let mut lines = drawn.lines();

        assert_eq!(lines.next(), Some("8| r n b q k b n r "));
        assert_eq!(lines.nth(6), Some("1| R N B Q K B N R "));
        assert_eq!(drawn.lines().last(), Some("   a b c d e f g h "));
    }

    #[test]
    fn castle_side_parses_aliases() {
        assert_eq!("O-O".parse::<CastleSide>().unwrap(), CastleSide::Kingside);
        assert_eq!("long".parse::<CastleSide>().unwrap(), CastleSide::Queenside);
        assert!("left".parse::<CastleSide>().is_err());
    }

    #[test]
    fn pawn_pushes_do_not_attack() {
        let mut board = Board::new();
        board.place(Piece::new(Color::Black, PieceKind::Pawn, Square::E7));

        assert!(!board.is_attacked(Square::E6, Color::Black));
        assert!(board.is_attacked(Square::D6, Color::Black));
        assert!(board.is_attacked(Square::F6, Color::Black));
    }
}
