use std::{fmt, ops::Neg, str::FromStr};

use anyhow::{bail, Result};

use super::{candidate_moves, legal_moves, move_into_check, Board, Movement, Square, SquareList};

/// Represents the color of a player or piece on the board.
///
/// White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// An iterator over both colors, starting with White.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns this [`Color`]'s opposite / enemy.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Direction of travel along the rows for a Pawn of this [`Color`].
    ///
    /// White starts on row `7` and advances toward row `0`; Black does the opposite.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Color;
    /// assert_eq!(Color::White.forward(), -1);
    /// assert_eq!(Color::Black.forward(), 1);
    /// ```
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The row on which this [`Color`]'s King and Rooks start the game.
    pub const fn home_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The row on which this [`Color`]'s Pawns start the game.
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Color;
    /// assert_eq!(Color::White.name(), "white");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Color must be either \"white\" or \"black\". Found {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "class") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// The order in which pieces are placed on a home row at the start of a game, from file `a` to file `h`.
    pub const fn home_row_order() -> [Self; 8] {
        use PieceKind::*;
        [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
    }

    /// An iterator over all [`PieceKind`]s, starting with Pawn.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::PieceKind;
    /// assert_eq!(PieceKind::Queen.name(), "queen");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Converts this [`PieceKind`] to a lowercase letter.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::PieceKind;
    /// assert_eq!(PieceKind::Knight.char(), 'n');
    /// ```
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// The Unicode glyph used when rendering this [`PieceKind`].
    ///
    /// The filled glyphs are used for both colors; renderers tell the sides apart by foreground color.
    pub const fn symbol(&self) -> char {
        match self {
            Self::Pawn => '♟',
            Self::Knight => '♞',
            Self::Bishop => '♝',
            Self::Rook => '♜',
            Self::Queen => '♛',
            Self::King => '♚',
        }
    }

    /// Fetches the rule by which this [`PieceKind`] moves.
    pub const fn movement(&self) -> Movement {
        Movement::of(*self)
    }

    /// Creates a new [`PieceKind`] from a letter, case-insensitive.
    pub fn from_char(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Accepts either a single letter (`"q"`) or a full name (`"queen"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if let Some(kind) = Self::iter().find(|kind| kind.name() == lower) {
            return Ok(kind);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Invalid str for PieceKind: Got {s:?}"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a single chess piece standing on a [`Board`].
///
/// A piece knows its own [`Square`] and whether it has ever moved.
/// The [`Board`] that owns it keeps both in sync with the grid; pieces never hold a reference back to their board,
/// so move generation takes the board as a parameter instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    square: Square,
    has_moved: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`] standing on `square`.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Color, Piece, PieceKind, Square};
    /// let knight = Piece::new(Color::White, PieceKind::Knight, Square::B1);
    /// assert_eq!(knight.square(), Square::B1);
    /// assert!(knight.first_move());
    /// ```
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
            has_moved: false,
        }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Fetches the [`Square`] this [`Piece`] currently stands on.
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns `true` once this [`Piece`] has moved at least once.
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns `true` if this [`Piece`] has never moved.
    pub const fn first_move(&self) -> bool {
        !self.has_moved
    }

    /// Fetches the [`Color`] and [`PieceKind`] of this [`Piece`].
    pub const fn parts(&self) -> (Color, PieceKind) {
        (self.color, self.kind)
    }

    /// Returns `true` if this [`Piece`] is a King.
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns `true` if this [`Piece`] is a Rook.
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if this [`Piece`] is a Pawn.
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Moves this [`Piece`] to `square`, marking it as having moved.
    ///
    /// This only updates the piece itself. Use [`Board::apply_move`] to move a piece on a board.
    pub fn update_position(&mut self, square: Square) {
        self.square = square;
        self.has_moved = true;
    }

    /// Every destination this [`Piece`] could reach on `board`, ignoring whether doing so would leave its own King in check.
    pub fn candidate_moves(&self, board: &Board) -> SquareList {
        candidate_moves(self, board)
    }

    /// Returns `true` if moving this [`Piece`] to `to` on `board` would leave its own King in check.
    pub fn move_into_check(&self, board: &Board, to: Square) -> bool {
        move_into_check(board, self, to)
    }

    /// Every destination this [`Piece`] may legally move to on `board`.
    pub fn legal_moves(&self, board: &Board) -> SquareList {
        legal_moves(self, board)
    }

    /// Converts this [`Piece`] into a letter: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::{Color, Piece, PieceKind, Square};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Queen, Square::D1).char(), 'Q');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Pawn, Square::D7).char(), 'p');
    /// ```
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn update_position_marks_piece_as_moved() {
        let mut rook = Piece::new(Color::Black, PieceKind::Rook, Square::H8);
        assert!(rook.first_move());

        rook.update_position(Square::H5);
        assert_eq!(rook.square(), Square::H5);
        assert!(rook.has_moved());
        assert_eq!(rook.parts(), (Color::Black, PieceKind::Rook));
    }

    #[test]
    fn piece_kind_parses_letters_and_names() {
        assert_eq!("Q".parse::<PieceKind>().unwrap(), PieceKind::Queen);
        assert_eq!("knight".parse::<PieceKind>().unwrap(), PieceKind::Knight);
        assert!("x".parse::<PieceKind>().is_err());
        assert!("queens".parse::<PieceKind>().is_err());
    }

    #[test]
    fn color_parses_and_negates() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("Black".parse::<Color>().unwrap(), Color::Black);
        assert!("red".parse::<Color>().is_err());
        assert_eq!(-Color::White, Color::Black);
    }
}
