use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

/// Represents a single square on an `8x8` chess board, as a `(row, column)` pair.
///
/// Rows are counted from Black's side of the board, so row `0` is rank `8` and row `7` is rank `1`.
/// Columns are counted from the `a` file.
/// ```text
/// 8| (0,0) (0,1) ... (0,7)
/// 7| (1,0) (1,1) ... (1,7)
///  |  ...
/// 1| (7,0) (7,1) ... (7,7)
///  +---------------------
///      a     b   ...   h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const A1: Self = Self::new_unchecked(7, 0);
    pub const A2: Self = Self::new_unchecked(6, 0);
    pub const A3: Self = Self::new_unchecked(5, 0);
    pub const A4: Self = Self::new_unchecked(4, 0);
    pub const A5: Self = Self::new_unchecked(3, 0);
    pub const A6: Self = Self::new_unchecked(2, 0);
    pub const A7: Self = Self::new_unchecked(1, 0);
    pub const A8: Self = Self::new_unchecked(0, 0);

    pub const B1: Self = Self::new_unchecked(7, 1);
    pub const B2: Self = Self::new_unchecked(6, 1);
    pub const B3: Self = Self::new_unchecked(5, 1);
    pub const B4: Self = Self::new_unchecked(4, 1);
    pub const B5: Self = Self::new_unchecked(3, 1);
    pub const B6: Self = Self::new_unchecked(2, 1);
    pub const B7: Self = Self::new_unchecked(1, 1);
    pub const B8: Self = Self::new_unchecked(0, 1);

    pub const C1: Self = Self::new_unchecked(7, 2);
    pub const C2: Self = Self::new_unchecked(6, 2);
    pub const C3: Self = Self::new_unchecked(5, 2);
    pub const C4: Self = Self::new_unchecked(4, 2);
    pub const C5: Self = Self::new_unchecked(3, 2);
    pub const C6: Self = Self::new_unchecked(2, 2);
    pub const C7: Self = Self::new_unchecked(1, 2);
    pub const C8: Self = Self::new_unchecked(0, 2);

    pub const D1: Self = Self::new_unchecked(7, 3);
    pub const D2: Self = Self::new_unchecked(6, 3);
    pub const D3: Self = Self::new_unchecked(5, 3);
    pub const D4: Self = Self::new_unchecked(4, 3);
    pub const D5: Self = Self::new_unchecked(3, 3);
    pub const D6: Self = Self::new_unchecked(2, 3);
    pub const D7: Self = Self::new_unchecked(1, 3);
    pub const D8: Self = Self::new_unchecked(0, 3);

    pub const E1: Self = Self::new_unchecked(7, 4);
    pub const E2: Self = Self::new_unchecked(6, 4);
    pub const E3: Self = Self::new_unchecked(5, 4);
    pub const E4: Self = Self::new_unchecked(4, 4);
    pub const E5: Self = Self::new_unchecked(3, 4);
    pub const E6: Self = Self::new_unchecked(2, 4);
    pub const E7: Self = Self::new_unchecked(1, 4);
    pub const E8: Self = Self::new_unchecked(0, 4);

    pub const F1: Self = Self::new_unchecked(7, 5);
    pub const F2: Self = Self::new_unchecked(6, 5);
    pub const F3: Self = Self::new_unchecked(5, 5);
    pub const F4: Self = Self::new_unchecked(4, 5);
    pub const F5: Self = Self::new_unchecked(3, 5);
    pub const F6: Self = Self::new_unchecked(2, 5);
    pub const F7: Self = Self::new_unchecked(1, 5);
    pub const F8: Self = Self::new_unchecked(0, 5);

    pub const G1: Self = Self::new_unchecked(7, 6);
    pub const G2: Self = Self::new_unchecked(6, 6);
    pub const G3: Self = Self::new_unchecked(5, 6);
    pub const G4: Self = Self::new_unchecked(4, 6);
    pub const G5: Self = Self::new_unchecked(3, 6);
    pub const G6: Self = Self::new_unchecked(2, 6);
    pub const G7: Self = Self::new_unchecked(1, 6);
    pub const G8: Self = Self::new_unchecked(0, 6);

    pub const H1: Self = Self::new_unchecked(7, 7);
    pub const H2: Self = Self::new_unchecked(6, 7);
    pub const H3: Self = Self::new_unchecked(5, 7);
    pub const H4: Self = Self::new_unchecked(4, 7);
    pub const H5: Self = Self::new_unchecked(3, 7);
    pub const H6: Self = Self::new_unchecked(2, 7);
    pub const H7: Self = Self::new_unchecked(1, 7);
    pub const H8: Self = Self::new_unchecked(0, 7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 64;

    /// Returns an iterator over all 64 squares, row by row starting from `a8`.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.next(), Some(Square::A8));
    /// assert_eq!(iter.last(), Some(Square::H1));
    /// ```
    pub fn iter() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX)
            .flat_map(|row| (Self::MIN..=Self::MAX).map(move |col| Self::new_unchecked(row, col)))
    }

    /// Creates a new [`Square`] from the provided row and column.
    ///
    /// Both must be `[0, 7]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Square;
    /// assert_eq!(Square::new(7, 4).unwrap(), Square::E1);
    /// assert!(Square::new(8, 0).is_err());
    /// ```
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if row > Self::MAX || col > Self::MAX {
            bail!(
                "Invalid Square: row and column must be between [{}, {}]. Got ({row}, {col})",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self { row, col })
    }

    /// Creates a new [`Square`] without bounds checking.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is greater than `7` and debug assertions are enabled.
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        debug_assert!(row <= Self::MAX && col <= Self::MAX, "Square out of bounds");
        Self { row, col }
    }

    /// The row of this [`Square`], `0` being Black's home rank.
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// The column of this [`Square`], `0` being the `a` file.
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Shifts this [`Square`] by the provided row and column deltas.
    ///
    /// Returns `None` if the result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Square;
    /// assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
    /// assert_eq!(Square::H1.offset(0, 1), None);
    /// ```
    pub const fn offset(&self, drow: i8, dcol: i8) -> Option<Self> {
        let row = self.row as i8 + drow;
        let col = self.col as i8 + dcol;

        if row < Self::MIN as i8
            || row > Self::MAX as i8
            || col < Self::MIN as i8
            || col > Self::MAX as i8
        {
            None
        } else {
            Some(Self::new_unchecked(row as u8, col as u8))
        }
    }

    /// The file letter (`'a'..='h'`) of this [`Square`].
    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// The rank digit (`'1'..='8'`) of this [`Square`].
    pub const fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    /// Returns `true` if this [`Square`] is a light square.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Square;
    /// assert!(Square::H1.is_light());
    /// assert!(!Square::A1.is_light());
    /// ```
    pub const fn is_light(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// Parses a [`Square`] from algebraic notation such as `"e4"`, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use hotseat_rules::Square;
    /// assert_eq!(Square::from_algebraic("a2").unwrap(), Square::A2);
    /// assert_eq!(Square::from_algebraic("H8").unwrap(), Square::H8);
    /// assert!(Square::from_algebraic("i1").is_err());
    /// ```
    pub fn from_algebraic(notation: &str) -> Result<Self> {
        let mut chars = notation.trim().chars();

        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be a file and a rank, such as \"e4\". Got {notation:?}");
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            bail!("File must be between [a, h]. Got {file:?}");
        }

        let rank = rank
            .to_digit(10)
            .filter(|rank| (1..=8).contains(rank))
            .with_context(|| format!("Rank must be between [1, 8]. Got {rank:?}"))?;

        Self::new(8 - rank as u8, file as u8 - b'a')
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    /// Debug formatting displays a [`Square`] as its algebraic name and `(row, col)` pair.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}
