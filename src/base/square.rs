use super::error::{Error, Result};
use std::{fmt, str::FromStr};

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A square of the 8×8 board.
///
/// Internally the square is stored as its flat index `y * 8 + x`, where `x` is the file index
/// (`a` = 0) and `y` is `rank - 1`. The file varies fastest, so iterating flat indices walks
/// `a1, b1, ..., h1, a2, ...`.
///
/// ```ignore
/// let sq: Square = "d4".parse()?;
/// assert_eq!(sq.coordinates(), (3, 3));
/// assert_eq!(sq.to_string(), "d4");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file index `x` and rank index `y`, both in `0..8`.
    pub fn new(x: usize, y: usize) -> Option<Self> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return None;
        }
        Some(Square((y * BOARD_SIZE + x) as u8))
    }

    /// Creates a square from coordinates which are known to be on the board.
    ///
    /// *Note*: Passing coordinates outside `[0, 7]` is a bug in the caller and panics.
    pub fn from_coordinates((x, y): (usize, usize)) -> Self {
        assert!(
            x < BOARD_SIZE && y < BOARD_SIZE,
            "coordinates ({x}, {y}) are outside the board"
        );
        Square((y * BOARD_SIZE + x) as u8)
    }

    /// Derives the square of a flat index (`x = i % 8`, `y = i / 8`).
    ///
    /// *Note*: `index` must be below [`NUM_SQUARES`].
    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_SQUARES, "flat index {index} is outside the board");
        Square(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// File index, `a` = 0.
    pub fn x(self) -> usize {
        self.index() % BOARD_SIZE
    }

    /// Rank index, rank 1 = 0.
    pub fn y(self) -> usize {
        self.index() / BOARD_SIZE
    }

    pub fn coordinates(self) -> (usize, usize) {
        (self.x(), self.y())
    }

    pub fn file_char(self) -> char {
        (b'a' + self.x() as u8) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.y() as u8) as char
    }

    /// All squares in flat-index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let &[file, rank] = s.as_bytes() else {
            return Err(Error::InvalidSquare(s.to_owned()));
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(Error::InvalidSquare(s.to_owned()));
        }
        Square::new((file - b'a') as usize, (rank - b'1') as usize).ok_or_else(|| Error::InvalidSquare(s.to_owned()))
    }
}
