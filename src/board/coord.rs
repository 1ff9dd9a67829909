use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i8 = 8;

/// A square on the board addressed by (row, col).
///
/// Row 0 is rank 8 and row 7 is rank 1; col 0 is the a-file.
/// A `Coord` is always on the board: every constructor rejects
/// out-of-range input instead of producing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: i8,
    col: i8,
}

impl Coord {
    /// Creates a coordinate if both components lie in `0..8`.
    pub const fn new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < BOARD_SIZE && col >= 0 && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> i8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> i8 {
        self.col
    }

    /// The square `(d_row, d_col)` away, if it is still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Signed displacement `(to.row - from.row, to.col - from.col)`.
    #[inline]
    pub const fn delta(self, to: Coord) -> (i8, i8) {
        (to.row - self.row, to.col - self.col)
    }

    /// All 64 squares, row by row starting from rank 8.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
    }

    /// Returns the file ('a'-'h') of this square.
    pub fn file(self) -> char {
        (b'a' + self.col as u8) as char
    }

    /// Returns the rank (1-8) of this square.
    pub fn rank(self) -> u8 {
        (BOARD_SIZE - self.row) as u8
    }
}

/// Error when parsing algebraic notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordParseError {
    #[error("expected two characters like \"e4\"")]
    WrongLength,
    #[error("file must be a letter from 'a' to 'h'")]
    BadFile,
    #[error("rank must be a digit from '1' to '8'")]
    BadRank,
}

/// Parse algebraic notation like "e4" (file is case-insensitive).
///
/// # Examples
/// ```
/// # use chess_referee::board::Coord;
/// let square: Coord = "E4".parse().unwrap();
/// assert_eq!((square.row(), square.col()), (4, 4));
/// ```
impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CoordParseError::WrongLength);
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(CoordParseError::BadFile);
        }
        let rank = rank.to_digit(10).ok_or(CoordParseError::BadRank)?;
        if !(1..=8).contains(&rank) {
            return Err(CoordParseError::BadRank);
        }

        let col = (file as u8 - b'a') as i8;
        let row = BOARD_SIZE - rank as i8;
        Coord::new(row, col).ok_or(CoordParseError::BadRank)
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a8", 0, 0)]
    #[test_case("h1", 7, 7)]
    #[test_case("e4", 4, 4)]
    #[test_case("E2", 6, 4; "uppercase file")]
    #[test_case("c7", 1, 2)]
    fn parses_notation(input: &str, row: i8, col: i8) {
        let coord: Coord = input.parse().expect("notation should parse");
        assert_eq!((coord.row(), coord.col()), (row, col));
    }

    #[test_case("i9", CoordParseError::BadFile)]
    #[test_case("e0", CoordParseError::BadRank)]
    #[test_case("e9", CoordParseError::BadRank)]
    #[test_case("ex", CoordParseError::BadRank)]
    #[test_case("", CoordParseError::WrongLength)]
    #[test_case("e", CoordParseError::WrongLength)]
    #[test_case("e44", CoordParseError::WrongLength)]
    #[test_case("é4", CoordParseError::BadFile; "non ascii file")]
    fn rejects_bad_notation(input: &str, expected: CoordParseError) {
        assert_eq!(input.parse::<Coord>(), Err(expected));
    }

    #[test]
    fn display_is_inverse_of_parse() {
        for coord in Coord::all() {
            let text = coord.to_string();
            assert_eq!(text.parse::<Coord>(), Ok(coord), "{text}");
        }
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Coord::new(-1, 0).is_none());
        assert!(Coord::new(0, 8).is_none());
        assert!(Coord::new(8, 8).is_none());
        assert!(Coord::new(7, 7).is_some());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Coord::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 2), Coord::new(1, 2));
    }

    #[test]
    fn all_yields_every_square_once() {
        let squares: std::collections::HashSet<_> = Coord::all().collect();
        assert_eq!(squares.len(), 64);
    }
}
