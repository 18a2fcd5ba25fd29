//! Board coordinates.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing a two-character square like `"e4"`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    #[error("algebraic square must be exactly 2 characters, got '{0}'")]
    InvalidLength(String),

    #[error("invalid file '{0}': expected a-h")]
    InvalidFile(char),

    #[error("invalid rank '{0}': expected 1-8")]
    InvalidRank(char),
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        Self::from_san_char(c.to_ascii_lowercase())
    }

    /// Creates a file from a lowercase character only.
    ///
    /// Movetext needs this: an uppercase `B` there is a bishop, not a file.
    #[inline]
    pub const fn from_san_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7), which is also the board column.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7), which is also the board row.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A zero-based board coordinate: row 0 is rank 1, column 0 is file a.
///
/// A `Coord` may point off the board (move generation probes past the edges);
/// use [`Coord::is_on_board`] before indexing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    /// Number of rows and columns on the board.
    pub const SIZE: i8 = 8;

    /// Creates a coordinate from row and column.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Coord { row, col }
    }

    /// Creates the coordinate of a file and rank.
    #[inline]
    pub const fn from_file_rank(file: File, rank: Rank) -> Self {
        Coord {
            row: rank.index() as i8,
            col: file.index() as i8,
        }
    }

    /// Parses a square from algebraic notation (e.g. `"e4"` or `"E4"`).
    pub fn from_algebraic(s: &str) -> Result<Self, CoordError> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CoordError::InvalidLength(s.to_string()));
        };
        let file = File::from_char(f).ok_or(CoordError::InvalidFile(f))?;
        let rank = Rank::from_char(r).ok_or(CoordError::InvalidRank(r))?;
        Ok(Coord::from_file_rank(file, rank))
    }

    /// Returns true if both row and column are within 0-7.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < Self::SIZE && self.col >= 0 && self.col < Self::SIZE
    }

    /// Returns the coordinate shifted by the given deltas, possibly off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Coord {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Returns the file of this coordinate, if on the board.
    #[inline]
    pub const fn file(self) -> Option<File> {
        if self.col < 0 {
            return None;
        }
        File::from_index(self.col as u8)
    }

    /// Returns the rank of this coordinate, if on the board.
    #[inline]
    pub const fn rank(self) -> Option<Rank> {
        if self.row < 0 {
            return None;
        }
        Rank::from_index(self.row as u8)
    }

    /// Returns the algebraic notation for this coordinate, if on the board.
    pub fn to_algebraic(self) -> Option<String> {
        Some(format!("{}{}", self.file()?, self.rank()?))
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(s) => write!(f, "Coord({})", s),
            None => write!(f, "Coord({}, {})", self.row, self.col),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}
