//! The 8x8 board and low-level piece relocation.

use chess_core::{Color, Coord, Piece, PieceKind};
use thiserror::Error;

/// Errors from direct board mutation.
///
/// These indicate a logic error upstream: correctly resolved moves never
/// produce them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate out of bounds: {from} -> {to}")]
    OutOfBounds { from: Coord, to: Coord },

    #[error("no piece to move at {0}")]
    EmptySource(Coord),
}

/// Back-row piece order from file a to file h.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of pieces, indexed `[row][col]`.
///
/// Every square always has exactly one occupant; an empty square holds
/// [`Piece::EMPTY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Piece; 8]; 8],
}

impl Board {
    /// Creates a board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup();
        board
    }

    /// Creates a board with every square empty.
    pub const fn empty() -> Self {
        Board {
            squares: [[Piece::EMPTY; 8]; 8],
        }
    }

    /// Wipes the board and places the 32 pieces of the starting position.
    pub fn setup(&mut self) {
        self.squares = [[Piece::EMPTY; 8]; 8];

        for color in Color::ALL {
            let back = color.back_row() as usize;
            let pawns = color.pawn_home_row() as usize;
            for (col, kind) in BACK_ROW.iter().enumerate() {
                self.squares[back][col] = Piece::new(*kind, color);
                self.squares[pawns][col] = Piece::new(PieceKind::Pawn, color);
            }
        }
    }

    /// Returns the occupant at `at`, or `None` if `at` is off the board.
    #[inline]
    pub fn get(&self, at: Coord) -> Option<Piece> {
        if at.is_on_board() {
            Some(self.squares[at.row as usize][at.col as usize])
        } else {
            None
        }
    }

    /// Returns the piece at `at`, or `None` if the square is empty or off the board.
    #[inline]
    pub fn occupant(&self, at: Coord) -> Option<Piece> {
        self.get(at).filter(|p| !p.is_empty())
    }

    /// Returns true if `at` is on the board and empty.
    #[inline]
    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.get(at).is_some_and(Piece::is_empty)
    }

    /// Places `piece` on `at`, replacing whatever was there.
    pub fn set(&mut self, at: Coord, piece: Piece) -> Result<(), BoardError> {
        if !at.is_on_board() {
            return Err(BoardError::OutOfBounds { from: at, to: at });
        }
        self.squares[at.row as usize][at.col as usize] = piece;
        Ok(())
    }

    /// Empties the square at `at`.
    pub fn clear(&mut self, at: Coord) -> Result<(), BoardError> {
        self.set(at, Piece::EMPTY)
    }

    /// Changes the kind of the piece on `at`, keeping its color.
    pub fn promote(&mut self, at: Coord, kind: PieceKind) -> Result<(), BoardError> {
        let piece = self.occupant(at).ok_or(BoardError::EmptySource(at))?;
        self.set(at, Piece::new(kind, piece.color))
    }

    /// Moves the piece on `from` to `to`, capturing whatever stands on `to`.
    ///
    /// Clears the en passant flag of every piece of the mover's color, then
    /// sets it on the moved piece if it is a pawn that advanced two rows.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Result<(), BoardError> {
        if !from.is_on_board() || !to.is_on_board() {
            return Err(BoardError::OutOfBounds { from, to });
        }
        let mut piece = self.occupant(from).ok_or(BoardError::EmptySource(from))?;

        self.squares[from.row as usize][from.col as usize] = Piece::EMPTY;

        for row in self.squares.iter_mut() {
            for square in row.iter_mut() {
                if square.is_color(piece.color) {
                    square.en_passant_eligible = false;
                }
            }
        }

        piece.en_passant_eligible =
            piece.kind == PieceKind::Pawn && (to.row - from.row).abs() == 2;
        self.squares[to.row as usize][to.col as usize] = piece;

        Ok(())
    }

    /// Returns the square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Coord> {
        self.pieces()
            .find(|(_, p)| p.is(PieceKind::King, color))
            .map(|(at, _)| at)
    }

    /// Iterates over occupied squares in row-major order (a1, b1, ..., h8).
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, squares)| {
            squares.iter().enumerate().filter_map(move |(col, piece)| {
                (!piece.is_empty()).then_some((Coord::new(row as i8, col as i8), *piece))
            })
        })
    }

    /// Iterates over the pieces of one color in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Counts the pieces of the given kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.is(kind, color)).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
