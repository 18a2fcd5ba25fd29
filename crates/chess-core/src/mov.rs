//! Move representation.

use crate::Coord;
use std::fmt;

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleKind {
    /// Kingside castling (O-O).
    Kingside,
    /// Queenside castling (O-O-O).
    Queenside,
}

impl CastleKind {
    /// Returns the column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> i8 {
        match self {
            CastleKind::Kingside => 6,
            CastleKind::Queenside => 2,
        }
    }

    /// Returns the column the castling rook starts on.
    #[inline]
    pub const fn rook_source_col(self) -> i8 {
        match self {
            CastleKind::Kingside => 7,
            CastleKind::Queenside => 0,
        }
    }

    /// Returns the column the castling rook lands on.
    #[inline]
    pub const fn rook_target_col(self) -> i8 {
        match self {
            CastleKind::Kingside => 5,
            CastleKind::Queenside => 3,
        }
    }

    /// Returns the notation for this castle.
    pub const fn notation(self) -> &'static str {
        match self {
            CastleKind::Kingside => "O-O",
            CastleKind::Queenside => "O-O-O",
        }
    }
}

/// A pseudo-legal move: it follows the piece's movement pattern and the
/// occupancy rules but has not been checked against the mover's king safety.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidMove {
    pub from: Coord,
    pub to: Coord,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub gives_check: bool,
}

impl ValidMove {
    /// A placeholder move (not a real move), used to fill fixed-size buffers.
    pub const NULL: ValidMove = ValidMove::quiet(Coord::new(0, 0), Coord::new(0, 0));

    /// Creates a non-capturing move.
    #[inline]
    pub const fn quiet(from: Coord, to: Coord) -> Self {
        ValidMove {
            from,
            to,
            is_capture: false,
            is_en_passant: false,
            gives_check: false,
        }
    }

    /// Creates a capturing move.
    #[inline]
    pub const fn capture(from: Coord, to: Coord) -> Self {
        ValidMove {
            is_capture: true,
            ..Self::quiet(from, to)
        }
    }

    /// Creates an en passant capture onto the empty square behind the enemy pawn.
    #[inline]
    pub const fn en_passant(from: Coord, to: Coord) -> Self {
        ValidMove {
            is_capture: true,
            is_en_passant: true,
            ..Self::quiet(from, to)
        }
    }
}

impl fmt::Debug for ValidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidMove({})", self)
    }
}

impl fmt::Display for ValidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)?;
        if self.is_en_passant {
            write!(f, " e.p.")?;
        }
        if self.gives_check {
            write!(f, "+")?;
        }
        Ok(())
    }
}
