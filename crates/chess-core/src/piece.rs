//! Chess piece representation.

use crate::Color;

/// What occupies a square. `Empty` is a valid occupant, not the lack of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PieceKind {
    #[default]
    Empty = 0,
    King = 1,
    Queen = 2,
    Bishop = 3,
    Knight = 4,
    Rook = 5,
    Pawn = 6,
}

impl PieceKind {
    /// The six real piece kinds, excluding `Empty`.
    pub const PIECES: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Pawn,
    ];

    /// Parses the uppercase piece letter used in algebraic notation.
    ///
    /// Pawns have no letter, so only `K`, `Q`, `B`, `N` and `R` are accepted.
    pub const fn from_san_char(c: char) -> Option<Self> {
        match c {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            'R' => Some(PieceKind::Rook),
            _ => None,
        }
    }

    /// Returns true if a pawn may promote to this kind.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Empty => "Empty",
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Rook => "Rook",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

/// The occupant of one board square.
///
/// `en_passant_eligible` is only ever set on a pawn that has just advanced
/// two rows; the board clears it for the whole side on that side's next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub en_passant_eligible: bool,
}

impl Piece {
    /// An empty square (White by default, like a freshly wiped board).
    pub const EMPTY: Piece = Piece {
        kind: PieceKind::Empty,
        color: Color::White,
        en_passant_eligible: false,
    };

    /// Creates a piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            en_passant_eligible: false,
        }
    }

    /// Returns true if this square holds no piece.
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self.kind, PieceKind::Empty)
    }

    /// Returns true if this is a real piece of the given color.
    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        !self.is_empty() && self.color == color
    }

    /// Returns true if this is a real piece of the given kind and color.
    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.is_color(color)
    }
}
