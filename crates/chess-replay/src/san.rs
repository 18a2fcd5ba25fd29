//! Standard Algebraic Notation (SAN) decoding.
//!
//! Turns one movetext token such as `"e4"`, `"Nbd2"`, `"exd5"`, `"c8=Q"` or
//! `"O-O"` into a [`ParsedMove`]. Decoding is purely textual: resolving the
//! move against a board is done by [`crate::Game`].
//!
//! Shapes are recognised by length once the check suffix is removed:
//!
//! | len | shapes                                                         |
//! |-----|----------------------------------------------------------------|
//! | 2   | `e4` (advance), `ed` (compact pawn capture)                    |
//! | 3   | `Nf3`, `exd` / `e:d`                                           |
//! | 4   | `c8=Q`, `Nxf3`, `Nbd2` / `R1e1`, `exd5`                        |
//! | 5   | `Nbxd2` / `R1xe1`, `Qh4e1`                                     |
//! | 6   | `exd8=Q`                                                       |

use chess_core::{CastleKind, Color, Coord, File, PieceKind, Rank};
use thiserror::Error;

/// Error type for movetext decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The token does not match any recognised shape.
    #[error("unparseable movetext: '{0}'")]
    UnparseableMovetext(String),
}

/// A decoded movetext token.
///
/// Every optional field is `None` when the notation did not specify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMove {
    pub piece: PieceKind,
    pub color: Color,
    pub departure_file: Option<File>,
    pub departure_rank: Option<Rank>,
    pub destination_file: Option<File>,
    pub destination_rank: Option<Rank>,
    pub is_check: bool,
    pub is_capture: bool,
    pub castle: Option<CastleKind>,
    pub promotion: Option<PieceKind>,
    /// Never set by the decoder; the notation of an en passant capture looks
    /// like any other pawn capture, so the replay infers it from the board.
    pub is_en_passant: bool,
}

impl ParsedMove {
    fn new(color: Color, is_check: bool) -> Self {
        ParsedMove {
            piece: PieceKind::Pawn,
            color,
            departure_file: None,
            departure_rank: None,
            destination_file: None,
            destination_rank: None,
            is_check,
            is_capture: false,
            castle: None,
            promotion: None,
            is_en_passant: false,
        }
    }

    /// Decodes `text` as a move by `color`.
    pub fn parse(text: &str, color: Color) -> Result<Self, NotationError> {
        parse_move(text, color)
    }

    /// Returns the destination square when both its file and rank are known.
    pub fn destination(&self) -> Option<Coord> {
        Some(Coord::from_file_rank(
            self.destination_file?,
            self.destination_rank?,
        ))
    }

    /// Returns true if `from` satisfies the departure file/rank constraints.
    pub fn departs_from(&self, from: Coord) -> bool {
        self.departure_file.map_or(true, |f| from.file() == Some(f))
            && self.departure_rank.map_or(true, |r| from.rank() == Some(r))
    }

    /// Returns true if `to` satisfies the destination file/rank constraints.
    pub fn arrives_at(&self, to: Coord) -> bool {
        self.destination_file.map_or(true, |f| to.file() == Some(f))
            && self.destination_rank.map_or(true, |r| to.rank() == Some(r))
    }

    fn set_destination(&mut self, file: char, rank: char) -> Option<()> {
        self.destination_file = Some(File::from_san_char(file)?);
        self.destination_rank = Some(Rank::from_char(rank)?);
        Some(())
    }

    fn set_departure(&mut self, c: char) -> Option<()> {
        if let Some(file) = File::from_san_char(c) {
            self.departure_file = Some(file);
        } else {
            self.departure_rank = Some(Rank::from_char(c)?);
        }
        Some(())
    }

    fn set_piece(&mut self, c: char) -> Option<()> {
        self.piece = PieceKind::from_san_char(c)?;
        Some(())
    }

    fn set_promotion(&mut self, c: char) -> Option<()> {
        let kind = PieceKind::from_san_char(c.to_ascii_uppercase())?;
        if !kind.is_promotion_target() {
            return None;
        }
        self.promotion = Some(kind);
        Some(())
    }

    fn set_compact_capture(&mut self, from: char, to: char) -> Option<()> {
        self.departure_file = Some(File::from_san_char(from)?);
        self.destination_file = Some(File::from_san_char(to)?);
        self.is_capture = true;
        Some(())
    }
}

/// Decodes one movetext token for the given side.
///
/// Trailing check (`+`, `#`) and annotation (`!`, `?`) marks are stripped
/// first; a check mark sets [`ParsedMove::is_check`].
pub fn parse_move(text: &str, color: Color) -> Result<ParsedMove, NotationError> {
    let body = text.trim_end_matches(['+', '#', '!', '?']);
    let is_check = text[body.len()..].contains(['+', '#']);

    let mut mv = ParsedMove::new(color, is_check);

    match body {
        "O-O" | "0-0" => {
            mv.piece = PieceKind::King;
            mv.castle = Some(CastleKind::Kingside);
            return Ok(mv);
        }
        "O-O-O" | "0-0-0" => {
            mv.piece = PieceKind::King;
            mv.castle = Some(CastleKind::Queenside);
            return Ok(mv);
        }
        _ => {}
    }

    let chars: Vec<char> = body.chars().collect();
    decode(&chars, &mut mv)
        .map(|()| mv)
        .ok_or_else(|| NotationError::UnparseableMovetext(text.to_string()))
}

fn is_piece_letter(c: char) -> bool {
    PieceKind::from_san_char(c).is_some()
}

fn decode(chars: &[char], mv: &mut ParsedMove) -> Option<()> {
    match *chars {
        [file, rank] if rank.is_ascii_digit() => mv.set_destination(file, rank),
        [from, to] => mv.set_compact_capture(from, to),

        [piece, file, rank] if is_piece_letter(piece) => {
            mv.set_piece(piece)?;
            mv.set_destination(file, rank)
        }
        [from, 'x' | ':', to] => mv.set_compact_capture(from, to),

        [file, rank, '=', promo] => {
            mv.set_destination(file, rank)?;
            mv.set_promotion(promo)
        }
        [piece, 'x' | ':', file, rank] if is_piece_letter(piece) => {
            mv.set_piece(piece)?;
            mv.is_capture = true;
            mv.set_destination(file, rank)
        }
        [piece, from, file, rank] if is_piece_letter(piece) => {
            mv.set_piece(piece)?;
            mv.set_departure(from)?;
            mv.set_destination(file, rank)
        }
        [from, 'x' | ':', file, rank] => {
            mv.departure_file = Some(File::from_san_char(from)?);
            mv.is_capture = true;
            mv.set_destination(file, rank)
        }

        [piece, from, 'x' | ':', file, rank] if is_piece_letter(piece) => {
            mv.set_piece(piece)?;
            mv.set_departure(from)?;
            mv.is_capture = true;
            mv.set_destination(file, rank)
        }
        [piece, from_file, from_rank, file, rank] if is_piece_letter(piece) => {
            mv.set_piece(piece)?;
            mv.departure_file = Some(File::from_san_char(from_file)?);
            mv.departure_rank = Some(Rank::from_char(from_rank)?);
            mv.set_destination(file, rank)
        }

        [from, 'x' | ':', file, rank, '=', promo] => {
            mv.departure_file = Some(File::from_san_char(from)?);
            mv.is_capture = true;
            mv.set_destination(file, rank)?;
            mv.set_promotion(promo)
        }

        _ => None,
    }
}
