//! Core types for chess.
//!
//! This crate provides the fundamental types used by the replay engine:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Coord`], [`File`], and [`Rank`] for board coordinates
//! - [`ValidMove`] and [`CastleKind`] for move representation

mod color;
mod coord;
mod mov;
mod piece;

pub use color::Color;
pub use coord::{Coord, CoordError, File, Rank};
pub use mov::{CastleKind, ValidMove};
pub use piece::{Piece, PieceKind};
