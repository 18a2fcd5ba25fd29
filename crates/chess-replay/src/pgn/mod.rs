//! Game-record (PGN) reading.
//!
//! A record is a sequence of games. Each game is a tag section of
//! `[Name "Value"]` pairs followed by movetext: turn numbers, one token per
//! ply, and a closing result (`1-0`, `0-1`, `1/2-1/2` or `*`).
//!
//! Reading is split in two layers:
//! - [`scanner`] walks characters, tracks line and column, and lexes tag
//!   values and movetext words.
//! - [`reader`] assembles those into [`Game`](crate::Game)s with unresolved
//!   moves, holding back one token when a turn number is glued to the
//!   token before it.

pub mod reader;
pub mod scanner;

pub use reader::{parse_partial, parse_reader, parse_str, GameReader};
pub use scanner::{PgnError, TextPosition, Token};
