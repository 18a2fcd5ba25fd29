//! Replays recorded chess games move by move.
//!
//! This crate provides:
//! - [`Board`] - 8x8 placement state and low-level piece relocation
//! - [`movegen`] - pseudo-legal move generation per piece, with [`MoveList`]
//! - [`check`] - king attack detection
//! - [`san`] - decoding of algebraic movetext tokens
//! - [`Game`] - turn-by-turn replay that resolves each token against the board
//! - [`pgn`] - reading game records into [`Game`]s
//! - [`PgnConfig`] - reader options, loadable from TOML
//!
//! # Example
//!
//! ```
//! use chess_replay::{parse_str, Color, Coord, PieceKind};
//!
//! let record = r#"[White "Morphy"]
//! [Black "Duke Karl / Count Isouard"]
//!
//! 1. e4 e5 2. Nf3 d6 3. d4 Bg4 1-0"#;
//!
//! let mut games = parse_str(record).unwrap();
//! let game = &mut games[0];
//! assert_eq!(game.tag("White"), Some("Morphy"));
//!
//! game.execute(3).unwrap();
//! let knight = game.board().get(Coord::from_algebraic("f3").unwrap()).unwrap();
//! assert!(knight.is(PieceKind::Knight, Color::White));
//!
//! game.execute_all().unwrap();
//! assert!(game.is_finished());
//! ```

mod board;
pub mod check;
pub mod config;
mod game;
pub mod movegen;
pub mod pgn;
pub mod san;

pub use board::{Board, BoardError};
pub use check::{count_checkers, in_check, is_square_attacked};
pub use config::{ConfigError, PgnConfig};
pub use game::{AppliedMove, Game, GameResult, MoveToken, ReplayError};
pub use movegen::{possible_moves, pseudo_legal_moves, MoveList};
pub use pgn::{parse_partial, parse_reader, parse_str, GameReader, PgnError, TextPosition};
pub use san::{parse_move, NotationError, ParsedMove};

pub use chess_core::{CastleKind, Color, Coord, CoordError, File, Piece, PieceKind, Rank, ValidMove};
