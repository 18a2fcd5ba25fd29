//! Move-by-move replay of a recorded game.
//!
//! A [`Game`] holds the unresolved movetext of one game record together with
//! a [`Board`] that starts in the canonical position. Each call to
//! [`Game::step`] decodes the next token, finds the one piece on the board
//! that can legally make it, and applies it.

use crate::check::in_check;
use crate::movegen::{possible_moves, pseudo_legal_moves};
use crate::san::{NotationError, ParsedMove};
use crate::{Board, BoardError};
use chess_core::{CastleKind, Color, Coord, PieceKind, ValidMove};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// The outcome recorded at the end of a game's movetext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// `1-0`
    WhiteWins,
    /// `0-1`
    BlackWins,
    /// `1/2-1/2`
    Draw,
    /// `*`: game in progress, abandoned or unknown.
    Unfinished,
}

impl GameResult {
    /// All result tokens, longest first so prefix matching is unambiguous.
    pub const TOKENS: [&'static str; 4] = ["1/2-1/2", "1-0", "0-1", "*"];

    /// Parses an exact result token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1-0" => Some(GameResult::WhiteWins),
            "0-1" => Some(GameResult::BlackWins),
            "1/2-1/2" => Some(GameResult::Draw),
            "*" => Some(GameResult::Unfinished),
            _ => None,
        }
    }

    /// Returns the movetext token for this result.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unfinished => "*",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ply as read from the record, not yet resolved against a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveToken {
    pub color: Color,
    pub text: String,
}

impl MoveToken {
    pub fn new(color: Color, text: impl Into<String>) -> Self {
        MoveToken {
            color,
            text: text.into(),
        }
    }

    /// Returns "W" or "B".
    pub fn player_label(&self) -> &'static str {
        self.color.label()
    }
}

/// A ply that has been resolved and applied to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// Zero-based ply index.
    pub ply: usize,
    pub color: Color,
    /// Movetext as it appeared in the record.
    pub text: String,
    /// Departure square (the king's square for castling).
    pub from: Coord,
    /// Arrival square (the king's target square for castling).
    pub to: Coord,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub castle: Option<CastleKind>,
    pub promotion: Option<PieceKind>,
    /// Whether the moved piece attacks the enemy king from `to`.
    pub gives_check: bool,
}

/// Error type for replay.
///
/// Every variant names the failing ply, its movetext, and the side to move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("ply {ply} ({color}): {source}")]
    Notation {
        ply: usize,
        text: String,
        color: Color,
        source: NotationError,
    },

    #[error("ply {ply} ({color}): no legal move matches '{text}'")]
    AmbiguousOrIllegalMove {
        ply: usize,
        text: String,
        color: Color,
    },

    #[error("ply {ply} ({color}): cannot apply '{text}': {source}")]
    Board {
        ply: usize,
        text: String,
        color: Color,
        source: BoardError,
    },
}

impl ReplayError {
    /// Returns the index of the ply that failed.
    pub fn ply(&self) -> usize {
        match self {
            ReplayError::Notation { ply, .. }
            | ReplayError::AmbiguousOrIllegalMove { ply, .. }
            | ReplayError::Board { ply, .. } => *ply,
        }
    }
}

/// How a decoded move maps onto the board.
#[derive(Debug, Clone, Copy)]
enum Resolution {
    Castle {
        kind: CastleKind,
        king_from: Coord,
        rook_from: Coord,
    },
    Normal(ValidMove),
}

/// A recorded game and the board it is being replayed on.
#[derive(Debug, Clone)]
pub struct Game {
    tags: HashMap<String, String>,
    moves: Vec<MoveToken>,
    result: Option<GameResult>,
    board: Board,
    /// Number of plies already applied.
    cursor: usize,
    history: Vec<AppliedMove>,
}

impl Game {
    /// Creates a game ready to replay `moves` from the starting position.
    pub fn new(tags: HashMap<String, String>, moves: Vec<MoveToken>) -> Self {
        Self::from_board(tags, moves, Board::new())
    }

    /// Creates a game that replays `moves` from an arbitrary board.
    pub fn from_board(
        tags: HashMap<String, String>,
        moves: Vec<MoveToken>,
        board: Board,
    ) -> Self {
        Game {
            tags,
            moves,
            result: None,
            board,
            cursor: 0,
            history: Vec::new(),
        }
    }

    /// Sets the recorded result.
    pub fn with_result(mut self, result: GameResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        &self.tags
    }

    /// Returns the value of a tag pair, if present.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn moves(&self) -> &[MoveToken] {
        &self.moves
    }

    /// Returns the result token that closed the movetext, if any.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns the board after the plies applied so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of plies applied so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[AppliedMove] {
        &self.history
    }

    /// Returns true once every ply has been applied.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.moves.len()
    }

    /// Returns the side whose ply is next, or `None` when finished.
    pub fn side_to_move(&self) -> Option<Color> {
        self.moves.get(self.cursor).map(|t| t.color)
    }

    /// Applies up to `n` plies and returns how many were applied.
    ///
    /// Stops at the first ply that cannot be resolved; plies applied before
    /// it stay on the board. Past the last ply this is a no-op.
    pub fn execute(&mut self, n: usize) -> Result<usize, ReplayError> {
        let mut applied = 0;
        while applied < n && self.step()?.is_some() {
            applied += 1;
        }
        Ok(applied)
    }

    /// Applies every remaining ply.
    pub fn execute_all(&mut self) -> Result<usize, ReplayError> {
        self.execute(usize::MAX)
    }

    /// Applies the next ply.
    ///
    /// Returns `Ok(None)` when there is nothing left to apply. On error the
    /// board and cursor are left as they were before the call.
    pub fn step(&mut self) -> Result<Option<&AppliedMove>, ReplayError> {
        let Some(token) = self.moves.get(self.cursor) else {
            return Ok(None);
        };
        let ply = self.cursor;
        let color = token.color;
        let text = token.text.clone();

        let applied = self.apply(ply, color, &text).map_err(|e| {
            warn!(ply, %color, text = %text, error = %e, "cannot replay ply");
            e
        })?;

        self.history.push(applied);
        self.cursor += 1;
        Ok(self.history.last())
    }

    fn apply(&mut self, ply: usize, color: Color, text: &str) -> Result<AppliedMove, ReplayError> {
        let parsed = ParsedMove::parse(text, color).map_err(|source| ReplayError::Notation {
            ply,
            text: text.to_string(),
            color,
            source,
        })?;

        let resolution =
            resolve(&self.board, &parsed).ok_or_else(|| ReplayError::AmbiguousOrIllegalMove {
                ply,
                text: text.to_string(),
                color,
            })?;

        let board_error = |source: BoardError| ReplayError::Board {
            ply,
            text: text.to_string(),
            color,
            source,
        };

        match resolution {
            Resolution::Castle {
                kind,
                king_from,
                rook_from,
            } => {
                let row = king_from.row;
                let king_to = Coord::new(row, kind.king_target_col());
                let rook_to = Coord::new(row, kind.rook_target_col());

                let mut next = self.board.clone();
                next.move_piece(king_from, king_to).map_err(board_error)?;
                next.move_piece(rook_from, rook_to).map_err(board_error)?;
                self.board = next;

                debug!(ply, %color, castle = kind.notation(), "castled");
                Ok(AppliedMove {
                    ply,
                    color,
                    text: text.to_string(),
                    from: king_from,
                    to: king_to,
                    is_capture: false,
                    is_en_passant: false,
                    castle: Some(kind),
                    promotion: None,
                    gives_check: in_check(&self.board, color.opposite()),
                })
            }
            Resolution::Normal(m) => {
                let mut next = self.board.clone();
                play(&mut next, &m).map_err(board_error)?;
                let mut gives_check = m.gives_check;
                if let Some(kind) = parsed.promotion {
                    next.promote(m.to, kind).map_err(board_error)?;
                    // The pawn lookahead cannot see what the pawn becomes.
                    gives_check = next
                        .king_square(color.opposite())
                        .is_some_and(|king| pseudo_legal_moves(&next, m.to).reaches(king));
                    debug!(ply, %color, square = %m.to, piece = %kind, "promoted");
                }
                self.board = next;

                trace!(
                    ply,
                    %color,
                    from = %m.from,
                    to = %m.to,
                    capture = m.is_capture,
                    en_passant = m.is_en_passant,
                    check = gives_check,
                    "applied ply"
                );
                Ok(AppliedMove {
                    ply,
                    color,
                    text: text.to_string(),
                    from: m.from,
                    to: m.to,
                    is_capture: m.is_capture,
                    is_en_passant: m.is_en_passant,
                    castle: None,
                    promotion: parsed.promotion,
                    gives_check,
                })
            }
        }
    }
}

/// Finds how `parsed` applies to `board`, or `None` if no piece can make it.
///
/// Candidates are examined in row-major order and the first one that does
/// not leave the mover's king attacked wins. A pawn token without `x` only
/// matches straight advances, and a promotion only matches moves onto the
/// opponent's back row.
fn resolve(board: &Board, parsed: &ParsedMove) -> Option<Resolution> {
    let color = parsed.color;

    if let Some(kind) = parsed.castle {
        let row = color.back_row();
        let king_from = Coord::new(row, 4);
        let rook_from = Coord::new(row, kind.rook_source_col());
        let king_home = board
            .get(king_from)
            .is_some_and(|p| p.is(PieceKind::King, color));
        let rook_home = board
            .get(rook_from)
            .is_some_and(|p| p.is(PieceKind::Rook, color));
        return (king_home && rook_home).then_some(Resolution::Castle {
            kind,
            king_from,
            rook_from,
        });
    }

    board
        .pieces_of(color)
        .filter(|(from, piece)| piece.kind == parsed.piece && parsed.departs_from(*from))
        .find_map(|(from, _)| {
            possible_moves(board, from)
                .as_slice()
                .iter()
                .copied()
                .filter(|m| parsed.arrives_at(m.to))
                .filter(|m| !parsed.is_capture || m.is_capture)
                .filter(|m| parsed.piece != PieceKind::Pawn || parsed.is_capture || !m.is_capture)
                .filter(|m| parsed.promotion.is_none() || m.to.row == color.opposite().back_row())
                .find(|m| !leaves_king_attacked(board, m, color))
        })
        .map(Resolution::Normal)
}

/// Relocates the moving piece and removes a pawn taken en passant.
fn play(board: &mut Board, m: &ValidMove) -> Result<(), BoardError> {
    let en_passant = is_en_passant(board, m);
    board.move_piece(m.from, m.to)?;
    if en_passant {
        board.clear(Coord::new(m.from.row, m.to.col))?;
    }
    Ok(())
}

/// A pawn moving diagonally onto an empty square captures en passant.
fn is_en_passant(board: &Board, m: &ValidMove) -> bool {
    m.from.col != m.to.col
        && board.is_empty_at(m.to)
        && board
            .occupant(m.from)
            .is_some_and(|p| p.kind == PieceKind::Pawn)
}

fn leaves_king_attacked(board: &Board, m: &ValidMove, color: Color) -> bool {
    let mut scratch = board.clone();
    play(&mut scratch, m).is_err() || in_check(&scratch, color)
}
