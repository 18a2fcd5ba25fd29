//! Move generation.
//!
//! Generates pseudo-legal destinations for a single piece on a [`Board`].
//! Nothing here checks whether the mover's own king is left attacked; that
//! is the job of the replay's candidate filter (see [`crate::check`]).

mod pieces;

use crate::Board;
use chess_core::{Coord, PieceKind, ValidMove};

pub use pieces::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};

/// A list of moves with a fixed maximum capacity.
///
/// A single piece has at most 27 destinations (a centralised queen), so a
/// fixed-size array avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [ValidMove; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves one piece can have.
    pub const MAX_MOVES: usize = 32;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [ValidMove::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: ValidMove) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[ValidMove] {
        &self.moves[..self.len]
    }

    /// Returns a mutable slice of the moves.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ValidMove] {
        &mut self.moves[..self.len]
    }

    /// Returns true if some move lands on `to`.
    #[inline]
    pub fn reaches(&self, to: Coord) -> bool {
        self.as_slice().iter().any(|m| m.to == to)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = ValidMove;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a ValidMove;
    type IntoIter = std::slice::Iter<'a, ValidMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the piece on `from`, tagging each
/// move that would attack the opposing king from its destination.
///
/// Returns an empty list if `from` is empty or off the board.
pub fn possible_moves(board: &Board, from: Coord) -> MoveList {
    let mut moves = pseudo_legal_moves(board, from);
    let Some(piece) = board.occupant(from) else {
        return moves;
    };
    let Some(enemy_king) = board.king_square(piece.color.opposite()) else {
        return moves;
    };

    for m in moves.as_mut_slice() {
        m.gives_check = attacks_from(board, m.from, m.to, enemy_king);
    }
    moves
}

/// Generates the pseudo-legal moves of the piece on `from` without the
/// check lookahead. `gives_check` is always false.
pub fn pseudo_legal_moves(board: &Board, from: Coord) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.occupant(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Rook => pieces::slide(board, from, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Bishop => pieces::slide(board, from, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Queen => pieces::slide(board, from, &QUEEN_DIRECTIONS, &mut moves),
        PieceKind::Knight => pieces::step(board, from, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::King => pieces::step(board, from, &KING_OFFSETS, &mut moves),
        PieceKind::Pawn => pieces::pawn(board, from, &mut moves),
        PieceKind::Empty => {}
    }
    moves
}

/// One bounded lookahead step: relocates only the piece on `from` to `to`
/// on a scratch board and asks whether that piece alone could then capture
/// on `target`. Never recurses into other pieces or further plies.
fn attacks_from(board: &Board, from: Coord, to: Coord, target: Coord) -> bool {
    let mut scratch = board.clone();
    if scratch.move_piece(from, to).is_err() {
        return false;
    }
    pseudo_legal_moves(&scratch, to).reaches(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece};
    use proptest::prelude::*;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn place(board: &mut Board, at: &str, kind: PieceKind, color: Color) {
        board.set(sq(at), Piece::new(kind, color)).unwrap();
    }

    fn destinations(moves: &MoveList) -> Vec<String> {
        let mut v: Vec<String> = moves
            .as_slice()
            .iter()
            .filter_map(|m| m.to.to_algebraic())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = ValidMove::quiet(sq("e2"), sq("e4"));
        let m2 = ValidMove::quiet(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.reaches(sq("d4")));
        assert!(!list.reaches(sq("d3")));
    }

    #[test]
    fn starting_position_counts() {
        let board = Board::new();
        let total: usize = board
            .pieces_of(Color::White)
            .map(|(at, _)| possible_moves(&board, at).len())
            .sum();
        assert_eq!(total, 20);
        assert_eq!(possible_moves(&board, sq("d1")).len(), 0);
        assert_eq!(
            destinations(&possible_moves(&board, sq("g1"))),
            vec!["f3", "h3"]
        );
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::new();
        assert!(possible_moves(&board, sq("e4")).is_empty());
        assert!(possible_moves(&board, Coord::new(9, 9)).is_empty());
    }

    #[test]
    fn rook_stops_at_own_piece_and_captures_enemy() {
        let mut board = Board::empty();
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "a4", PieceKind::Pawn, Color::White);
        place(&mut board, "c1", PieceKind::Knight, Color::Black);
        let moves = pseudo_legal_moves(&board, sq("a1"));
        assert_eq!(destinations(&moves), vec!["a2", "a3", "b1", "c1"]);
        let capture = moves.as_slice().iter().find(|m| m.to == sq("c1")).unwrap();
        assert!(capture.is_capture);
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let mut board = Board::empty();
        place(&mut board, "d4", PieceKind::Queen, Color::White);
        assert_eq!(pseudo_legal_moves(&board, sq("d4")).len(), 27);
    }

    #[test]
    fn knight_in_corner() {
        let mut board = Board::empty();
        place(&mut board, "a1", PieceKind::Knight, Color::Black);
        place(&mut board, "c2", PieceKind::Pawn, Color::Black);
        assert_eq!(destinations(&pseudo_legal_moves(&board, sq("a1"))), vec!["b3"]);
    }

    #[test]
    fn king_steps() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "d2", PieceKind::Pawn, Color::Black);
        let moves = pseudo_legal_moves(&board, sq("e1"));
        assert_eq!(destinations(&moves), vec!["d1", "d2", "e2", "f1", "f2"]);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let mut board = Board::new();
        place(&mut board, "d3", PieceKind::Knight, Color::Black);
        let moves = pseudo_legal_moves(&board, sq("e2"));
        assert_eq!(destinations(&moves), vec!["d3", "e3", "e4"]);
        let push = moves.as_slice().iter().find(|m| m.to == sq("e4")).unwrap();
        assert!(!push.is_capture, "double push is never a capture");
    }

    #[test]
    fn pawn_double_push_needs_clear_path() {
        let mut board = Board::new();
        place(&mut board, "e3", PieceKind::Knight, Color::White);
        assert!(pseudo_legal_moves(&board, sq("e2")).is_empty());

        let mut board = Board::new();
        place(&mut board, "e4", PieceKind::Knight, Color::White);
        assert_eq!(destinations(&pseudo_legal_moves(&board, sq("e2"))), vec!["e3"]);
    }

    #[test]
    fn black_pawn_moves_down() {
        let board = Board::new();
        assert_eq!(
            destinations(&pseudo_legal_moves(&board, sq("c7"))),
            vec!["c5", "c6"]
        );
    }

    #[test]
    fn en_passant_capture_generated() {
        let mut board = Board::new();
        board.move_piece(sq("e2"), sq("e4")).unwrap();
        board.move_piece(sq("a7"), sq("a6")).unwrap();
        board.move_piece(sq("e4"), sq("e5")).unwrap();
        board.move_piece(sq("d7"), sq("d5")).unwrap();

        let moves = pseudo_legal_moves(&board, sq("e5"));
        let ep = moves.as_slice().iter().find(|m| m.to == sq("d6")).unwrap();
        assert!(ep.is_capture);
        assert!(ep.is_en_passant);
        assert!(board.is_empty_at(sq("d6")));
    }

    #[test]
    fn stale_double_step_is_not_capturable() {
        let mut board = Board::new();
        board.move_piece(sq("e2"), sq("e4")).unwrap();
        board.move_piece(sq("d7"), sq("d5")).unwrap();
        board.move_piece(sq("e4"), sq("e5")).unwrap();
        board.move_piece(sq("a7"), sq("a6")).unwrap();
        let moves = pseudo_legal_moves(&board, sq("e5"));
        assert!(!moves.reaches(sq("d6")));
    }

    #[test]
    fn gives_check_lookahead() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "h8", PieceKind::King, Color::Black);
        let moves = possible_moves(&board, sq("a1"));
        let checking: Vec<String> = moves
            .as_slice()
            .iter()
            .filter(|m| m.gives_check)
            .filter_map(|m| m.to.to_algebraic())
            .collect();
        assert_eq!(checking, vec!["a8".to_string()]);
        assert!(moves.as_slice().iter().all(|m| m.gives_check == (m.to == sq("a8"))));
    }

    #[test]
    fn pseudo_legal_never_tags_check() {
        let mut board = Board::empty();
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "h8", PieceKind::King, Color::Black);
        assert!(pseudo_legal_moves(&board, sq("a1"))
            .as_slice()
            .iter()
            .all(|m| !m.gives_check));
    }

    fn arb_piece() -> impl Strategy<Value = Piece> {
        (
            prop::sample::select(PieceKind::PIECES.to_vec()),
            prop::sample::select(Color::ALL.to_vec()),
        )
            .prop_map(|(kind, color)| Piece::new(kind, color))
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        prop::collection::vec(((0i8..8, 0i8..8), arb_piece()), 0..24).prop_map(|placed| {
            let mut board = Board::empty();
            for ((row, col), piece) in placed {
                board.set(Coord::new(row, col), piece).unwrap();
            }
            board
        })
    }

    proptest! {
        #[test]
        fn sliding_paths_are_clear(
            board in arb_board(),
            origin in (0i8..8, 0i8..8),
            kind in prop::sample::select(vec![PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen]),
            color in prop::sample::select(Color::ALL.to_vec())
        ) {
            let mut board = board;
            let from = Coord::new(origin.0, origin.1);
            board.set(from, Piece::new(kind, color)).unwrap();

            for m in &pseudo_legal_moves(&board, from) {
                let d_row = (m.to.row - from.row).signum();
                let d_col = (m.to.col - from.col).signum();
                let mut at = from.offset(d_row, d_col);
                while at != m.to {
                    prop_assert!(board.is_empty_at(at));
                    at = at.offset(d_row, d_col);
                }
                let target = board.get(m.to).unwrap();
                prop_assert!(target.is_empty() || target.color != color);
                prop_assert_eq!(m.is_capture, !target.is_empty());
            }
        }
    }
}
