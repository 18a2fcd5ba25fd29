//! Check detection.
//!
//! A king is in check when any opposing piece has a pseudo-legal move onto
//! its square.

use crate::movegen::pseudo_legal_moves;
use crate::Board;
use chess_core::{Color, Coord};

/// Returns true if `color`'s king is attacked.
///
/// A color without a king on the board is never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// Counts the opposing pieces that attack `color`'s king.
pub fn count_checkers(board: &Board, color: Color) -> usize {
    let Some(king) = board.king_square(color) else {
        return 0;
    };
    board
        .pieces_of(color.opposite())
        .filter(|(from, _)| pseudo_legal_moves(board, *from).reaches(king))
        .count()
}

/// Returns true if any piece of color `by` has a pseudo-legal move onto `target`.
///
/// Pawn pushes count as reaching a square, so this is meant for occupied
/// targets such as a king square.
pub fn is_square_attacked(board: &Board, target: Coord, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| pseudo_legal_moves(board, from).reaches(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Piece, PieceKind};

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn place(board: &mut Board, at: &str, kind: PieceKind, color: Color) {
        board.set(sq(at), Piece::new(kind, color)).unwrap();
    }

    #[test]
    fn starting_position_not_in_check() {
        let board = Board::new();
        assert!(!in_check(&board, Color::White));
        assert!(!in_check(&board, Color::Black));
        assert_eq!(count_checkers(&board, Color::White), 0);
    }

    #[test]
    fn rook_gives_check_on_open_file() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "e8", PieceKind::Rook, Color::Black);
        assert!(in_check(&board, Color::White));

        place(&mut board, "e4", PieceKind::Pawn, Color::White);
        assert!(!in_check(&board, Color::White));
    }

    #[test]
    fn pawn_push_does_not_check() {
        let mut board = Board::empty();
        place(&mut board, "e4", PieceKind::King, Color::White);
        place(&mut board, "e5", PieceKind::Pawn, Color::Black);
        assert!(!in_check(&board, Color::White));

        place(&mut board, "d5", PieceKind::Pawn, Color::Black);
        assert!(in_check(&board, Color::White));
    }

    #[test]
    fn double_check_counts_both() {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "e8", PieceKind::Rook, Color::Black);
        place(&mut board, "d3", PieceKind::Knight, Color::Black);
        place(&mut board, "a8", PieceKind::Queen, Color::Black);
        assert_eq!(count_checkers(&board, Color::White), 2);
        assert!(in_check(&board, Color::White));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let mut board = Board::empty();
        place(&mut board, "e8", PieceKind::Queen, Color::Black);
        assert!(!in_check(&board, Color::White));
        assert_eq!(count_checkers(&board, Color::White), 0);
    }

    #[test]
    fn square_attacked_by_knight() {
        let board = Board::new();
        assert!(is_square_attacked(&board, sq("f3"), Color::White));
        assert!(!is_square_attacked(&board, sq("e5"), Color::White));
    }
}
