//! Per-piece move patterns.

use super::MoveList;
use crate::Board;
use chess_core::{Coord, ValidMove};

/// Orthogonal (row, col) directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal (row, col) directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Union of the rook and bishop directions.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Knight jumps as (row, col) offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// King steps as (row, col) offsets.
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

/// Walks each direction one square at a time until blocked.
///
/// A friendly piece stops the walk before its square; an enemy piece is
/// included as a capture and then stops the walk.
pub(super) fn slide(board: &Board, from: Coord, directions: &[(i8, i8)], moves: &mut MoveList) {
    let Some(piece) = board.occupant(from) else {
        return;
    };

    for &(d_row, d_col) in directions {
        let mut to = from.offset(d_row, d_col);
        while let Some(target) = board.get(to) {
            if target.is_empty() {
                moves.push(ValidMove::quiet(from, to));
            } else {
                if target.color != piece.color {
                    moves.push(ValidMove::capture(from, to));
                }
                break;
            }
            to = to.offset(d_row, d_col);
        }
    }
}

/// Evaluates each fixed offset once (knight and king).
pub(super) fn step(board: &Board, from: Coord, offsets: &[(i8, i8)], moves: &mut MoveList) {
    let Some(piece) = board.occupant(from) else {
        return;
    };

    for &(d_row, d_col) in offsets {
        let to = from.offset(d_row, d_col);
        match board.get(to) {
            Some(target) if target.is_empty() => moves.push(ValidMove::quiet(from, to)),
            Some(target) if target.color != piece.color => {
                moves.push(ValidMove::capture(from, to))
            }
            _ => {}
        }
    }
}

/// Pawn pushes, double pushes from the home row, diagonal captures, and
/// en passant captures of an adjacent just-double-stepped enemy pawn.
pub(super) fn pawn(board: &Board, from: Coord, moves: &mut MoveList) {
    let Some(piece) = board.occupant(from) else {
        return;
    };
    let dir = piece.color.pawn_direction();

    let one = from.offset(dir, 0);
    if board.is_empty_at(one) {
        moves.push(ValidMove::quiet(from, one));

        let two = from.offset(2 * dir, 0);
        if from.row == piece.color.pawn_home_row() && board.is_empty_at(two) {
            moves.push(ValidMove::quiet(from, two));
        }
    }

    for d_col in [-1, 1] {
        let to = from.offset(dir, d_col);
        match board.get(to) {
            Some(target) if !target.is_empty() => {
                if target.color != piece.color {
                    moves.push(ValidMove::capture(from, to));
                }
            }
            Some(_) => {
                let beside = board.occupant(from.offset(0, d_col));
                if beside.is_some_and(|p| p.color != piece.color && p.en_passant_eligible) {
                    moves.push(ValidMove::en_passant(from, to));
                }
            }
            None => {}
        }
    }
}
