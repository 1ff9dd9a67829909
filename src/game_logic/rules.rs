//! Move legality over a [`Board`]: per-piece geometry, check detection and
//! legal-move enumeration.
//!
//! Everything here is a pure query. Self-check is evaluated on a copy of the
//! board, so no function in this module mutates the position it is given.

use shakmaty::{Color, Role};
use thiserror::Error;

use crate::board::{Board, Coord, Piece, pawn_direction};

/// A color's King is missing, so check cannot be evaluated.
///
/// Legal play never removes a King; seeing this means the board was
/// built or edited into an invalid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("corrupt board state: no {0:?} king on the board")]
pub struct CorruptState(pub Color);

/// A legal move between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub from: Coord,
    pub to: Coord,
    /// Whether an opposing piece stands on `to`.
    pub is_capture: bool,
}

/// Central legality check for `mover` moving `from` → `to`.
///
/// Verifies the shared preconditions once (a `mover` piece on `from`, a
/// different destination not holding a `mover` piece) and then dispatches to
/// the rule for the piece's role. Self-check is not considered here.
pub fn is_valid_move(board: &Board, mover: Color, from: Coord, to: Coord) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if piece.color() != mover || from == to {
        return false;
    }
    if board.piece_at(to).is_some_and(|dest| dest.color() == mover) {
        return false;
    }

    match piece.role() {
        Role::Pawn => is_valid_pawn_move(board, piece, from, to),
        Role::Rook => is_valid_rook_move(board, from, to),
        Role::Knight => is_valid_knight_move(from, to),
        Role::Bishop => is_valid_bishop_move(board, from, to),
        Role::Queen => is_valid_queen_move(board, from, to),
        Role::King => is_valid_king_move(from, to),
    }
}

fn is_valid_pawn_move(board: &Board, pawn: &Piece, from: Coord, to: Coord) -> bool {
    let dir = pawn_direction(pawn.color());
    let (d_row, d_col) = from.delta(to);

    match (d_row, d_col.abs()) {
        // Single push
        (r, 0) if r == dir => board.is_empty(to),
        // Double push from the unmoved state
        (r, 0) if r == 2 * dir && !pawn.has_moved() => {
            board.is_empty(to) && from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid))
        }
        // Diagonal capture only; no en passant
        (r, 1) if r == dir => board
            .piece_at(to)
            .is_some_and(|target| target.color() != pawn.color()),
        _ => false,
    }
}

fn is_valid_rook_move(board: &Board, from: Coord, to: Coord) -> bool {
    let (d_row, d_col) = from.delta(to);
    (d_row == 0) != (d_col == 0) && board.is_path_clear(from, to)
}

fn is_valid_knight_move(from: Coord, to: Coord) -> bool {
    let (d_row, d_col) = from.delta(to);
    matches!((d_row.abs(), d_col.abs()), (2, 1) | (1, 2))
}

fn is_valid_bishop_move(board: &Board, from: Coord, to: Coord) -> bool {
    let (d_row, d_col) = from.delta(to);
    d_row != 0 && d_row.abs() == d_col.abs() && board.is_path_clear(from, to)
}

fn is_valid_queen_move(board: &Board, from: Coord, to: Coord) -> bool {
    is_valid_rook_move(board, from, to) || is_valid_bishop_move(board, from, to)
}

fn is_valid_king_move(from: Coord, to: Coord) -> bool {
    let (d_row, d_col) = from.delta(to);
    d_row.abs() <= 1 && d_col.abs() <= 1 && (d_row, d_col) != (0, 0)
}

/// Squares of `by`-colored pieces that could legally move onto `target`.
pub fn attackers(board: &Board, target: Coord, by: Color) -> Vec<Coord> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color() == by)
        .map(|(at, _)| at)
        .filter(|&at| is_valid_move(board, by, at, target))
        .collect()
}

/// Squares of the pieces currently giving check to `color`.
pub fn checkers(board: &Board, color: Color) -> Result<Vec<Coord>, CorruptState> {
    let king = board.find_king(color).ok_or(CorruptState(color))?;
    Ok(attackers(board, king, color.other()))
}

/// Whether `color`'s King is attacked by any opposing piece.
pub fn is_in_check(board: &Board, color: Color) -> Result<bool, CorruptState> {
    let king = board.find_king(color).ok_or(CorruptState(color))?;
    let by = color.other();
    Ok(board
        .pieces()
        .filter(|(_, piece)| piece.color() == by)
        .any(|(at, _)| is_valid_move(board, by, at, king)))
}

/// Whether playing `from` → `to` would leave the mover's King in check.
///
/// The trial move is played on a copy of `board`, so the caller's board is
/// unchanged whatever the outcome.
pub fn would_be_in_check_after_move(
    board: &Board,
    from: Coord,
    to: Coord,
) -> Result<bool, CorruptState> {
    let Some(mover) = board.piece_at(from).map(Piece::color) else {
        return Ok(false);
    };

    let mut trial = board.clone();
    trial.relocate(from, to);
    is_in_check(&trial, mover)
}

/// Piece rules plus the self-check test.
fn is_legal(board: &Board, color: Color, from: Coord, to: Coord) -> Result<bool, CorruptState> {
    Ok(is_valid_move(board, color, from, to) && !would_be_in_check_after_move(board, from, to)?)
}

/// All moves for `color` that obey piece rules and do not leave its King
/// in check.
///
/// Brute force over every origin/destination pair; fine for a turn-based
/// game on an 8×8 board.
pub fn legal_moves(board: &Board, color: Color) -> Result<Vec<LegalMove>, CorruptState> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces().filter(|(_, piece)| piece.color() == color) {
        moves.extend(legal_moves_from(board, from)?);
    }
    log::trace!("{} legal moves for {color:?}", moves.len());
    Ok(moves)
}

/// Legal moves of the piece standing on `from`; empty if the square is empty.
pub fn legal_moves_from(board: &Board, from: Coord) -> Result<Vec<LegalMove>, CorruptState> {
    let Some(color) = board.piece_at(from).map(Piece::color) else {
        return Ok(Vec::new());
    };

    let mut moves = Vec::new();
    for to in Coord::all() {
        if is_legal(board, color, from, to)? {
            moves.push(LegalMove {
                from,
                to,
                is_capture: board.piece_at(to).is_some(),
            });
        }
    }
    Ok(moves)
}

/// Whether `color` has at least one legal move. Stops at the first one found.
pub fn has_legal_move(board: &Board, color: Color) -> Result<bool, CorruptState> {
    for (from, _) in board.pieces().filter(|(_, piece)| piece.color() == color) {
        for to in Coord::all() {
            if is_legal(board, color, from, to)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
