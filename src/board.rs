//! Board data model: pieces, placement grid and path geometry.

mod coord;
mod fen;

pub use coord::{BOARD_SIZE, Coord, CoordParseError};
pub use fen::SetupError;

use shakmaty::{Color, Role};

/// Identity of a piece as seen by renderers and the move log.
pub type PieceView = shakmaty::Piece;

/// Grid of piece identities, indexed `[row][col]` with row 0 = rank 8.
pub type Snapshot = [[Option<PieceView>; 8]; 8];

/// Back rank order from the a-file to the h-file.
const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// A piece in play.
///
/// Color and role never change; `has_moved` flips once, on the piece's
/// first committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    role: Role,
    has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, role: Role) -> Self {
        Self {
            color,
            role,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Color and role without movement history.
    #[inline]
    pub const fn view(&self) -> PieceView {
        PieceView {
            color: self.color,
            role: self.role,
        }
    }

    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    pub(crate) const fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }
}

/// Row a color's pawns start on.
#[inline]
pub(crate) const fn pawn_home_row(color: Color) -> i8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row a color's back-rank pieces start on.
#[inline]
pub(crate) const fn back_row(color: Color) -> i8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Row step of a forward pawn move: White toward row 0, Black toward row 7.
#[inline]
pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// An 8×8 grid of optional pieces. Each slot owns the piece standing on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (col, role) in BACK_RANK.into_iter().enumerate() {
                board.squares[back_row(color) as usize][col] = Some(Piece::new(color, role));
            }
            board.squares[pawn_home_row(color) as usize] = [Some(Piece::new(color, Role::Pawn)); 8];
        }
        board
    }

    /// Get the piece at a square, if any.
    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.squares[at.row() as usize][at.col() as usize].as_ref()
    }

    /// Bounds-checked lookup by raw indices; off-board reads as empty.
    pub fn get(&self, row: i8, col: i8) -> Option<&Piece> {
        Coord::new(row, col).and_then(|at| self.piece_at(at))
    }

    #[inline]
    pub fn is_empty(&self, at: Coord) -> bool {
        self.piece_at(at).is_none()
    }

    /// Place a piece, returning whatever occupied the square before.
    pub fn put(&mut self, at: Coord, piece: Piece) -> Option<Piece> {
        self.slot(at).replace(piece)
    }

    /// Remove and return the piece on a square.
    pub fn take(&mut self, at: Coord) -> Option<Piece> {
        self.slot(at).take()
    }

    /// Move the occupant of `from` onto `to`, returning the displaced piece.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        match self.take(from) {
            Some(piece) => self.put(to, piece),
            None => None,
        }
    }

    #[inline]
    fn slot(&mut self, at: Coord) -> &mut Option<Piece> {
        &mut self.squares[at.row() as usize][at.col() as usize]
    }

    /// Occupied squares with their pieces, rank 8 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        Coord::all().filter_map(|at| self.piece_at(at).map(|piece| (at, piece)))
    }

    /// Square of the given color's King, if one is on the board.
    pub fn find_king(&self, color: Color) -> Option<Coord> {
        self.pieces()
            .find(|(_, piece)| piece.role == Role::King && piece.color == color)
            .map(|(at, _)| at)
    }

    /// Piece identities for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.squares
            .map(|row| row.map(|slot| slot.as_ref().map(Piece::view)))
    }

    /// Whether every square strictly between `from` and `to` is empty.
    ///
    /// Only meaningful for squares sharing a row, column or diagonal;
    /// unaligned pairs are reported as blocked. Adjacent squares and
    /// `from == to` have no intermediate squares and are clear.
    pub fn is_path_clear(&self, from: Coord, to: Coord) -> bool {
        let (d_row, d_col) = from.delta(to);
        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return false;
        }

        let step = (d_row.signum(), d_col.signum());
        let distance = d_row.abs().max(d_col.abs());
        (1..distance).all(|i| {
            from.offset(step.0 * i, step.1 * i)
                .is_some_and(|between| self.is_empty(between))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        s.parse().expect("test square should be valid")
    }

    #[test]
    fn standard_setup_places_32_pieces() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(sq("e1")).map(Piece::view),
            Some(PieceView {
                color: Color::White,
                role: Role::King
            })
        );
        assert_eq!(
            board.piece_at(sq("d8")).map(Piece::view),
            Some(PieceView {
                color: Color::Black,
                role: Role::Queen
            })
        );
        assert!(board.pieces().all(|(_, piece)| !piece.has_moved()));
    }

    #[test]
    fn standard_setup_pawn_ranks() {
        let board = Board::standard();
        for file in 'a'..='h' {
            let white = board.piece_at(sq(&format!("{file}2"))).expect("white pawn");
            let black = board.piece_at(sq(&format!("{file}7"))).expect("black pawn");
            assert_eq!((white.color(), white.role()), (Color::White, Role::Pawn));
            assert_eq!((black.color(), black.role()), (Color::Black, Role::Pawn));
        }
    }

    #[test]
    fn find_king_on_standard_board() {
        let board = Board::standard();
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn get_out_of_bounds_is_empty() {
        let board = Board::standard();
        assert!(board.get(-1, 0).is_none());
        assert!(board.get(8, 3).is_none());
        assert!(board.get(7, 4).is_some());
    }

    #[test]
    fn relocate_returns_displaced_piece() {
        let mut board = Board::standard();
        let captured = board.relocate(sq("a1"), sq("a7"));
        assert_eq!(captured.map(|p| p.role()), Some(Role::Pawn));
        assert!(board.is_empty(sq("a1")));
        assert_eq!(board.piece_at(sq("a7")).map(Piece::role), Some(Role::Rook));
    }

    #[test]
    fn path_blocked_on_standard_board() {
        let board = Board::standard();
        assert!(!board.is_path_clear(sq("a1"), sq("a3")));
        assert!(!board.is_path_clear(sq("c1"), sq("h6")));
        assert!(board.is_path_clear(sq("a2"), sq("a7")));
    }

    #[test]
    fn adjacent_and_null_paths_are_clear() {
        let board = Board::standard();
        assert!(board.is_path_clear(sq("a1"), sq("a2")));
        assert!(board.is_path_clear(sq("e1"), sq("e1")));
    }

    #[test]
    fn unaligned_path_is_blocked() {
        assert!(!Board::empty().is_path_clear(sq("a1"), sq("b3")));
    }

    #[test]
    fn path_clearance_is_symmetric() {
        let board = Board::standard();
        for from in Coord::all() {
            for to in Coord::all() {
                assert_eq!(
                    board.is_path_clear(from, to),
                    board.is_path_clear(to, from),
                    "{from} <-> {to}"
                );
            }
        }
    }

    #[test]
    fn snapshot_drops_move_history() {
        let mut board = Board::standard();
        let mut pawn = board.take(sq("e2")).expect("pawn on e2");
        pawn.mark_moved();
        board.put(sq("e4"), pawn);

        let snapshot = board.snapshot();
        assert_eq!(
            snapshot[4][4],
            Some(PieceView {
                color: Color::White,
                role: Role::Pawn
            })
        );
        assert_eq!(snapshot[6][4], None);
    }
}
