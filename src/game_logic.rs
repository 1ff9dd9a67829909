pub mod rules;

use std::fmt;

use shakmaty::Color;
use thiserror::Error;

use crate::board::{Board, Coord, CoordParseError, PieceView, SetupError, Snapshot};
pub use rules::{CorruptState, LegalMove};

/// Why a move was rejected. The game is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid position '{input}': {source}")]
    InvalidNotation {
        input: String,
        source: CoordParseError,
    },
    #[error("illegal move {from} to {to}")]
    IllegalMove { from: Coord, to: Coord },
    #[error("moving {from} to {to} would leave your king in check")]
    SelfCheck { from: Coord, to: Coord },
}

/// One committed move in the game log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub piece: PieceView,
    pub captured: Option<PieceView>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

/// Outcome of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Checkmate { .. } | Self::Stalemate)
    }
}

/// Abort on a broken king invariant. Legal play cannot reach this.
fn intact<T>(result: Result<T, CorruptState>) -> T {
    result.unwrap_or_else(|err| {
        log::error!("{err}");
        panic!("{err}")
    })
}

/// One game session: the board, whose turn it is and the log of moves.
///
/// [`GameState::apply_move`] is the only way the position changes after
/// construction. A rejected move leaves every field untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    move_history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, White to move.
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// Start a session from an arbitrary board.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self {
            board,
            current_player: to_move,
            move_history: Vec::new(),
        }
    }

    /// Start a session from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let (board, to_move) = Board::from_fen(fen)?;
        Ok(Self::from_board(board, to_move))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn board_snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// Play a move given in algebraic notation, e.g. `apply_move("e2", "e4")`.
    pub fn apply_move(&mut self, from: &str, to: &str) -> Result<MoveRecord, MoveError> {
        let from = parse_notation(from)?;
        let to = parse_notation(to)?;
        self.play(from, to)
    }

    /// Play a move between two squares.
    ///
    /// Checks piece rules and turn ownership, then self-check, and only
    /// then commits.
    pub fn play(&mut self, from: Coord, to: Coord) -> Result<MoveRecord, MoveError> {
        if !rules::is_valid_move(&self.board, self.current_player, from, to) {
            log::debug!("rejected {from}-{to}: illegal for {:?}", self.current_player);
            return Err(MoveError::IllegalMove { from, to });
        }
        if intact(rules::would_be_in_check_after_move(&self.board, from, to)) {
            log::debug!("rejected {from}-{to}: leaves own king in check");
            return Err(MoveError::SelfCheck { from, to });
        }

        let Some(mut piece) = self.board.take(from) else {
            return Err(MoveError::IllegalMove { from, to });
        };
        piece.mark_moved();
        let captured = self.board.put(to, piece);

        let record = MoveRecord {
            from,
            to,
            piece: piece.view(),
            captured: captured.as_ref().map(|p| p.view()),
        };
        self.move_history.push(record);
        self.current_player = self.current_player.other();

        log::info!("{:?} played {record}", piece.color());
        Ok(record)
    }

    /// Whether `color`'s King is currently attacked.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no King on the board.
    pub fn is_in_check(&self, color: Color) -> bool {
        intact(rules::is_in_check(&self.board, color))
    }

    /// Squares of the pieces giving check to `color`.
    pub fn checkers(&self, color: Color) -> Vec<Coord> {
        intact(rules::checkers(&self.board, color))
    }

    /// In check with no legal move.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no King on the board.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !intact(rules::has_legal_move(&self.board, color))
    }

    /// Not in check but without a legal move.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no King on the board.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !intact(rules::has_legal_move(&self.board, color))
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        intact(rules::legal_moves(&self.board, self.current_player))
    }

    /// Legal moves for the piece on `from`; empty unless it belongs to the
    /// side to move.
    pub fn legal_moves_from(&self, from: Coord) -> Vec<LegalMove> {
        match self.board.piece_at(from) {
            Some(piece) if piece.color() == self.current_player => {
                intact(rules::legal_moves_from(&self.board, from))
            }
            _ => Vec::new(),
        }
    }

    /// Status of the side to move: checkmate, then stalemate, then check.
    pub fn status(&self) -> GameStatus {
        let color = self.current_player;
        let in_check = self.is_in_check(color);
        let can_move = intact(rules::has_legal_move(&self.board, color));

        let status = match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate {
                winner: color.other(),
            },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        };
        if status.is_over() {
            log::info!("game over: {status:?}");
        }
        status
    }
}

fn parse_notation(input: &str) -> Result<Coord, MoveError> {
    input
        .trim()
        .parse()
        .map_err(|source| MoveError::InvalidNotation {
            input: input.to_string(),
            source,
        })
}
