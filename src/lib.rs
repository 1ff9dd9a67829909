pub mod board;
pub mod feedback;
pub mod game_logic;
pub mod terminal;

pub use board::{Board, Coord, Piece, PieceView};
pub use game_logic::{GameState, GameStatus, MoveError, MoveRecord};

/// Start a game from the standard setup with White to move.
#[inline]
pub fn new_game() -> GameState {
    GameState::new()
}

/// Trait for reading player input line by line.
///
/// Abstracts over an interactive terminal and scripted inputs,
/// providing a uniform interface for the session loop.
pub trait MoveInput {
    /// Error type for input read failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Read the next input line, or `None` once input is exhausted.
    fn next_line(&mut self) -> Result<Option<String>, Self::Error>;
}

/// Trait for displaying the board and messages to the players.
///
/// Mirrors [`MoveInput`] on the output side of the session loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given board frame.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants
    /// to their own highlighting (terminal colors, markers, etc.).
    fn show(&mut self, frame: &terminal::Frame<'_>) -> Result<(), Self::Error>;

    /// Show a one-off message such as "Check!" or a rejected move.
    fn notify(&mut self, message: &str) -> Result<(), Self::Error>;
}
