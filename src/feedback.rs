use crate::board::Coord;
use crate::game_logic::{GameState, LegalMove};

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination for the selected piece
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King currently in check
    Check,
    /// Piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by [`compute_feedback`] and consumed by the terminal
/// renderer to highlight squares: the selected piece, where it may go, and which
/// pieces are involved in a check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Coord, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Coord, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Coord) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any previous entry.
    pub fn set(&mut self, square: Coord, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    /// Returns true if there are no feedback squares to display.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Coord, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Coord, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// King square and attacking pieces when the side to move is in check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king_square: Coord,
    pub checkers: Vec<Coord>,
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game.
pub trait FeedbackSource {
    /// Get all legal moves for the side to move
    fn legal_moves(&self) -> Vec<LegalMove>;

    /// Get check details for the side to move, if in check
    fn check_info(&self) -> Option<CheckInfo>;
}

impl FeedbackSource for GameState {
    fn legal_moves(&self) -> Vec<LegalMove> {
        GameState::legal_moves(self)
    }

    fn check_info(&self) -> Option<CheckInfo> {
        let color = self.current_player();
        let checkers = self.checkers(color);
        if checkers.is_empty() {
            return None;
        }
        self.board().find_king(color).map(|king_square| CheckInfo {
            king_square,
            checkers,
        })
    }
}

/// Compute visual feedback based on current game state.
///
/// - Piece selected: shows it as origin plus its legal destinations
/// - In check: marks the King and every checking piece
///
/// Check markers are applied last so they stay visible on top of move hints.
pub fn compute_feedback(source: &impl FeedbackSource, selected: Option<Coord>) -> BoardFeedback {
    let mut feedback = match selected {
        Some(from) => show_destinations_for(&source.legal_moves(), from),
        None => BoardFeedback::default(),
    };

    if let Some(check) = source.check_info() {
        feedback.set(check.king_square, SquareFeedback::Check);
        for checker in check.checkers {
            feedback.set(checker, SquareFeedback::Checker);
        }
    }
    feedback
}

/// Show legal destinations for a selected piece
fn show_destinations_for(legal_moves: &[LegalMove], from: Coord) -> BoardFeedback {
    std::iter::once((from, SquareFeedback::Origin))
        .chain(
            legal_moves
                .iter()
                .filter(|mv| mv.from == from)
                .map(classify_move),
        )
        .collect::<Vec<_>>()
        .into()
}

/// Classify a move as either a capture or regular destination
fn classify_move(mv: &LegalMove) -> (Coord, SquareFeedback) {
    if mv.is_capture {
        (mv.to, SquareFeedback::Capture)
    } else {
        (mv.to, SquareFeedback::Destination)
    }
}
