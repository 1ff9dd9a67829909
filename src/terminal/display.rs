use std::io::{self, Write};

use shakmaty::{Color, Role};

use crate::BoardDisplay;
use crate::board::{BOARD_SIZE, Coord, PieceView, Snapshot};
use crate::feedback::{BoardFeedback, SquareFeedback};

/// Everything needed to draw one board state.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Snapshot,
    pub feedback: &'a BoardFeedback,
    pub to_move: Color,
}

/// Terminal-based board display.
///
/// Renders a [`Frame`] as an 8×8 grid with Unicode pieces. With color
/// enabled, highlighted squares get an ANSI background matching the
/// feedback type; without it they are wrapped in bracket markers.
#[derive(Debug)]
pub struct TerminalDisplay<W = io::Stdout> {
    out: W,
    color: bool,
}

impl TerminalDisplay {
    /// Display writing to standard output.
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn show(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        render_frame(&mut self.out, frame, self.color)
    }

    fn notify(&mut self, message: &str) -> Result<(), Self::Error> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Capitalized color name for messages.
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Render a frame to any writer. Extracted for testability.
fn render_frame(w: &mut impl Write, frame: &Frame<'_>, color: bool) -> Result<(), DisplayError> {
    writeln!(w)?;
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    for (row, cells) in frame.board.iter().enumerate() {
        let rank = BOARD_SIZE as usize - row;
        write!(w, " {rank} ")?;
        for (col, cell) in cells.iter().enumerate() {
            let feedback = Coord::new(row as i8, col as i8).and_then(|at| frame.feedback.get(at));
            write!(w, "{}", format_square(*cell, feedback, color))?;
        }
        writeln!(w, " {rank}")?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w)?;
    writeln!(w, "Current player: {}", color_name(frame.to_move))?;
    w.flush()?;
    Ok(())
}

/// Unicode symbol for a piece.
fn piece_symbol(piece: PieceView) -> char {
    match (piece.role, piece.color) {
        (Role::Pawn, Color::White) => '♙',
        (Role::Rook, Color::White) => '♖',
        (Role::Knight, Color::White) => '♘',
        (Role::Bishop, Color::White) => '♗',
        (Role::Queen, Color::White) => '♕',
        (Role::King, Color::White) => '♔',
        (Role::Pawn, Color::Black) => '♟',
        (Role::Rook, Color::Black) => '♜',
        (Role::Knight, Color::Black) => '♞',
        (Role::Bishop, Color::Black) => '♝',
        (Role::Queen, Color::Black) => '♛',
        (Role::King, Color::Black) => '♚',
    }
}

/// Map a square's contents and feedback to a three-column cell.
fn format_square(piece: Option<PieceView>, feedback: Option<SquareFeedback>, color: bool) -> String {
    let symbol = piece.map_or('·', piece_symbol);
    let Some(feedback) = feedback else {
        return format!(" {symbol} ");
    };

    if color {
        let background = match feedback {
            SquareFeedback::Destination => "44",
            SquareFeedback::Capture => "41",
            SquareFeedback::Origin => "42",
            SquareFeedback::Check => "45",
            SquareFeedback::Checker => "43",
        };
        format!("\x1b[{background}m {symbol} \x1b[0m")
    } else {
        let (open, close) = match feedback {
            SquareFeedback::Destination => ('(', ')'),
            SquareFeedback::Capture => ('{', '}'),
            SquareFeedback::Origin => ('[', ']'),
            SquareFeedback::Check | SquareFeedback::Checker => ('!', '!'),
        };
        format!("{open}{symbol}{close}")
    }
}
