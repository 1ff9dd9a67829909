use shakmaty::Color;
use thiserror::Error;

use super::command::{Command, HELP};
use super::display::{Frame, color_name};
use crate::board::Coord;
use crate::feedback::compute_feedback;
use crate::game_logic::{GameState, GameStatus};
use crate::{BoardDisplay, MoveInput};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Checkmate { winner: Color },
    Stalemate,
    /// The player quit or input ran out.
    Quit,
}

/// Failure of one of the I/O collaborators; game errors never end a session.
#[derive(Debug, Error)]
pub enum SessionError<I, D> {
    #[error("reading input failed: {0}")]
    Input(I),
    #[error("updating display failed: {0}")]
    Display(D),
}

/// Runs the turn loop until checkmate, stalemate or quit.
///
/// Each turn shows the board, announces check or the end of the game, then
/// reads one command. Rejected moves and bad commands are reported through
/// the display and the loop continues.
pub fn run_session<I, D>(
    game: &mut GameState,
    input: &mut I,
    display: &mut D,
) -> Result<SessionEnd, SessionError<I::Error, D::Error>>
where
    I: MoveInput,
    D: BoardDisplay,
{
    let input_failed = SessionError::<I::Error, D::Error>::Input;
    let display_failed = SessionError::<I::Error, D::Error>::Display;
    let notify = |display: &mut D, message: &str| display.notify(message).map_err(display_failed);

    let mut selected: Option<Coord> = None;

    loop {
        let status = game.status();
        let board = game.board_snapshot();
        let feedback = compute_feedback(&*game, selected.take());
        let frame = Frame {
            board: &board,
            feedback: &feedback,
            to_move: game.current_player(),
        };
        display.show(&frame).map_err(display_failed)?;

        match status {
            GameStatus::Checkmate { winner } => {
                notify(display, &format!("Checkmate! {} wins!", color_name(winner)))?;
                return Ok(SessionEnd::Checkmate { winner });
            }
            GameStatus::Stalemate => {
                notify(display, "Stalemate! The game is a draw.")?;
                return Ok(SessionEnd::Stalemate);
            }
            GameStatus::Check => notify(display, "Check!")?,
            GameStatus::Ongoing => {}
        }

        notify(
            display,
            &format!("{} to move:", color_name(game.current_player())),
        )?;
        let Some(line) = input.next_line().map_err(input_failed)? else {
            return Ok(SessionEnd::Quit);
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                notify(display, &err.to_string())?;
                continue;
            }
        };

        match command {
            Command::Move { from, to } => match game.apply_move(&from, &to) {
                Ok(record) => notify(display, &format!("Moved {record}"))?,
                Err(err) => notify(display, &format!("{err}. Try again."))?,
            },
            Command::Hint(square) => selected = Some(square),
            Command::Load(fen) => match GameState::from_fen(&fen) {
                Ok(loaded) => {
                    *game = loaded;
                    notify(display, "Position loaded")?;
                }
                Err(err) => notify(display, &err.to_string())?,
            },
            Command::Reset => {
                *game = GameState::new();
                notify(display, "Reset to initial position")?;
            }
            Command::Help => notify(display, HELP)?,
            Command::Quit => {
                notify(display, "Thanks for playing!")?;
                return Ok(SessionEnd::Quit);
            }
        }
    }
}
