//! Text front end: command parsing, input sources, board rendering and the
//! turn loop that drives a [`GameState`].

mod command;
mod display;
mod input;
mod script;
mod session;

pub use command::{Command, HELP, ParseError};
pub use display::{DisplayError, Frame, TerminalDisplay, color_name};
pub use input::StdinInput;
pub use script::ScriptedInput;
pub use session::{SessionEnd, SessionError, run_session};

use crate::game_logic::GameState;

/// Runs an interactive two-player game on standard input and output.
pub fn run_interactive_terminal(
    color: bool,
) -> Result<SessionEnd, SessionError<std::io::Error, DisplayError>> {
    println!("Welcome to Chess!");
    println!("Enter moves in format: e2 e4 (from position to position)");
    println!("Type 'quit' to exit, 'help' for more commands");

    let mut game = GameState::new();
    let mut input = StdinInput::default();
    let mut display = TerminalDisplay::stdout(color);
    let end = run_session(&mut game, &mut input, &mut display)?;

    log::info!("session ended after {} moves: {end:?}", game.move_history().len());
    Ok(end)
}
