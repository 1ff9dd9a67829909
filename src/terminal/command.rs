use std::str::FromStr;

use thiserror::Error;

use crate::board::{Coord, CoordParseError};

/// Error when parsing a command line or move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid square '{input}': {source}")]
    Square {
        input: String,
        source: CoordParseError,
    },
    #[error("square '{0}' has no destination")]
    DanglingSquare(String),
}

/// A line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move between two squares; notation is checked when the move is played.
    Move { from: String, to: String },
    /// Highlight the legal moves of the piece on a square.
    Hint(Coord),
    /// Replace the game with a position given as FEN.
    Load(String),
    /// Start a fresh game.
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
=== Chess Help ===
Move format: [from] [to] (e.g., e2 e4 or e2e4)
Positions are in chess notation (a1 to h8)
Commands:
  moves <square> - Highlight legal moves of a piece
  load <fen>     - Load a position
  reset          - Start a new game
  help           - Show this help
  quit           - Exit the game
==================";

pub(crate) fn parse_square(token: &str) -> Result<Coord, ParseError> {
    token.parse().map_err(|source| ParseError::Square {
        input: token.to_string(),
        source,
    })
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(ParseError::Unknown(String::new()));
        };

        match head.to_ascii_lowercase().as_str() {
            "quit" | "q" | "exit" => Ok(Command::Quit),
            "help" | "h" | "?" => Ok(Command::Help),
            "reset" | "r" => Ok(Command::Reset),
            "moves" | "m" => match (parts.next(), parts.next()) {
                (Some(square), None) => parse_square(square).map(Command::Hint),
                _ => Err(ParseError::Usage("moves <square>")),
            },
            "load" => {
                let fen = line[head.len()..].trim();
                if fen.is_empty() {
                    Err(ParseError::Usage("load <fen>"))
                } else {
                    Ok(Command::Load(fen.to_string()))
                }
            }
            _ => match (parts.next(), parts.next()) {
                (Some(to), None) => Ok(Command::Move {
                    from: head.to_string(),
                    to: to.to_string(),
                }),
                (None, None) => match head.split_at_checked(2) {
                    Some((from, to)) if head.len() == 4 => Ok(Command::Move {
                        from: from.to_string(),
                        to: to.to_string(),
                    }),
                    _ => Err(ParseError::Unknown(line.to_string())),
                },
                _ => Err(ParseError::Unknown(line.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn mv(from: &str, to: &str) -> Command {
        Command::Move {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test_case("e2 e4", mv("e2", "e4"); "spaced move")]
    #[test_case("  e2   e4 ", mv("e2", "e4"); "extra whitespace")]
    #[test_case("e2e4", mv("e2", "e4"); "compact move")]
    #[test_case("i9 e0", mv("i9", "e0"); "notation checked later")]
    #[test_case("quit", Command::Quit)]
    #[test_case("QUIT", Command::Quit; "uppercase quit")]
    #[test_case("help", Command::Help)]
    #[test_case("reset", Command::Reset)]
    fn parses_commands(line: &str, expected: Command) {
        assert_eq!(line.parse::<Command>(), Ok(expected));
    }

    #[test]
    fn parses_hint() {
        let expected = Command::Hint("g1".parse().expect("valid square"));
        assert_eq!("moves g1".parse::<Command>(), Ok(expected));
    }

    #[test]
    fn hint_with_bad_square() {
        assert!(matches!(
            "moves z9".parse::<Command>(),
            Err(ParseError::Square { .. })
        ));
    }

    #[test]
    fn load_keeps_full_fen() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(
            format!("load {fen}").parse::<Command>(),
            Ok(Command::Load(fen.to_string()))
        );
        assert_eq!(
            "load".parse::<Command>(),
            Err(ParseError::Usage("load <fen>"))
        );
    }

    #[test_case(""; "empty")]
    #[test_case("e2"; "single square")]
    #[test_case("e2 e4 e5"; "three tokens")]
    #[test_case("dance"; "unknown word")]
    fn rejects_garbage(line: &str) {
        assert!(line.parse::<Command>().is_err());
    }
}
