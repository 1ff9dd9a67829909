use std::collections::VecDeque;
use std::convert::Infallible;

use super::command::{ParseError, parse_square};
use crate::MoveInput;

/// A scriptable input that replays queued lines.
///
/// New script can be appended at any time; lines are handed out in order
/// and input ends once the queue is drained.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw command line such as `"help"` or `"moves e2"`.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.pending.push_back(line.into());
    }

    /// Parse and queue a move script.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1")
    /// - Consecutive squares pair up into moves
    /// - Whitespace and periods only separate tokens
    ///
    /// Examples:
    /// - `"e2e4 e7e5"` - two moves
    /// - `"e2 e4. e7 e5."` - same moves, explicit separators
    ///
    /// Nothing is queued if any square is invalid or unpaired.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let moves = parse_script(script)?;
        self.pending
            .extend(moves.into_iter().map(|(from, to)| format!("{from} {to}")));
        Ok(())
    }

    /// Number of lines not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl MoveInput for ScriptedInput {
    type Error = Infallible;

    fn next_line(&mut self) -> Result<Option<String>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Parse a move script into (from, to) square pairs.
fn parse_script(script: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut squares = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            '.' => flush_token(&mut current_token, &mut squares)?,
            c if c.is_whitespace() => flush_token(&mut current_token, &mut squares)?,
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.chars().count() == 2 {
                    flush_token(&mut current_token, &mut squares)?;
                }
            }
        }
    }

    // Flush any remaining token
    flush_token(&mut current_token, &mut squares)?;

    let mut chunks = squares.chunks_exact(2);
    let moves = chunks
        .by_ref()
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    if let [dangling] = chunks.remainder() {
        return Err(ParseError::DanglingSquare(dangling.clone()));
    }
    Ok(moves)
}

/// Validate the current token as a square and clear it.
fn flush_token(token: &mut String, squares: &mut Vec<String>) -> Result<(), ParseError> {
    if !token.is_empty() {
        parse_square(token)?;
        squares.push(std::mem::take(token));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(input: &mut ScriptedInput) -> Vec<String> {
        std::iter::from_fn(|| input.next_line().unwrap_or_else(|never| match never {}))
            .collect()
    }

    #[test]
    fn test_compact_script_pairs_squares() {
        let mut input = ScriptedInput::new();
        input.push_script("e2e4 e7e5").unwrap();

        assert_eq!(drain(&mut input), ["e2 e4", "e7 e5"]);
    }

    #[test]
    fn test_periods_separate_tokens() {
        let mut input = ScriptedInput::new();
        input.push_script("e2 e4. e7.e5.").unwrap();

        assert_eq!(drain(&mut input), ["e2 e4", "e7 e5"]);
    }

    #[test]
    fn test_lines_and_scripts_interleave() {
        let mut input = ScriptedInput::new();
        input.push_line("moves g1");
        input.push_script("g1f3").unwrap();
        input.push_line("quit");

        assert_eq!(drain(&mut input), ["moves g1", "g1 f3", "quit"]);
    }

    #[test]
    fn test_parse_error_invalid_square() {
        let mut input = ScriptedInput::new();
        let result = input.push_script("e2e4 zz");
        assert!(matches!(result, Err(ParseError::Square { input, .. }) if input == "zz"));
    }

    #[test]
    fn test_parse_error_dangling_square() {
        let mut input = ScriptedInput::new();
        let result = input.push_script("e2e4 e7");
        assert_eq!(result, Err(ParseError::DanglingSquare("e7".to_string())));
    }

    #[test]
    fn test_parse_error_does_not_modify_state() {
        let mut input = ScriptedInput::new();

        // Push valid script
        input.push_script("e2e4").unwrap();

        // Invalid script should fail without queueing anything
        let result = input.push_script("d2d4 xx");
        assert!(result.is_err());

        assert_eq!(input.remaining(), 1);
        assert_eq!(drain(&mut input), ["e2 e4"]);
    }
}
