use std::io::{self, BufRead, Write};

use crate::MoveInput;

/// Line input from standard input, printing a prompt before each read.
#[derive(Debug)]
pub struct StdinInput {
    prompt: String,
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new("> ")
    }
}

impl StdinInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl MoveInput for StdinInput {
    type Error = io::Error;

    fn next_line(&mut self) -> Result<Option<String>, Self::Error> {
        print!("{}", self.prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input))
    }
}
