//! Console I/O: prompts, human move entry and board rendering.
//!
//! The console works over any buffered reader and writer so games can be
//! driven from stdin/stdout or from a script.

use crate::board::{Board, Mark, Position, BOARD_SIZE};
use crate::config::Mode;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

const INVALID_INPUT: &str = "Invalid input. Please enter a number between 1 and 3.";
const CELL_FILLED: &str = "This cell is already filled. Please choose another cell.";

/// Reasons a typed coordinate is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    InvalidInputFormat(String),
    #[error("{0} is not between 1 and 3")]
    OutOfRange(i64),
}

/// Converts a 1-based coordinate as typed by a player into a 0-based index.
pub fn parse_coordinate(raw: &str) -> Result<usize, InputError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidInputFormat(trimmed.to_string()))?;
    if !(1..=BOARD_SIZE as i64).contains(&value) {
        return Err(InputError::OutOfRange(value));
    }
    Ok((value - 1) as usize)
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Writes a line of text.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write to console")
    }

    pub fn render(&mut self, board: &Board) -> Result<()> {
        write!(self.output, "{}", board).context("Failed to write board")
    }

    /// Prints `prompt` and reads one line of input.
    ///
    /// # Errors
    /// Fails with an [`io::ErrorKind::UnexpectedEof`] error once the input is
    /// exhausted, since no valid answer can ever arrive.
    pub fn prompt(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush console")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from console")?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_mode(&mut self) -> Result<Mode> {
        let answer = self.prompt(
            "Would you like to play against the computer or another player? (C/P): ",
        )?;
        Ok(Mode::from_answer(&answer))
    }

    /// Returns false only when the player answers `N`.
    pub fn ask_play_again(&mut self) -> Result<bool> {
        let answer = self.prompt("Do you want to play again? (Y/N): ")?;
        Ok(!answer.eq_ignore_ascii_case("n"))
    }

    /// Asks for a row and a column until they name an empty cell on `board`.
    pub fn read_human_move(&mut self, board: &Board, mark: Mark) -> Result<Position> {
        self.say(&format!("Player {} turn", mark))?;
        loop {
            let row = match parse_coordinate(&self.prompt("Enter row (1-3): ")?) {
                Ok(row) => row,
                Err(e) => {
                    debug!(error = %e, "rejected row");
                    self.say(INVALID_INPUT)?;
                    continue;
                }
            };
            let col = match parse_coordinate(&self.prompt("Enter column (1-3): ")?) {
                Ok(col) => col,
                Err(e) => {
                    debug!(error = %e, "rejected column");
                    self.say(INVALID_INPUT)?;
                    continue;
                }
            };

            let position = Position::new(row, col);
            if board.is_empty_at(position) {
                return Ok(position);
            }
            debug!(%position, "rejected occupied cell");
            self.say(CELL_FILLED)?;
        }
    }
}
