//! Core logic for the Tic-Tac-Toe game.
//!
//! Two humans can share the console, or a human can play against a computer
//! opponent that picks moves with a fixed priority list: win, block, build a
//! threat, stop the opponent's threat, center, corner, anything.

pub mod board;
pub mod config;
pub mod console;
pub mod fork;
pub mod outcome;
pub mod session;
pub mod strategy;

pub use board::{Board, BoardError, Cell, Mark, Position, BOARD_SIZE};
pub use config::{Config, Mode};
pub use console::{Console, InputError};
pub use outcome::{evaluate, is_full, is_tie, winner, Outcome};
pub use session::{GameSession, TurnController};
pub use strategy::{select_move, Tier};

use anyhow::Result;
use std::io;

/// Plays on the process's stdin and stdout until the player quits.
pub fn run(config: Config) -> Result<()> {
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    TurnController::new(config, console)?.run()
}
