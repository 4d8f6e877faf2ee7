//! Win, full-board and tie detection.

use crate::board::{Board, Cell, Mark, Position, BOARD_SIZE};

/// The state of a game, derived from the board on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Mark),
    Tie,
}

/// The eight winning lines in the order they are checked: rows, then columns,
/// then the main diagonal, then the anti-diagonal.
const LINES: [[Position; BOARD_SIZE]; 8] = [
    [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
    [Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)],
    [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)],
    [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
    [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
    [Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)],
    [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)],
    [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
];

/// Returns the mark of the first completed line, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|position| board.cell(position));
        match a {
            Cell::Occupied(mark) if a == b && b == c => Some(mark),
            _ => None,
        }
    })
}

/// True when no empty cell remains.
pub fn is_full(board: &Board) -> bool {
    board.empty_cells().next().is_none()
}

pub fn is_tie(board: &Board) -> bool {
    is_full(board) && winner(board).is_none()
}

/// Classifies the board. A completed line takes precedence over a full board.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = winner(board) {
        Outcome::Win(mark)
    } else if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}
