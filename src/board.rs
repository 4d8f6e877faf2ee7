//! The 3x3 board, its cells and the marks placed on it.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const BOARD_SIZE: usize = 3;

/// One of the two players' symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other player's mark.
    pub fn opponent(&self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A single cell on the board, either empty or holding a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Mark),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "-"),
            Cell::Occupied(mark) => write!(f, "{}", mark),
        }
    }
}

/// A zero-based `(row, col)` coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const CENTER: Position = Position::new(1, 1);
    pub const CORNERS: [Position; 4] = [
        Position::new(0, 0),
        Position::new(0, 2),
        Position::new(2, 0),
        Position::new(2, 2),
    ];
}

impl fmt::Display for Position {
    /// Formats the position in the 1-based form players type in.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row + 1, self.col + 1)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the 3x3 board")]
    OutOfRange { row: usize, col: usize },
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
    #[error("malformed board layout: {0}")]
    Malformed(String),
}

/// The Tic-Tac-Toe grid, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Errors
    /// Returns [`BoardError::OutOfRange`] if either index is not in `0..3`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Places `mark` at `(row, col)`.
    ///
    /// # Errors
    /// Returns [`BoardError::OutOfRange`] for indices outside the board and
    /// [`BoardError::CellOccupied`] if the cell already holds a mark. The
    /// board is left untouched on error.
    pub fn set(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), BoardError> {
        check_bounds(row, col)?;
        if !self.cells[row][col].is_empty() {
            return Err(BoardError::CellOccupied { row, col });
        }
        self.cells[row][col] = Cell::Occupied(mark);
        Ok(())
    }

    /// Cell lookup for positions already known to be on the board.
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.row][position.col]
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.cell(position).is_empty()
    }

    /// Iterates over the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
            .filter(move |&position| self.is_empty_at(position))
    }

    /// Returns a copy of the board with `mark` written at `position`,
    /// overwriting whatever the cell held.
    pub fn with_mark(&self, position: Position, mark: Mark) -> Board {
        let mut next = *self;
        next.cells[position.row][position.col] = Cell::Occupied(mark);
        next
    }
}

fn check_bounds(row: usize, col: usize) -> Result<(), BoardError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(BoardError::OutOfRange { row, col });
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "-------------")?;
        for row in &self.cells {
            write!(f, "|")?;
            for cell in row {
                write!(f, " {} |", cell)?;
            }
            writeln!(f)?;
            writeln!(f, "-------------")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine row-major cell symbols (`X`, `O`, `-`). Whitespace and `/`
    /// may be used to separate rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if symbols.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(BoardError::Malformed(format!(
                "expected 9 cells, found {}",
                symbols.len()
            )));
        }

        let mut board = Board::new();
        for (i, symbol) in symbols.into_iter().enumerate() {
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = match symbol.to_ascii_uppercase() {
                'X' => Cell::Occupied(Mark::X),
                'O' => Cell::Occupied(Mark::O),
                '-' => Cell::Empty,
                other => {
                    return Err(BoardError::Malformed(format!(
                        "unexpected cell symbol '{}'",
                        other
                    )))
                }
            };
        }
        Ok(board)
    }
}
