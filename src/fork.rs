//! Heuristic fork detection used by the computer player.
//!
//! A board "forks" for `mark` when some empty cell would complete a line for
//! `mark`, and the opponent writing its own mark into that same cell would not
//! complete a line for the opponent. This is weaker than a true double-threat
//! check; it only confirms that a single open threat exists. The computer's
//! playing strength is defined by this rule, so it is kept as is.

use crate::board::{Board, Mark};
use crate::outcome::winner;

/// Returns true if `board` offers `mark` a winning cell the opponent cannot
/// also win on.
pub fn creates_fork(board: &Board, mark: Mark) -> bool {
    let opponent = mark.opponent();
    board.empty_cells().any(|position| {
        winner(&board.with_mark(position, mark)) == Some(mark)
            && winner(&board.with_mark(position, opponent)) != Some(opponent)
    })
}
