//! Move selection for the computer player.
//!
//! Candidate cells are tried tier by tier, highest priority first, and the
//! first empty cell (row-major) that satisfies a tier is chosen. All
//! lookahead runs on copies of the board, so the caller's board is never
//! touched.

use crate::board::{Board, Mark, Position};
use crate::fork::creates_fork;
use crate::outcome::winner;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// The rule that produced a move, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Win,
    Block,
    Fork,
    BlockFork,
    Center,
    Corner,
    Random,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Tier::Win => "win",
            Tier::Block => "block",
            Tier::Fork => "fork",
            Tier::BlockFork => "block-fork",
            Tier::Center => "center",
            Tier::Corner => "corner",
            Tier::Random => "random",
        };
        write!(f, "{}", name)
    }
}

/// Chooses the move for `mark`. Returns `None` only when the board is full.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Option<Position> {
    let (position, tier) = select_move_with_tier(board, mark, rng)?;
    debug!(%mark, %tier, row = position.row, col = position.col, "computer selected move");
    Some(position)
}

/// Like [`select_move`], also reporting which tier fired.
pub fn select_move_with_tier<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Option<(Position, Tier)> {
    let opponent = mark.opponent();

    let tiers: [(Tier, &dyn Fn(Position) -> bool); 4] = [
        (Tier::Win, &|p: Position| winner(&board.with_mark(p, mark)) == Some(mark)),
        (Tier::Block, &|p: Position| {
            winner(&board.with_mark(p, opponent)) == Some(opponent)
        }),
        (Tier::Fork, &|p: Position| creates_fork(&board.with_mark(p, mark), mark)),
        (Tier::BlockFork, &|p: Position| {
            creates_fork(&board.with_mark(p, opponent), opponent)
        }),
    ];
    for (tier, qualifies) in tiers {
        if let Some(position) = board.empty_cells().find(|&p| qualifies(p)) {
            return Some((position, tier));
        }
    }

    if board.is_empty_at(Position::CENTER) {
        return Some((Position::CENTER, Tier::Center));
    }

    if let Some(&corner) = Position::CORNERS.iter().find(|&&p| board.is_empty_at(p)) {
        return Some((corner, Tier::Corner));
    }

    board
        .empty_cells()
        .choose(rng)
        .map(|position| (position, Tier::Random))
}
