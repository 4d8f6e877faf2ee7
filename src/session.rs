//! Game sessions and the turn-taking loop.

use crate::board::{Board, BoardError, Mark, Position};
use crate::config::{Config, Mode};
use crate::console::Console;
use crate::outcome::{evaluate, Outcome};
use crate::strategy::select_move;
use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::{error, info, warn};

/// Consecutive failed attempts on an unchanged board before the session is
/// thrown away and a fresh game begins.
const MAX_STALLED_RESTARTS: usize = 2;

/// One game in progress: the board and the mark whose turn it is.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Mark,
}

impl GameSession {
    /// A fresh game with an empty board and X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: Mark::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_mark(&self) -> Mark {
        self.active
    }

    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    /// Places the active mark at `position` and hands the turn to the other
    /// mark.
    ///
    /// # Errors
    /// Propagates [`BoardError`] if the cell is off the board or taken. The
    /// session is unchanged in that case, including whose turn it is.
    pub fn apply_move(&mut self, position: Position) -> Result<Outcome, BoardError> {
        self.board.set(position.row, position.col, self.active)?;
        self.active = self.active.opponent();
        Ok(self.outcome())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    Human,
    Computer,
}

/// Drives games on a console: asks for moves, applies them and reports
/// results.
pub struct TurnController<R, W> {
    console: Console<R, W>,
    config: Config,
    rng: StdRng,
}

impl<R: BufRead, W: Write> TurnController<R, W> {
    /// # Errors
    /// Rejects a configuration that fails [`Config::validate`].
    pub fn new(config: Config, console: Console<R, W>) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            console,
            config,
            rng,
        })
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn player_for(&self, mode: Mode, mark: Mark) -> Player {
        let computer_mark = if self.config.computer_first {
            Mark::X
        } else {
            Mark::O
        };
        match mode {
            Mode::Computer if mark == computer_mark => Player::Computer,
            _ => Player::Human,
        }
    }

    /// Plays a single move for the session's active mark.
    pub fn play_turn(&mut self, session: &mut GameSession, mode: Mode) -> Result<Outcome> {
        let mark = session.active_mark();
        let position = match self.player_for(mode, mark) {
            Player::Human => self.console.read_human_move(session.board(), mark)?,
            Player::Computer => {
                self.console.say("Computer is thinking...")?;
                if let Some(delay) = self.config.think_delay(&mut self.rng) {
                    thread::sleep(delay);
                }
                select_move(session.board(), mark, &mut self.rng)
                    .ok_or_else(|| anyhow!("No empty cell left for {}", mark))?
            }
        };

        let outcome = session
            .apply_move(position)
            .with_context(|| format!("Failed to place {} at {}", mark, position))?;
        info!(%mark, %position, "move applied");
        self.console.render(session.board())?;
        Ok(outcome)
    }

    /// Plays turns until the session is won or tied, then announces it.
    pub fn play_game(&mut self, session: &mut GameSession, mode: Mode) -> Result<Outcome> {
        loop {
            match self.play_turn(session, mode)? {
                Outcome::InProgress => continue,
                Outcome::Win(mark) => {
                    info!(%mark, "game won");
                    self.console.say(&format!("{} wins!", mark))?;
                    return Ok(Outcome::Win(mark));
                }
                Outcome::Tie => {
                    info!("game tied");
                    self.console.say("It's a tie!")?;
                    return Ok(Outcome::Tie);
                }
            }
        }
    }

    /// Plays `session` to completion, reporting failures and resuming the turn
    /// loop.
    ///
    /// A failure that recurs without any move being made replaces the session
    /// with a fresh game. I/O failures end play.
    pub fn play_resumable(&mut self, session: &mut GameSession, mode: Mode) -> Result<Outcome> {
        let mut stalled = 0;
        loop {
            let before = *session.board();
            let e = match self.play_game(session, mode) {
                Ok(outcome) => return Ok(outcome),
                Err(e) if is_io_failure(&e) => return Err(e),
                Err(e) => e,
            };

            error!("Error during game: {:#}", e);
            self.console.say(&format!("{:#}", e))?;
            self.console.say("Invalid input, please try again.")?;

            stalled = if *session.board() == before {
                stalled + 1
            } else {
                1
            };
            if stalled >= MAX_STALLED_RESTARTS {
                warn!(attempts = stalled, "game cannot continue, starting over");
                self.console.say("Starting a new game.")?;
                *session = GameSession::new();
                self.console.render(session.board())?;
                stalled = 0;
            }
        }
    }

    /// Runs games until the player declines a replay.
    pub fn run(&mut self) -> Result<()> {
        let mode = match self.config.mode {
            Some(mode) => mode,
            None => self.console.ask_mode()?,
        };
        info!(?mode, "starting");

        let mut session = GameSession::new();
        self.console.render(session.board())?;
        loop {
            self.play_resumable(&mut session, mode)?;

            if !self.console.ask_play_again()? {
                self.console.say("Thanks for playing!")?;
                return Ok(());
            }
            info!("starting a new game");
            session = GameSession::new();
            self.console.render(session.board())?;
        }
    }
}

fn is_io_failure(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| cause.is::<io::Error>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn controller(config: Config, script: &str) -> TurnController<Cursor<Vec<u8>>, Vec<u8>> {
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        TurnController::new(
            Config {
                think_delay_ms: None,
                seed: Some(11),
                ..config
            },
            console,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_move_alternates_marks() {
        let mut session = GameSession::new();
        assert_eq!(session.active_mark(), Mark::X);

        assert_eq!(session.apply_move(Position::new(0, 0)), Ok(Outcome::InProgress));
        assert_eq!(session.active_mark(), Mark::O);
        assert_eq!(session.apply_move(Position::new(1, 1)), Ok(Outcome::InProgress));
        assert_eq!(session.active_mark(), Mark::X);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut session = GameSession::new();
        session.apply_move(Position::new(0, 0)).unwrap();
        let before = *session.board();

        assert_eq!(
            session.apply_move(Position::new(0, 0)),
            Err(BoardError::CellOccupied { row: 0, col: 0 })
        );
        assert_eq!(session.active_mark(), Mark::O);
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_apply_move_reports_win() {
        let mut session = GameSession::new();
        for position in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            session.apply_move(Position::new(position.0, position.1)).unwrap();
        }
        assert_eq!(session.apply_move(Position::new(0, 2)), Ok(Outcome::Win(Mark::X)));
        assert_eq!(session.outcome(), Outcome::Win(Mark::X));
    }

    #[test]
    fn test_computer_plays_o_by_default() {
        let ctl = controller(Config::default(), "");
        assert_eq!(ctl.player_for(Mode::Computer, Mark::X), Player::Human);
        assert_eq!(ctl.player_for(Mode::Computer, Mark::O), Player::Computer);
        assert_eq!(ctl.player_for(Mode::Player, Mark::O), Player::Human);
    }

    #[test]
    fn test_computer_first_plays_x() {
        let ctl = controller(
            Config {
                computer_first: true,
                ..Config::default()
            },
            "",
        );
        assert_eq!(ctl.player_for(Mode::Computer, Mark::X), Player::Computer);
        assert_eq!(ctl.player_for(Mode::Computer, Mark::O), Player::Human);
    }

    #[test]
    fn test_computer_turn_takes_center_on_empty_board() {
        let mut ctl = controller(
            Config {
                computer_first: true,
                ..Config::default()
            },
            "",
        );
        let mut session = GameSession::new();

        let outcome = ctl.play_turn(&mut session, Mode::Computer).unwrap();
        assert_eq!(outcome, Outcome::InProgress);
        assert!(!session.board().is_empty_at(Position::CENTER));
        assert_eq!(session.active_mark(), Mark::O);
    }

    #[test]
    fn test_self_play_always_terminates() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = GameSession::new();
            let mut moves = 0;
            let outcome = loop {
                let mark = session.active_mark();
                let position = select_move(session.board(), mark, &mut rng).unwrap();
                moves += 1;
                match session.apply_move(position).unwrap() {
                    Outcome::InProgress => continue,
                    done => break done,
                }
            };
            assert!(moves <= 9);
            assert_ne!(outcome, Outcome::InProgress);
        }
    }

    #[test]
    fn test_inverted_delay_rejected_at_construction() {
        let console = Console::new(Cursor::new(Vec::new()), Vec::new());
        let config = Config {
            think_delay_ms: Some((500, 100)),
            computer_first: true,
            ..Config::default()
        };
        assert!(TurnController::new(config, console).is_err());
    }

    #[test]
    fn test_failed_turn_is_reported_and_play_starts_over() {
        // The computer is to move on a full board, so every attempt fails
        // without changing anything.
        let mut session = GameSession {
            board: "XOX / XOO / OXX".parse().unwrap(),
            active: Mark::O,
        };
        let mut ctl = controller(
            Config {
                mode: Some(Mode::Computer),
                ..Config::default()
            },
            "1\n1\n2\n2\n3\n1\n2\n1\n",
        );

        let outcome = ctl.play_resumable(&mut session, Mode::Computer).unwrap();
        assert_eq!(outcome, Outcome::Win(Mark::X));
        assert!(session.board().empty_cells().count() > 0);

        let (_, output) = ctl.into_console().into_inner();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("No empty cell left for O").count(), MAX_STALLED_RESTARTS);
        assert_eq!(
            text.matches("Invalid input, please try again.").count(),
            MAX_STALLED_RESTARTS
        );
        assert_eq!(text.matches("Starting a new game.").count(), 1);
        assert!(text.contains("X wins!"));
    }

    #[test]
    fn test_io_failure_ends_play() {
        let mut session = GameSession::new();
        let mut ctl = controller(Config::default(), "");

        let err = ctl.play_resumable(&mut session, Mode::Player).unwrap_err();
        assert!(is_io_failure(&err));

        let (_, output) = ctl.into_console().into_inner();
        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains("Invalid input, please try again."));
    }
}
