//! A console-based Tic Tac Toe game.

use anyhow::{Context, Result};
use clap::Parser;
use tic_tac_toe_rust::{run, Config, Mode};
use tracing::Level;

/// Play Tic Tac Toe against a friend or the computer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Opponent type. When omitted, you are asked at start-up.
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Let the computer play X and move first.
    #[arg(long)]
    computer_first: bool,

    /// Skip the computer's thinking pause.
    #[arg(long)]
    no_delay: bool,

    /// Shortest thinking pause, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    min_delay_ms: u64,

    /// Longest thinking pause, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    max_delay_ms: u64,

    /// Seed for the computer's random choices.
    #[arg(long)]
    seed: Option<u64>,

    /// Log more detail to stderr (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            mode: cli.mode,
            computer_first: cli.computer_first,
            think_delay_ms: (!cli.no_delay).then_some((cli.min_delay_ms, cli.max_delay_ms)),
            seed: cli.seed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    run(cli.into()).context("Game aborted")
}
