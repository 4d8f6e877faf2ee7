//! Runtime configuration for a game run.

use anyhow::{ensure, Result};
use clap::ValueEnum;
use rand::Rng;
use std::time::Duration;

/// Who the human is playing against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Human against the computer.
    Computer,
    /// Two humans sharing the console.
    Player,
}

impl Mode {
    /// Interprets the answer to the mode prompt. Only `C` selects the
    /// computer; anything else means two human players.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("c") {
            Mode::Computer
        } else {
            Mode::Player
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Skips the mode prompt when set.
    pub mode: Option<Mode>,
    /// In computer mode, the computer plays X and opens the game.
    pub computer_first: bool,
    /// Bounds of the cosmetic "thinking" pause, in milliseconds.
    pub think_delay_ms: Option<(u64, u64)>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: None,
            computer_first: false,
            think_delay_ms: Some((1000, 2000)),
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if let Some((min, max)) = self.think_delay_ms {
            ensure!(
                min <= max,
                "minimum thinking delay ({} ms) exceeds maximum ({} ms)",
                min,
                max
            );
        }
        Ok(())
    }

    /// Draws the pause before a computer move, if pauses are enabled.
    pub fn think_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Duration> {
        let (min, max) = self.think_delay_ms?;
        Some(Duration::from_millis(rng.gen_range(min..=max)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mode_from_answer() {
        assert_eq!(Mode::from_answer("C"), Mode::Computer);
        assert_eq!(Mode::from_answer(" c \n"), Mode::Computer);
        assert_eq!(Mode::from_answer("P"), Mode::Player);
        assert_eq!(Mode::from_answer("computer"), Mode::Player);
        assert_eq!(Mode::from_answer(""), Mode::Player);
    }

    #[test]
    fn test_think_delay_within_bounds() {
        let config = Config::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            let delay = config.think_delay(&mut rng).unwrap();
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_think_delay_disabled() {
        let config = Config {
            think_delay_ms: None,
            ..Config::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(config.think_delay(&mut rng), None);
    }

    #[test]
    fn test_validate_rejects_inverted_delay() {
        let config = Config {
            think_delay_ms: Some((500, 100)),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
