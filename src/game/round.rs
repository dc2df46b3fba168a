use std::cmp::Ordering;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

use crate::model::{Direction, GuessError, Hint, Outcome, RoundConfig, Temperature};

pub const ROUND_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Active,
    Won,
    OutOfGuesses,
    TimedOut,
}

/// One round of the game: a fixed target plus the guess and time budget.
/// Callers must not submit guesses once the round has left
/// [`RoundPhase::Active`]; `tick` is a no-op then.
#[derive(Debug)]
pub struct Round {
    config: RoundConfig,
    target: i64,
    guess_count: u32,
    previous_guess: Option<i64>,
    time_left: u32,
    phase: RoundPhase,
    pub playthrough_id: Uuid,
}

impl Round {
    pub fn new(config: RoundConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        let target = rng.random_range(config.min..=config.max);
        let playthrough_id = Uuid::new_v4();
        trace!(
            target: "round",
            "Starting round {} with seed {} over [{}, {}]",
            playthrough_id, seed, config.min, config.max
        );
        Self {
            config,
            target,
            guess_count: 0,
            previous_guess: None,
            time_left: ROUND_SECONDS,
            phase: RoundPhase::Active,
            playthrough_id,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_target(config: RoundConfig, target: i64) -> Self {
        Self {
            config,
            target,
            guess_count: 0,
            previous_guess: None,
            time_left: ROUND_SECONDS,
            phase: RoundPhase::Active,
            playthrough_id: Uuid::new_v4(),
        }
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn previous_guess(&self) -> Option<i64> {
        self.previous_guess
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Parses and evaluates one guess. Rejections do not consume a guess.
    pub fn submit_guess(&mut self, raw: &str) -> Result<Outcome, GuessError> {
        debug_assert!(self.is_active());

        let guess: i64 = raw.trim().parse().map_err(|_| GuessError::InvalidInput)?;
        if guess < self.config.min || guess > self.config.max {
            return Err(GuessError::OutOfRange {
                min: self.config.min,
                max: self.config.max,
            });
        }

        self.guess_count += 1;
        trace!(
            target: "round",
            "Round {}: guess {} of {} is {}",
            self.playthrough_id, self.guess_count, self.config.max_guesses, guess
        );

        if guess == self.target {
            self.phase = RoundPhase::Won;
            return Ok(Outcome::Win {
                guesses: self.guess_count,
            });
        }

        let hint = Hint {
            temperature: self.previous_guess.map(|previous| {
                let current_distance = (self.target - guess).abs();
                let previous_distance = (self.target - previous).abs();
                match current_distance.cmp(&previous_distance) {
                    Ordering::Less => Temperature::Warmer,
                    Ordering::Greater => Temperature::Colder,
                    Ordering::Equal => Temperature::Same,
                }
            }),
            direction: if self.target > guess {
                Direction::Higher
            } else {
                Direction::Lower
            },
        };
        self.previous_guess = Some(guess);

        if self.guess_count == self.config.max_guesses {
            self.phase = RoundPhase::OutOfGuesses;
            return Ok(Outcome::OutOfGuesses {
                target: self.target,
            });
        }

        Ok(Outcome::Continue(hint))
    }

    /// Burns one second off the clock; returns the revealed target when the
    /// round just timed out.
    pub fn tick(&mut self) -> Option<i64> {
        if !self.is_active() {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.phase = RoundPhase::TimedOut;
            trace!(target: "round", "Round {} timed out", self.playthrough_id);
            return Some(self.target);
        }
        None
    }
}
