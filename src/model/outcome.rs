/// Which side of the guess the target sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Higher,
    Lower,
}

/// Distance-to-target of this guess compared against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temperature {
    Warmer,
    Colder,
    Same,
}

/// Feedback for a counted, non-winning guess. `temperature` is `None` on the
/// first counted guess of a round. An exact distance tie reports `Same` and
/// still carries the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub temperature: Option<Temperature>,
    pub direction: Direction,
}

/// Rejections at the input boundary. Neither consumes a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    InvalidInput,
    OutOfRange { min: i64, max: i64 },
}

/// Result of a counted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue(Hint),
    Win { guesses: u32 },
    OutOfGuesses { target: i64 },
}
