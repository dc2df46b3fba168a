use super::{Difficulty, GuessError, Hint, RoundConfig, SessionStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnding {
    Won { guesses: u32, new_record: bool },
    OutOfGuesses { target: i64 },
    TimedOut { target: i64 },
}

/// State changes flowing from the game engine back to the presentation shell.
#[derive(Debug, Clone, PartialEq)]
pub enum GameStateEvent {
    RoundStarted {
        difficulty: Difficulty,
        config: RoundConfig,
    },
    GuessEvaluated {
        guess: i64,
        hint: Hint,
        guess_count: u32,
        max_guesses: u32,
    },
    InputRejected(GuessError),
    TimerChanged {
        time_left: u32,
    },
    RoundEnded(RoundEnding),
    HighScoreChanged(Option<u32>),
    SessionStatsChanged(SessionStats),
}
