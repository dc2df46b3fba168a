use serde::{Deserialize, Serialize};

/// Fixed bounds for one round. Immutable once a round has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub min: i64,
    pub max: i64,
    pub max_guesses: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            2 => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn config(&self) -> RoundConfig {
        match self {
            Difficulty::Easy => RoundConfig {
                min: 1,
                max: 50,
                max_guesses: 7,
            },
            Difficulty::Medium => RoundConfig {
                min: 1,
                max: 100,
                max_guesses: 10,
            },
            Difficulty::Hard => RoundConfig {
                min: 1,
                max: 1000,
                max_guesses: 15,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config();
        write!(
            f,
            "{} ({}-{}, {} guesses)",
            self.name(),
            config.min,
            config.max,
            config.max_guesses
        )
    }
}
