/// Accumulates across rounds for the lifetime of the process. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total_rounds: u32,
    pub total_guesses: u32,
}

impl SessionStats {
    pub fn mean_guesses(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            self.total_guesses as f64 / self.total_rounds as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_guesses_empty() {
        assert_eq!(SessionStats::default().mean_guesses(), 0.0);
    }

    #[test]
    fn test_mean_guesses() {
        let stats = SessionStats {
            total_rounds: 4,
            total_guesses: 10,
        };
        assert_eq!(stats.mean_guesses(), 2.5);
    }
}
