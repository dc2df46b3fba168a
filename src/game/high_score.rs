use std::fs;
use std::path::PathBuf;

use log::{error, info};

/// Fewest guesses used in a winning round, persisted as a single decimal line.
/// An absent or unparsable file means no record; writes are best-effort.
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    best: Option<u32>,
}

impl HighScoreStore {
    pub fn new() -> Self {
        let mut path = glib::user_data_dir().join("numhunt");
        path.push("high_score.txt");
        Self::with_path(path)
    }

    pub fn with_path(path: PathBuf) -> Self {
        let best = Self::read(&path);
        Self { path, best }
    }

    fn read(path: &PathBuf) -> Option<u32> {
        fs::read_to_string(path).ok()?.trim().parse().ok()
    }

    pub fn best(&self) -> Option<u32> {
        self.best
    }

    /// Records a winning guess count. Returns true iff it is a new record,
    /// i.e. strictly fewer guesses than any previous win.
    pub fn record(&mut self, guesses: u32) -> bool {
        match self.best {
            Some(best) if guesses >= best => false,
            _ => {
                info!(
                    target: "high_score",
                    "New record: {} guesses (previous: {:?})",
                    guesses, self.best
                );
                self.best = Some(guesses);
                if let Err(e) = self.write(guesses) {
                    error!(target: "high_score", "Failed to save high score: {}", e);
                }
                true
            }
        }
    }

    fn write(&self, guesses: u32) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, format!("{}\n", guesses))
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}
