use crate::model::Difficulty;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            difficulty: Difficulty::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::settings_path();
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
        }
        let default = Settings::default();
        let _ = default.save();
        default
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::settings_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    fn settings_path() -> PathBuf {
        let data_dir = glib::user_data_dir();
        let mut path = data_dir.join("numhunt");
        path.push("settings.json");
        path
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_seed_from_env() {
        std::env::set_var("SEED", "1234");
        assert_eq!(Settings::seed_from_env(), Some(1234));

        std::env::set_var("SEED", "not a number");
        assert_eq!(Settings::seed_from_env(), None);

        std::env::remove_var("SEED");
        assert_eq!(Settings::seed_from_env(), None);
    }

    #[test]
    #[serial]
    fn test_is_debug_mode() {
        std::env::set_var("DEBUG", "1");
        assert!(Settings::is_debug_mode());

        std::env::set_var("DEBUG", "0");
        assert!(!Settings::is_debug_mode());

        std::env::remove_var("DEBUG");
        assert!(!Settings::is_debug_mode());
    }
}
