mod difficulty;
mod game_action_event;
mod game_state_event;
mod outcome;
mod session_stats;

pub use difficulty::{Difficulty, RoundConfig};
pub use game_action_event::GameActionEvent;
pub use game_state_event::{GameStateEvent, RoundEnding};
pub use outcome::{Direction, GuessError, Hint, Outcome, Temperature};
pub use session_stats::SessionStats;
