pub mod game_state;
pub mod high_score;
pub mod round;
pub mod settings;

pub use round::{Round, RoundPhase, ROUND_SECONDS};
