use super::Difficulty;

/// Actions flowing from the presentation shell into the game engine.
#[derive(Debug, Clone)]
pub enum GameActionEvent {
    NewRound(Difficulty, Option<u64>), // seed override when Some
    Guess(String),
    Tick,
    InitDisplay,
}
