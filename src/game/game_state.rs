use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

use super::high_score::HighScoreStore;
use super::round::Round;
use super::settings::Settings;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Difficulty, GameActionEvent, GameStateEvent, Outcome, RoundEnding, SessionStats,
};

/// Owns the current round, the session stats and the high-score store, and
/// translates incoming actions into state events. All dispatch happens on the
/// main thread; guesses and ticks are serialized by the GTK main loop.
pub struct GameState {
    round: Option<Round>,
    session_stats: SessionStats,
    high_scores: HighScoreStore,
    game_state_emitter: EventEmitter<GameStateEvent>,
    action_subscription: Option<Unsubscriber<GameActionEvent>>,
}

impl Destroyable for GameState {
    fn destroy(&mut self) {
        if let Some(subscription) = self.action_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameState {
    pub fn new(
        game_action_observer: EventObserver<GameActionEvent>,
        game_state_emitter: EventEmitter<GameStateEvent>,
        high_scores: HighScoreStore,
    ) -> Rc<RefCell<Self>> {
        let game_state = Rc::new(RefCell::new(Self {
            round: None,
            session_stats: SessionStats::default(),
            high_scores,
            game_state_emitter,
            action_subscription: None,
        }));
        GameState::wire_subscription(game_state.clone(), game_action_observer);
        game_state
    }

    fn wire_subscription(
        game_state: Rc<RefCell<Self>>,
        game_action_observer: EventObserver<GameActionEvent>,
    ) {
        let subscription = {
            let game_state = game_state.clone();
            game_action_observer.subscribe(move |event| {
                game_state.borrow_mut().handle_event(event);
            })
        };
        game_state.borrow_mut().action_subscription = Some(subscription);
    }

    pub fn session_stats(&self) -> SessionStats {
        self.session_stats
    }

    pub fn high_score(&self) -> Option<u32> {
        self.high_scores.best()
    }

    fn handle_event(&mut self, event: &GameActionEvent) {
        trace!(target: "game_state", "Handling action: {:?}", event);
        match event {
            GameActionEvent::NewRound(difficulty, seed) => self.start_round(*difficulty, *seed),
            GameActionEvent::Guess(raw) => self.handle_guess(raw),
            GameActionEvent::Tick => self.handle_tick(),
            GameActionEvent::InitDisplay => {
                self.game_state_emitter
                    .emit(GameStateEvent::HighScoreChanged(self.high_scores.best()));
                self.game_state_emitter
                    .emit(GameStateEvent::SessionStatsChanged(self.session_stats));
            }
        }
    }

    fn start_round(&mut self, difficulty: Difficulty, seed: Option<u64>) {
        let seed = seed.or_else(Settings::seed_from_env);
        let round = Round::new(difficulty.config(), seed);
        if Settings::is_debug_mode() {
            debug!(
                target: "game_state",
                "Round {} target: {}",
                round.playthrough_id,
                round.target()
            );
        }
        let time_left = round.time_left();
        self.round = Some(round);
        self.game_state_emitter.emit(GameStateEvent::RoundStarted {
            difficulty,
            config: difficulty.config(),
        });
        self.game_state_emitter
            .emit(GameStateEvent::TimerChanged { time_left });
    }

    fn handle_guess(&mut self, raw: &str) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.is_active() {
            return;
        }

        let outcome = match round.submit_guess(raw) {
            Err(error) => {
                self.game_state_emitter
                    .emit(GameStateEvent::InputRejected(error));
                return;
            }
            Ok(outcome) => outcome,
        };

        self.session_stats.total_guesses += 1;
        match outcome {
            Outcome::Continue(hint) => {
                let event = GameStateEvent::GuessEvaluated {
                    guess: round.previous_guess().unwrap_or_default(),
                    hint,
                    guess_count: round.guess_count(),
                    max_guesses: round.config().max_guesses,
                };
                self.game_state_emitter.emit(event);
            }
            Outcome::Win { guesses } => {
                self.session_stats.total_rounds += 1;
                let new_record = self.high_scores.record(guesses);
                if new_record {
                    self.game_state_emitter
                        .emit(GameStateEvent::HighScoreChanged(self.high_scores.best()));
                }
                self.game_state_emitter
                    .emit(GameStateEvent::RoundEnded(RoundEnding::Won {
                        guesses,
                        new_record,
                    }));
            }
            Outcome::OutOfGuesses { target } => {
                self.session_stats.total_rounds += 1;
                self.game_state_emitter
                    .emit(GameStateEvent::RoundEnded(RoundEnding::OutOfGuesses {
                        target,
                    }));
            }
        }
        self.game_state_emitter
            .emit(GameStateEvent::SessionStatsChanged(self.session_stats));
    }

    fn handle_tick(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.is_active() {
            return;
        }

        match round.tick() {
            Some(target) => {
                self.game_state_emitter
                    .emit(GameStateEvent::TimerChanged { time_left: 0 });
                self.game_state_emitter
                    .emit(GameStateEvent::RoundEnded(RoundEnding::TimedOut { target }));
            }
            None => {
                self.game_state_emitter.emit(GameStateEvent::TimerChanged {
                    time_left: round.time_left(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::game::round::ROUND_SECONDS;
    use crate::model::{Direction, GuessError, Hint};
    use crate::testing::UsingLogger;
    use std::path::PathBuf;
    use test_context::test_context;
    use uuid::Uuid;

    struct Fixture {
        game_action_emitter: EventEmitter<GameActionEvent>,
        events: Rc<RefCell<Vec<GameStateEvent>>>,
        _game_state: Rc<RefCell<GameState>>,
        store_path: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let (game_action_emitter, game_action_observer) =
                Channel::<GameActionEvent>::new();
            let (game_state_emitter, game_state_observer) = Channel::<GameStateEvent>::new();

            let store_path =
                std::env::temp_dir().join(format!("numhunt-state-test-{}.txt", Uuid::new_v4()));
            let game_state = GameState::new(
                game_action_observer,
                game_state_emitter,
                HighScoreStore::with_path(store_path.clone()),
            );

            let events = Rc::new(RefCell::new(Vec::new()));
            let events_sink = events.clone();
            // leaked on purpose; fixtures live for one test
            let _ = game_state_observer.subscribe(move |event: &GameStateEvent| {
                events_sink.borrow_mut().push(event.clone());
            });

            Self {
                game_action_emitter,
                events,
                _game_state: game_state,
                store_path,
            }
        }

        fn drain(&self) -> Vec<GameStateEvent> {
            self.events.borrow_mut().drain(..).collect()
        }

        /// Target the engine will pick for this difficulty/seed pair.
        fn target_for(difficulty: Difficulty, seed: u64) -> i64 {
            Round::new(difficulty.config(), Some(seed)).target()
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.store_path);
        }
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_new_round_then_win(_ctx: &mut UsingLogger) {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Medium, 7);

        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(7)));
        let events = fixture.drain();
        assert_eq!(
            events[0],
            GameStateEvent::RoundStarted {
                difficulty: Difficulty::Medium,
                config: Difficulty::Medium.config(),
            }
        );
        assert_eq!(
            events[1],
            GameStateEvent::TimerChanged {
                time_left: ROUND_SECONDS
            }
        );

        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess(target.to_string()));
        let events = fixture.drain();
        assert!(events.contains(&GameStateEvent::HighScoreChanged(Some(1))));
        assert!(events.contains(&GameStateEvent::RoundEnded(RoundEnding::Won {
            guesses: 1,
            new_record: true,
        })));
        assert!(events.contains(&GameStateEvent::SessionStatsChanged(SessionStats {
            total_rounds: 1,
            total_guesses: 1,
        })));
    }

    #[test]
    fn test_rejected_guesses_do_not_count() {
        let fixture = Fixture::new();
        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(7)));
        fixture.drain();

        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess("not a number".to_string()));
        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess("5000".to_string()));
        let events = fixture.drain();
        assert_eq!(
            events,
            vec![
                GameStateEvent::InputRejected(GuessError::InvalidInput),
                GameStateEvent::InputRejected(GuessError::OutOfRange { min: 1, max: 100 }),
            ]
        );
    }

    #[test]
    fn test_continue_guess_emits_hint_and_stats() {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Medium, 11);
        // guaranteed wrong and in range
        let wrong = if target == 1 { 2 } else { target - 1 };

        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(11)));
        fixture.drain();

        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess(wrong.to_string()));
        let events = fixture.drain();
        let expected_direction = if target > wrong {
            Direction::Higher
        } else {
            Direction::Lower
        };
        assert_eq!(
            events,
            vec![
                GameStateEvent::GuessEvaluated {
                    guess: wrong,
                    hint: Hint {
                        temperature: None,
                        direction: expected_direction,
                    },
                    guess_count: 1,
                    max_guesses: 10,
                },
                GameStateEvent::SessionStatsChanged(SessionStats {
                    total_rounds: 0,
                    total_guesses: 1,
                }),
            ]
        );
    }

    #[test]
    fn test_out_of_guesses_ends_round_and_reveals_target() {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Easy, 3);
        let wrong = if target == 1 { 2 } else { target - 1 };

        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Easy, Some(3)));
        fixture.drain();

        for _ in 0..7 {
            fixture
                .game_action_emitter
                .emit(GameActionEvent::Guess(wrong.to_string()));
        }
        let events = fixture.drain();
        assert!(events.contains(&GameStateEvent::RoundEnded(RoundEnding::OutOfGuesses {
            target,
        })));
        // high score untouched on a loss
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameStateEvent::HighScoreChanged(_))));

        // terminal round: further guesses and ticks are ignored
        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess(target.to_string()));
        fixture.game_action_emitter.emit(GameActionEvent::Tick);
        assert!(fixture.drain().is_empty());
    }

    #[test]
    fn test_sixty_ticks_time_out_the_round() {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Medium, 5);

        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(5)));
        fixture.drain();

        for _ in 0..ROUND_SECONDS {
            fixture.game_action_emitter.emit(GameActionEvent::Tick);
        }
        let events = fixture.drain();
        assert!(events.contains(&GameStateEvent::RoundEnded(RoundEnding::TimedOut { target })));
        assert_eq!(
            events.last(),
            Some(&GameStateEvent::RoundEnded(RoundEnding::TimedOut { target }))
        );
    }

    #[test]
    fn test_high_score_only_improves_strictly() {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Medium, 13);

        // first win: one guess, record set
        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(13)));
        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess(target.to_string()));
        let events = fixture.drain();
        assert!(events.contains(&GameStateEvent::HighScoreChanged(Some(1))));

        // second win, same guess count: no record event
        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(13)));
        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess(target.to_string()));
        let events = fixture.drain();
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameStateEvent::HighScoreChanged(_))));
        assert!(events.contains(&GameStateEvent::RoundEnded(RoundEnding::Won {
            guesses: 1,
            new_record: false,
        })));
    }

    #[test]
    fn test_stats_accumulate_across_rounds() {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Medium, 17);
        let wrong = if target == 1 { 2 } else { target - 1 };

        for _ in 0..2 {
            fixture
                .game_action_emitter
                .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(17)));
            fixture
                .game_action_emitter
                .emit(GameActionEvent::Guess(wrong.to_string()));
            fixture
                .game_action_emitter
                .emit(GameActionEvent::Guess(target.to_string()));
        }
        let events = fixture.drain();
        assert!(events.contains(&GameStateEvent::SessionStatsChanged(SessionStats {
            total_rounds: 2,
            total_guesses: 4,
        })));
    }

    #[test]
    fn test_init_display_reports_loaded_record() {
        let fixture = Fixture::new();
        fixture.game_action_emitter.emit(GameActionEvent::InitDisplay);
        assert_eq!(
            fixture.drain(),
            vec![
                GameStateEvent::HighScoreChanged(None),
                GameStateEvent::SessionStatsChanged(SessionStats::default()),
            ]
        );
    }

    #[test]
    fn test_next_round_uses_the_newly_selected_difficulty() {
        let fixture = Fixture::new();
        let target = Fixture::target_for(Difficulty::Medium, 19);

        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Medium, Some(19)));
        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess(target.to_string()));
        fixture.drain();

        // the play-again path starts whatever difficulty is selected now
        fixture
            .game_action_emitter
            .emit(GameActionEvent::NewRound(Difficulty::Hard, Some(19)));
        let events = fixture.drain();
        assert_eq!(
            events[0],
            GameStateEvent::RoundStarted {
                difficulty: Difficulty::Hard,
                config: Difficulty::Hard.config(),
            }
        );
    }

    #[test]
    fn test_guess_before_any_round_is_ignored() {
        let fixture = Fixture::new();
        fixture
            .game_action_emitter
            .emit(GameActionEvent::Guess("42".to_string()));
        fixture.game_action_emitter.emit(GameActionEvent::Tick);
        assert!(fixture.drain().is_empty());
    }
}
