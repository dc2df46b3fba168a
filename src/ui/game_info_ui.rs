use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glib::{timeout_add_local, ControlFlow, SourceId};
use gtk4::prelude::*;
use gtk4::Label;

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::game::ROUND_SECONDS;
use crate::model::{GameActionEvent, GameStateEvent, RoundEnding};

/// Countdown and guess-budget labels. Owns the one-second source that feeds
/// `Tick` actions to the engine while a round is running.
pub struct GameInfoUI {
    pub timer_label: Label,
    pub guesses_label: Label,
    max_guesses: u32,
    tick_source: Option<SourceId>,
    game_action_emitter: EventEmitter<GameActionEvent>,
    game_state_subscription: Option<Unsubscriber<GameStateEvent>>,
}

impl Destroyable for GameInfoUI {
    fn destroy(&mut self) {
        if let Some(tick_source) = self.tick_source.take() {
            tick_source.remove();
        }
        if let Some(subscription) = self.game_state_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameInfoUI {
    pub fn new(
        game_state_observer: EventObserver<GameStateEvent>,
        game_action_emitter: EventEmitter<GameActionEvent>,
    ) -> Rc<RefCell<Self>> {
        let timer_label = Label::new(Some(&format_time(ROUND_SECONDS)));
        timer_label.set_css_classes(&["timer"]);
        let guesses_label = Label::new(Some("Guesses: 0/0"));
        guesses_label.set_css_classes(&["guesses"]);

        let game_info = Rc::new(RefCell::new(Self {
            timer_label,
            guesses_label,
            max_guesses: 0,
            tick_source: None,
            game_action_emitter,
            game_state_subscription: None,
        }));

        GameInfoUI::bind_observer(Rc::clone(&game_info), game_state_observer);

        game_info
    }

    fn bind_observer(
        game_info: Rc<RefCell<Self>>,
        game_state_observer: EventObserver<GameStateEvent>,
    ) {
        let subscription = {
            let game_info = game_info.clone();
            game_state_observer.subscribe(move |event| {
                game_info
                    .borrow_mut()
                    .handle_game_state_event(game_info.clone(), event);
            })
        };
        game_info.borrow_mut().game_state_subscription = Some(subscription);
    }

    fn handle_game_state_event(&mut self, game_info: Rc<RefCell<Self>>, event: &GameStateEvent) {
        match event {
            GameStateEvent::RoundStarted { config, .. } => {
                self.max_guesses = config.max_guesses;
                self.update_guesses(0);
                self.start_tick_source(game_info.clone());
            }
            GameStateEvent::TimerChanged { time_left } => {
                self.timer_label.set_text(&format_time(*time_left));
            }
            GameStateEvent::GuessEvaluated { guess_count, .. } => {
                self.update_guesses(*guess_count);
            }
            GameStateEvent::RoundEnded(ending) => {
                self.stop_tick_source();
                match ending {
                    RoundEnding::Won { guesses, .. } => self.update_guesses(*guesses),
                    RoundEnding::OutOfGuesses { .. } => self.update_guesses(self.max_guesses),
                    RoundEnding::TimedOut { .. } => {}
                }
            }
            _ => {}
        }
    }

    fn update_guesses(&self, guess_count: u32) {
        self.guesses_label
            .set_text(&format!("Guesses: {}/{}", guess_count, self.max_guesses));
    }

    fn stop_tick_source(&mut self) {
        if let Some(tick_source) = self.tick_source.take() {
            tick_source.remove();
        }
    }

    fn start_tick_source(&mut self, game_info: Rc<RefCell<Self>>) {
        // a restart reuses the running source
        if self.tick_source.is_none() {
            let game_info_weak = Rc::downgrade(&game_info);
            let game_action_emitter = self.game_action_emitter.clone();
            let tick_source = timeout_add_local(Duration::from_secs(1), move || {
                if game_info_weak.upgrade().is_some() {
                    game_action_emitter.emit(GameActionEvent::Tick);
                    ControlFlow::Continue
                } else {
                    ControlFlow::Break
                }
            });
            self.tick_source = Some(tick_source);
        }
    }
}

impl Drop for GameInfoUI {
    fn drop(&mut self) {
        log::trace!(target: "game_info_ui", "Dropping GameInfoUI");

        if let Some(tick_source) = self.tick_source.take() {
            tick_source.remove();
        }
    }
}

fn format_time(time_left: u32) -> String {
    format!("Time: {}s", time_left)
}
