use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Button, Entry};

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{GameActionEvent, GameStateEvent};

/// The guess entry and submit button. Disabled outside an active round.
pub struct GuessEntryUI {
    pub entry: Entry,
    pub guess_button: Button,
    game_state_subscription: Option<Unsubscriber<GameStateEvent>>,
}

impl Destroyable for GuessEntryUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.game_state_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GuessEntryUI {
    pub fn new(
        game_state_observer: EventObserver<GameStateEvent>,
        game_action_emitter: EventEmitter<GameActionEvent>,
    ) -> Rc<RefCell<Self>> {
        let entry = Entry::builder()
            .placeholder_text("Enter your guess...")
            .sensitive(false)
            .build();
        let guess_button = Button::with_label("Guess");
        guess_button.set_sensitive(false);

        let submit = {
            let entry = entry.clone();
            let game_action_emitter = game_action_emitter.clone();
            move || {
                game_action_emitter.emit(GameActionEvent::Guess(entry.text().to_string()));
            }
        };

        {
            let submit = submit.clone();
            entry.connect_activate(move |_| submit());
        }
        guess_button.connect_clicked(move |_| submit());

        let guess_entry_ui = Rc::new(RefCell::new(Self {
            entry,
            guess_button,
            game_state_subscription: None,
        }));

        let subscription = {
            let guess_entry_ui = guess_entry_ui.clone();
            game_state_observer.subscribe(move |event| {
                guess_entry_ui.borrow().handle_game_state_event(event);
            })
        };
        guess_entry_ui.borrow_mut().game_state_subscription = Some(subscription);

        guess_entry_ui
    }

    fn handle_game_state_event(&self, event: &GameStateEvent) {
        match event {
            GameStateEvent::RoundStarted { .. } => {
                self.set_enabled(true);
                self.entry.set_text("");
                self.entry.grab_focus();
            }
            GameStateEvent::GuessEvaluated { .. } => {
                self.entry.set_text("");
                self.entry.grab_focus();
            }
            GameStateEvent::RoundEnded(_) => {
                self.set_enabled(false);
                self.entry.set_text("");
            }
            _ => {}
        }
    }

    fn set_enabled(&self, enabled: bool) {
        self.entry.set_sensitive(enabled);
        self.guess_button.set_sensitive(enabled);
    }
}
