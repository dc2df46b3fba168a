use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::Label;

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::{Direction, GameStateEvent, GuessError, Hint, RoundEnding, Temperature};

/// The central feedback label: round prompts, hints, input errors and
/// end-of-round banners.
pub struct HintLabelUI {
    pub label: Label,
    subscription: Option<Unsubscriber<GameStateEvent>>,
}

impl Destroyable for HintLabelUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl HintLabelUI {
    pub fn new(game_state_observer: EventObserver<GameStateEvent>) -> Rc<RefCell<Self>> {
        let label = Label::new(Some("Select a difficulty and start a round!"));
        label.set_css_classes(&["hint-label"]);
        label.set_wrap(true);

        let hint_label_ui = Rc::new(RefCell::new(Self {
            label,
            subscription: None,
        }));

        let subscription = {
            let hint_label_ui = hint_label_ui.clone();
            game_state_observer.subscribe(move |event| {
                hint_label_ui.borrow().handle_game_state_event(event);
            })
        };
        hint_label_ui.borrow_mut().subscription = Some(subscription);

        hint_label_ui
    }

    fn handle_game_state_event(&self, event: &GameStateEvent) {
        match event {
            GameStateEvent::RoundStarted { config, .. } => {
                self.label.set_text(&format!(
                    "I've picked a number between {} and {}. Start guessing!",
                    config.min, config.max
                ));
            }
            GameStateEvent::GuessEvaluated { hint, .. } => {
                self.label.set_text(&hint_text(hint));
            }
            GameStateEvent::InputRejected(error) => {
                self.label.set_text(&rejection_text(error));
            }
            GameStateEvent::RoundEnded(ending) => {
                self.label.set_text(&ending_text(ending));
            }
            _ => {}
        }
    }
}

fn hint_text(hint: &Hint) -> String {
    let temperature = match hint.temperature {
        Some(Temperature::Warmer) => "Warmer! ",
        Some(Temperature::Colder) => "Colder! ",
        Some(Temperature::Same) => "Same distance. ",
        None => "",
    };
    let direction = match hint.direction {
        Direction::Higher => "The number is higher.",
        Direction::Lower => "The number is lower.",
    };
    format!("{}{}", temperature, direction)
}

fn rejection_text(error: &GuessError) -> String {
    match error {
        GuessError::InvalidInput => "Please enter a valid whole number.".to_string(),
        GuessError::OutOfRange { min, max } => {
            format!("Out of range! Enter a number between {} and {}.", min, max)
        }
    }
}

fn ending_text(ending: &RoundEnding) -> String {
    match ending {
        RoundEnding::Won {
            guesses,
            new_record,
        } => {
            let record = if *new_record { " New record!" } else { "" };
            format!("Correct! You won in {} guesses.{}", guesses, record)
        }
        RoundEnding::OutOfGuesses { target } => {
            format!("Out of guesses! The number was {}.", target)
        }
        RoundEnding::TimedOut { target } => {
            format!("Time's up! The number was {}.", target)
        }
    }
}
