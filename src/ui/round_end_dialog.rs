use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glib::Propagation;
use gtk4::gdk::Key;
use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Button, EventControllerKey, Label};

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::game::settings::Settings;
use crate::model::{GameActionEvent, GameStateEvent, RoundEnding};

/// Modal shown when a round ends, offering to start the next one with
/// whatever difficulty is currently selected.
pub struct RoundEndDialog {
    window: Rc<ApplicationWindow>,
    settings: Rc<RefCell<Settings>>,
    is_active: bool,
    game_action_emitter: EventEmitter<GameActionEvent>,
    game_state_subscription: Option<Unsubscriber<GameStateEvent>>,
}

impl Destroyable for RoundEndDialog {
    fn destroy(&mut self) {
        if let Some(subscription) = self.game_state_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl RoundEndDialog {
    pub fn new(
        window: &Rc<ApplicationWindow>,
        settings: Rc<RefCell<Settings>>,
        game_action_emitter: EventEmitter<GameActionEvent>,
        game_state_observer: EventObserver<GameStateEvent>,
    ) -> Rc<RefCell<Self>> {
        let dialog = Rc::new(RefCell::new(Self {
            window: Rc::clone(window),
            settings,
            is_active: false,
            game_action_emitter,
            game_state_subscription: None,
        }));

        let subscription = {
            let dialog = dialog.clone();
            game_state_observer.subscribe(move |event| {
                if let GameStateEvent::RoundEnded(ending) = event {
                    RoundEndDialog::show(dialog.clone(), ending);
                }
            })
        };
        dialog.borrow_mut().game_state_subscription = Some(subscription);

        dialog
    }

    fn show(dialog: Rc<RefCell<Self>>, ending: &RoundEnding) {
        let dialog_weak = Rc::downgrade(&dialog);
        let mut dialog = dialog.borrow_mut();
        if dialog.is_active {
            return;
        }
        dialog.is_active = true;

        let content_area = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Vertical)
            .spacing(20)
            .margin_bottom(20)
            .margin_top(20)
            .margin_start(20)
            .margin_end(20)
            .build();

        let modal = gtk4::Window::builder()
            .transient_for(dialog.window.as_ref())
            .modal(true)
            .title("Round Finished")
            .child(&content_area)
            .build();

        let headline = match ending {
            RoundEnding::Won { .. } => "You won!",
            RoundEnding::OutOfGuesses { .. } => "Out of guesses.",
            RoundEnding::TimedOut { .. } => "Time's up.",
        };
        let label = Label::builder()
            .label(format!("{} Play another round?", headline))
            .css_classes(["round-end-label"])
            .build();
        content_area.append(&label);

        let button_box = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .spacing(10)
            .halign(gtk4::Align::Center)
            .build();
        content_area.append(&button_box);

        let play_again_button = Button::builder()
            .label("Play Again")
            .css_classes(["round-end-play-again-button"])
            .build();
        let close_button = Button::builder()
            .label("Close")
            .css_classes(["round-end-close-button"])
            .build();

        button_box.append(&close_button);
        button_box.append(&play_again_button);

        drop(dialog);

        let accepted = Rc::new(Cell::new(false));
        play_again_button.connect_clicked({
            let modal = modal.clone();
            let accepted = accepted.clone();
            move |_| {
                accepted.set(true);
                modal.close();
            }
        });

        close_button.connect_clicked({
            let modal = modal.clone();
            let accepted = accepted.clone();
            move |_| {
                accepted.set(false);
                modal.close();
            }
        });

        let key_controller = EventControllerKey::new();
        key_controller.connect_key_pressed({
            let modal = modal.clone();
            move |_, key, _, _| {
                if key == Key::Escape {
                    modal.close();
                    return Propagation::Stop;
                }
                Propagation::Proceed
            }
        });
        modal.add_controller(key_controller);

        modal.connect_close_request(move |_| {
            if let Some(dialog) = dialog_weak.upgrade() {
                let restart = {
                    let mut dialog = dialog.borrow_mut();
                    dialog.is_active = false;
                    accepted.get().then(|| {
                        (
                            dialog.game_action_emitter.clone(),
                            dialog.settings.borrow().difficulty,
                        )
                    })
                };
                if let Some((emitter, difficulty)) = restart {
                    emitter.emit(GameActionEvent::NewRound(difficulty, None));
                }
            }
            Propagation::Proceed
        });

        modal.present();
    }
}
