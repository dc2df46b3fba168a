use crate::destroyable::Destroyable;
use crate::events::Channel;
use crate::game::game_state::GameState;
use crate::game::high_score::HighScoreStore;
use crate::game::settings::Settings;
use crate::model::{Difficulty, GameActionEvent, GameStateEvent};
use crate::ui::game_info_ui::GameInfoUI;
use crate::ui::guess_entry_ui::GuessEntryUI;
use crate::ui::hint_label_ui::HintLabelUI;
use crate::ui::round_end_dialog::RoundEndDialog;
use crate::ui::score_ui::ScoreUI;
use crate::ui::stats_dialog::StatsDialog;
use gio::{Menu, SimpleAction};
use gtk4::gdk::Display;
use gtk4::{
    prelude::*, AboutDialog, Application, ApplicationWindow, Button, CssProvider, HeaderBar,
    Label, License, MenuButton, Orientation, STYLE_PROVIDER_PRIORITY_APPLICATION,
};
use std::cell::RefCell;
use std::rc::Rc;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const STYLE: &str = "
.hint-label { font-size: 16px; font-weight: bold; }
.timer { font-family: monospace; }
.guesses { font-family: monospace; }
.score-line { font-style: italic; }
";

pub fn build_ui(app: &Application) {
    let (game_action_emitter, game_action_observer) = Channel::<GameActionEvent>::new();
    let (game_state_emitter, game_state_observer) = Channel::<GameStateEvent>::new();

    let settings = Rc::new(RefCell::new(Settings::load()));

    let window = Rc::new(
        ApplicationWindow::builder()
            .application(app)
            .title("NumHunt")
            .resizable(true)
            .decorated(true)
            .default_width(520)
            .default_height(320)
            .build(),
    );

    // Set up keyboard shortcuts
    app.set_accels_for_action("win.new-round", &["<Control>n"]);

    let header_bar = HeaderBar::new();

    // Difficulty selector with label
    let difficulty_box = gtk4::Box::builder()
        .name("difficulty-box")
        .orientation(Orientation::Horizontal)
        .spacing(5)
        .build();

    let difficulty_label = gtk4::Label::new(Some("Difficulty:"));
    difficulty_box.append(&difficulty_label);

    let all_difficulties = Difficulty::all()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<String>>();

    let difficulty_selector = gtk4::DropDown::from_strings(
        all_difficulties
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<&str>>()
            .as_slice(),
    );

    difficulty_selector.set_tooltip_text(Some("Select Difficulty"));
    difficulty_box.append(&difficulty_selector);

    let current_difficulty = settings.borrow().difficulty;
    difficulty_selector.set_selected(current_difficulty.index() as u32);

    // Takes effect on the next round; the current round keeps its bounds.
    let settings_ref = Rc::clone(&settings);
    difficulty_selector.connect_selected_notify(move |selector| {
        let new_difficulty = Difficulty::from_index(selector.selected() as usize);
        settings_ref.borrow_mut().difficulty = new_difficulty;
        if let Err(e) = settings_ref.borrow().save() {
            log::error!(target: "window", "Failed to save settings: {}", e);
        }
    });

    header_bar.pack_start(&difficulty_box);

    let start_button = Button::with_label("New Round");
    start_button.set_tooltip_text(Some("Start a new round (Ctrl+N)"));
    start_button.set_action_name(Some("win.new-round"));
    header_bar.pack_start(&start_button);

    // Hamburger menu
    let menu = Menu::new();
    menu.append(Some("New Round"), Some("win.new-round"));
    menu.append(Some("Statistics"), Some("win.statistics"));
    menu.append(Some("About"), Some("win.about"));

    let menu_button = MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .build();
    header_bar.pack_end(&menu_button);

    window.set_titlebar(Some(&header_bar));

    // UI components
    let hint_label_ui = HintLabelUI::new(game_state_observer.clone());
    let game_info_ui = GameInfoUI::new(game_state_observer.clone(), game_action_emitter.clone());
    let guess_entry_ui =
        GuessEntryUI::new(game_state_observer.clone(), game_action_emitter.clone());
    let score_ui = ScoreUI::new(game_state_observer.clone());
    let round_end_dialog = RoundEndDialog::new(
        &window,
        Rc::clone(&settings),
        game_action_emitter.clone(),
        game_state_observer.clone(),
    );

    // Game engine
    let game_state = GameState::new(
        game_action_observer.clone(),
        game_state_emitter.clone(),
        HighScoreStore::new(),
    );

    // Styling
    let provider = CssProvider::new();
    provider.load_from_string(STYLE);
    let display = Display::default().expect("Could not connect to a display.");
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        STYLE_PROVIDER_PRIORITY_APPLICATION,
    );

    // Assemble the window content
    let info_box = gtk4::Box::builder()
        .name("info-box")
        .orientation(Orientation::Horizontal)
        .spacing(20)
        .halign(gtk4::Align::Center)
        .build();
    info_box.append(&game_info_ui.borrow().timer_label);
    info_box.append(&game_info_ui.borrow().guesses_label);

    let entry_box = gtk4::Box::builder()
        .name("entry-box")
        .orientation(Orientation::Horizontal)
        .spacing(10)
        .halign(gtk4::Align::Center)
        .build();
    entry_box.append(&Label::new(Some("Guess:")));
    entry_box.append(&guess_entry_ui.borrow().entry);
    entry_box.append(&guess_entry_ui.borrow().guess_button);

    let top_level_box = gtk4::Box::builder()
        .name("top-level-box")
        .orientation(Orientation::Vertical)
        .spacing(15)
        .margin_top(15)
        .margin_bottom(15)
        .margin_start(15)
        .margin_end(15)
        .valign(gtk4::Align::Center)
        .hexpand(true)
        .vexpand(true)
        .build();

    top_level_box.append(&info_box);
    top_level_box.append(&hint_label_ui.borrow().label);
    top_level_box.append(&entry_box);
    top_level_box.append(&score_ui.borrow().label);

    window.set_child(Some(&top_level_box));
    window.present();

    // Actions for menu items and shortcuts
    let action_new_round = SimpleAction::new("new-round", None);
    let settings_ref = Rc::clone(&settings);
    action_new_round.connect_activate({
        let game_action_emitter = game_action_emitter.clone();
        move |_, _| {
            let difficulty = settings_ref.borrow().difficulty;
            game_action_emitter.emit(GameActionEvent::NewRound(difficulty, None));
        }
    });
    window.add_action(&action_new_round);

    let action_statistics = SimpleAction::new("statistics", None);
    action_statistics.connect_activate({
        let game_state = Rc::clone(&game_state);
        let window = Rc::clone(&window);
        move |_, _| {
            let game_state = game_state.borrow();
            let stats = game_state.session_stats();
            StatsDialog::show(&window, game_state.high_score(), &stats);
        }
    });
    window.add_action(&action_statistics);

    let action_about = SimpleAction::new("about", None);
    action_about.connect_activate(move |_, _| {
        let dialog = AboutDialog::builder()
            .program_name("NumHunt")
            .version(APP_VERSION)
            .comments("A warmer/colder number-guessing game")
            .license_type(License::MitX11)
            .build();
        dialog.present();
    });
    window.add_action(&action_about);

    // Surface the persisted record before the first round starts
    game_action_emitter.emit(GameActionEvent::InitDisplay);

    window.connect_close_request(move |_| {
        if let Err(e) = settings.borrow().save() {
            log::error!(target: "window", "Failed to save settings: {}", e);
        }
        game_state.borrow_mut().destroy();
        hint_label_ui.borrow_mut().destroy();
        game_info_ui.borrow_mut().destroy();
        guess_entry_ui.borrow_mut().destroy();
        score_ui.borrow_mut().destroy();
        round_end_dialog.borrow_mut().destroy();

        glib::Propagation::Proceed
    });
}
