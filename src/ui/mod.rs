pub mod game_info_ui;
pub mod guess_entry_ui;
pub mod hint_label_ui;
pub mod round_end_dialog;
pub mod score_ui;
pub mod stats_dialog;
pub mod window;
