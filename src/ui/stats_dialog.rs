use glib::Propagation;
use gtk4::gdk::Key;
use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Button, EventControllerKey, Grid, Label, Orientation};

use crate::model::SessionStats;

pub struct StatsDialog;

impl StatsDialog {
    fn stats_rows(high_score: Option<u32>, stats: &SessionStats) -> Vec<(&'static str, String)> {
        let high_score = match high_score {
            Some(score) => format!("{} guesses", score),
            None => "N/A".to_string(),
        };
        vec![
            ("High Score:", high_score),
            ("Rounds Played:", stats.total_rounds.to_string()),
            ("Total Guesses:", stats.total_guesses.to_string()),
            ("Average Guesses:", format!("{:.2}", stats.mean_guesses())),
        ]
    }

    fn create_stats_grid(high_score: Option<u32>, stats: &SessionStats) -> Grid {
        let stats_grid = Grid::new();
        stats_grid.set_row_spacing(5);
        stats_grid.set_column_spacing(10);
        stats_grid.set_margin_start(10);

        for (row_index, (name, value)) in Self::stats_rows(high_score, stats).iter().enumerate() {
            let name_label = Label::new(Some(name));
            name_label.set_halign(gtk4::Align::Start);
            stats_grid.attach(&name_label, 0, row_index as i32, 1, 1);

            let value_label = Label::new(Some(value));
            value_label.set_halign(gtk4::Align::End);
            stats_grid.attach(&value_label, 1, row_index as i32, 1, 1);
        }

        stats_grid
    }

    pub fn show(window: &ApplicationWindow, high_score: Option<u32>, stats: &SessionStats) {
        let vbox = gtk4::Box::new(Orientation::Vertical, 10);
        vbox.set_margin_start(20);
        vbox.set_margin_end(20);
        vbox.set_margin_top(20);
        vbox.set_margin_bottom(20);

        let title_label = Label::new(None);
        title_label.set_markup("<b>Session Statistics</b>");
        title_label.set_margin_bottom(10);
        vbox.append(&title_label);

        vbox.append(&Self::create_stats_grid(high_score, stats));

        let close_button = Button::with_label("Close");
        close_button.set_margin_top(10);
        close_button.set_halign(gtk4::Align::Center);
        vbox.append(&close_button);

        let modal = gtk4::Window::builder()
            .transient_for(window)
            .modal(true)
            .title("Statistics")
            .default_width(320)
            .child(&vbox)
            .build();

        close_button.connect_clicked({
            let modal = modal.clone();
            move |_| {
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

        modal.present();
    }
}
