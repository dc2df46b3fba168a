use gtk4::prelude::*;
use gtk4::Application;

const APP_ID: &str = "org.numhunt.NumHunt";

fn init_logging() {
    env_logger::init();
}

fn main() {
    init_logging();

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(numhunt::ui::window::build_ui);

    app.run();
}
