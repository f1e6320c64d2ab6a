pub mod interactive;
pub mod screen;
pub mod teletext;

pub use interactive::run_interactive_ui;
pub use screen::{ScreenOptions, build_loading_page, build_odds_page, build_sports_page};
