// src/teletext_ui/mod.rs - Teletext odds pages

pub mod cards;
pub mod core;
pub mod formatting;
pub mod utils;

pub use cards::{MatchCard, PriceButton, ScoreLine, SportLine};
pub use core::*;
pub use utils::get_ansi_code;
