//! Interactive UI module for the odds_teletext application
//!
//! This module is organized into focused submodules:
//! - `input_handler`: Keyboard input mapping
//! - `terminal_manager`: Raw mode and alternate screen setup
//! - `core`: Main interactive UI loop and orchestration

mod core;
mod input_handler;
mod terminal_manager;

pub use core::*;
pub use terminal_manager::TerminalManager;
