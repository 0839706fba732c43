//! Terminal input module.
//!
//! Independent of any UI framework. Maps `crossterm` key events into
//! [`crate::types::Command`]s for gameplay and menus, and into
//! [`crate::types::TextInput`] while a name prompt is open.

pub mod map;

pub use term_tetris_types as types;

pub use map::{
    handle_game_key, handle_game_over_key, handle_menu_key, handle_scores_key, handle_scroll_key,
    handle_text_key, should_quit,
};
