//! Terminal Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `term_tetris::{types,core,store,input,term}`
//! and hosts the application layer: screens, configuration, logging and sound.

pub mod app;
pub mod config;
pub mod logging;
pub mod sound;

pub use term_tetris_core as core;
pub use term_tetris_input as input;
pub use term_tetris_store as store;
pub use term_tetris_term as term;
pub use term_tetris_types as types;

pub use app::{App, Screen};
pub use config::Config;
