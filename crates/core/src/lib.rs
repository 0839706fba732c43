//! Core game logic - pure, deterministic, and testable
//!
//! Game rules, session state and the persistence contract. Nothing here
//! touches the terminal, the clock or the filesystem, so the same seed and
//! the same sequence of actions and ticks always produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision checks and the two-phase line clear
//! - [`piece`]: piece shapes, positions and 90 degree rotation
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: points, level and fall speed curves
//! - [`session`]: one game from first spawn to game over
//! - [`snapshot`]: per-frame read-only view for renderers
//! - [`save`]: versioned saved-session schema
//! - [`persist`]: storage trait, score records and an in-memory backend
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece kind is equally likely on each draw
//! - **Plain rotation**: no wall kicks; a rotation that does not fit is undone
//! - **No lock delay**: a piece locks as soon as it cannot move down
//! - **Line clear fade**: full rows fade over 10 steps before they are removed
//! - **Scoring**: 40/100/300/1200 times the level, one level per 10 lines
//!
//! # Example
//!
//! ```
//! use term_tetris_core::GameSession;
//! use term_tetris_types::GameAction;
//!
//! let mut game = GameSession::new("player", 12345);
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Gravity and animation advance with elapsed time.
//! game.tick(16);
//! assert_eq!(game.level(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with the
//! milliseconds elapsed since the previous call. Gravity fires once the
//! accumulated time reaches the current fall speed; the line clear fade
//! advances one step per 16ms.

pub mod board;
pub mod persist;
pub mod piece;
pub mod rng;
pub mod save;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use persist::{display_name, insert_ranked, MemoryStore, Persistence, ScoreRecord};
pub use piece::{Piece, RotationDirection, Shape};
pub use rng::SimpleRng;
pub use save::{SavedGame, SAVE_VERSION};
pub use scoring::{fall_interval_ms, fall_speed_for_level, level_for_lines, line_clear_points};
pub use session::{GameEvent, GameSession, SessionPhase};
pub use snapshot::{PieceCells, SessionSnapshot};
