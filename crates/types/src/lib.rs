//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data, usable from the simulation core, the terminal
//! views and the persistence layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, 0)
//!
//! # Progression Curve
//!
//! | Quantity | Rule |
//! |----------|------|
//! | Line clear points | `LINE_SCORES[n] * level` |
//! | Level | `min(20, 1 + lines / 10)` |
//! | Fall speed | `max(0.05, 0.5 - (level - 1) * 0.02)` seconds per row |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ANIMATION_STEPS` | 10 | Fade steps before cleared rows vanish |
//! | `ANIMATION_STEP_MS` | 16 | Play time per fade step |
//! | `STATUS_MESSAGE_MS` | 2000 | Lifetime of a transient status message |
//! | `GAME_OVER_INPUT_DELAY_MS` | 1000 | Keys ignored right after game over |
//! | `SCORE_SCROLL_ROW_MS` | 500 | Time per row of the scrolling score list |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{Grade, PieceKind, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! assert_eq!(PieceKind::I.spawn_rows(), vec![vec![true, true, true, true]]);
//!
//! assert_eq!(Grade::from_score(7500), Grade::A);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Spawn offset (column, row) of a freshly generated piece
pub const SPAWN_POSITION: (i32, i32) = (3, 0);

/// Number of animation steps a cleared row fades through before removal
pub const ANIMATION_STEPS: u8 = 10;

/// Unpaused play time that advances the clear animation by one step
pub const ANIMATION_STEP_MS: u32 = 16;

/// Line clear scoring table, indexed by rows cleared at once.
///
/// Multiplied by the level in effect when the clear completes.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Highest reachable level
pub const MAX_LEVEL: u32 = 20;

/// Cleared lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Seconds per automatic row at level 1
pub const BASE_FALL_SPEED_SECS: f64 = 0.5;

/// Fall interval reduction per level
pub const FALL_SPEED_STEP_SECS: f64 = 0.02;

/// Fastest fall interval
pub const MIN_FALL_SPEED_SECS: f64 = 0.05;

/// Number of high score records kept by a store
pub const HIGH_SCORE_RETENTION: usize = 20;

/// How long a transient status message stays on screen
pub const STATUS_MESSAGE_MS: u32 = 2000;

/// Keys on the game-over screen are ignored for this long
pub const GAME_OVER_INPUT_DELAY_MS: u32 = 1000;

/// Play time per row the scrolling score list moves up
pub const SCORE_SCROLL_ROW_MS: u32 = 500;

/// Maximum player name length accepted by the name prompt
pub const MAX_NAME_LEN: usize = 15;

/// Name used when the player leaves the prompt empty
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// 24-bit RGB color.
///
/// Serialized as a `[r, g, b]` array so saved grids stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn blend(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Rgb::new(v[0], v[1], v[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Cell filled with the color of the piece that locked there
pub type Cell = Option<Rgb>;

/// The seven tetromino catalog entries, in catalog order.
///
/// Each kind is bound to one spawn shape and one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    J,
    L,
    O,
    S,
    Z,
}

impl PieceKind {
    /// Every catalog entry; random selection indexes into this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Spawn shape as a row-major occupancy matrix (rows top to bottom).
    pub fn spawn_rows(&self) -> Vec<Vec<bool>> {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            PieceKind::J => &[&[1, 1, 1], &[1, 0, 0]],
            PieceKind::L => &[&[1, 1, 1], &[0, 0, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::S => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::Z => &[&[0, 1, 1], &[1, 1, 0]],
        };
        rows.iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect()
    }

    /// Fixed color of this kind.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::T => Rgb::new(128, 0, 128),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 127, 0),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::Z => Rgb::new(255, 0, 0),
        }
    }
}

/// Letter grade attached to a high score record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Derive a grade from a final score.
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::Grade;
    ///
    /// assert_eq!(Grade::from_score(10_000), Grade::S);
    /// assert_eq!(Grade::from_score(2_499), Grade::D);
    /// assert_eq!(Grade::from_score(0), Grade::F);
    /// ```
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 10_000 => Grade::S,
            s if s >= 7_500 => Grade::A,
            s if s >= 5_000 => Grade::B,
            s if s >= 2_500 => Grade::C,
            s if s >= 1_000 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Game actions that mutate a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks the piece if it cannot move
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Restart the session in place
    Restart,
}

/// Discrete user commands delivered by the input layer outside text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(GameAction),
    ToggleMute,
    SaveGame,
    LoadGame,
    ShowHighScores,
    /// Open the scrolling top players list
    ScrollScores,
    /// Menu selection movement (-1 up, +1 down)
    Select(i8),
    Confirm,
    Back,
    Quit,
}

/// Entries of the main menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    HighScores,
    Sound,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::HighScores,
        MenuItem::Sound,
        MenuItem::Quit,
    ];

    pub fn label(&self, muted: bool) -> &'static str {
        match self {
            MenuItem::Start => "Start Game",
            MenuItem::HighScores => "High Scores",
            MenuItem::Sound if muted => "Sound: Off",
            MenuItem::Sound => "Sound: On",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Key events while a text prompt is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}
