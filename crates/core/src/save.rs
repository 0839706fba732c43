//! Saved session schema
//!
//! Versioned, fixed-field record of everything needed to resume a session.
//! `board_grid` and `current_block` are required; every other field has a
//! default so older or hand-edited saves still load.

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, MAX_LEVEL};

/// Current schema version written by this build.
pub const SAVE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SAVE_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    #[serde(default = "default_version")]
    pub version: u32,
    pub board_grid: Vec<Vec<Cell>>,
    pub current_block: Piece,
    #[serde(default)]
    pub next_block: Option<Piece>,
    #[serde(default)]
    pub score: u32,
    /// Derived from `lines_cleared` when absent.
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub lines_cleared: u32,
    /// Derived from the level when absent.
    #[serde(default)]
    pub fall_speed: Option<f64>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub score_saved: bool,
}

impl SavedGame {
    /// Reject saves that cannot be restored as a whole.
    pub fn validate(&self) -> Result<()> {
        if self.version == 0 || self.version > SAVE_VERSION {
            bail!("unsupported save version {}", self.version);
        }
        ensure!(
            self.board_grid.len() == BOARD_HEIGHT,
            "board grid has {} rows, expected {}",
            self.board_grid.len(),
            BOARD_HEIGHT
        );
        if let Some((y, row)) = self
            .board_grid
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != BOARD_WIDTH)
        {
            bail!(
                "board row {} has {} cells, expected {}",
                y,
                row.len(),
                BOARD_WIDTH
            );
        }
        if let Some(level) = self.level {
            ensure!(
                (1..=MAX_LEVEL).contains(&level),
                "level {} out of range 1..={}",
                level,
                MAX_LEVEL
            );
        }
        if let Some(speed) = self.fall_speed {
            ensure!(
                speed.is_finite() && speed > 0.0,
                "fall speed {} is not a positive number",
                speed
            );
        }
        check_piece_offset("current block", &self.current_block)?;
        if let Some(next) = &self.next_block {
            check_piece_offset("next block", next)?;
        }
        Ok(())
    }
}

/// The offset must keep at least the shape's span near the board.
///
/// Anything further out cannot be a real position and would overflow cell
/// arithmetic or stall the ghost search.
fn check_piece_offset(what: &str, piece: &Piece) -> Result<()> {
    let (w, h) = (piece.shape.width() as i32, piece.shape.height() as i32);
    let xs = -w..=BOARD_WIDTH as i32;
    let ys = -h..=BOARD_HEIGHT as i32;
    ensure!(
        xs.contains(&piece.x) && ys.contains(&piece.y),
        "{} offset ({}, {}) is off the board",
        what,
        piece.x,
        piece.y
    );
    Ok(())
}
