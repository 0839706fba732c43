//! Read-only per-frame view of a session for renderers.

use crate::piece::Piece;
use crate::types::{Cell, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Absolute cells of a piece plus its color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCells {
    pub cells: Vec<(i32, i32)>,
    pub color: Rgb,
}

impl From<&Piece> for PieceCells {
    fn from(piece: &Piece) -> Self {
        Self {
            cells: piece.cells().collect(),
            color: piece.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub board: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
    /// Remaining opacity per row; `Some` only for rows being cleared.
    pub fade: [Option<f32>; BOARD_HEIGHT],
    /// Hidden while cleared rows are fading.
    pub current: Option<PieceCells>,
    pub ghost: Option<PieceCells>,
    /// Next piece, relative to its own top-left corner.
    pub next: Piece,
    pub player_name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
    pub clearing: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && !self.clearing
    }
}
