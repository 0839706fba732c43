//! Board module - manages the game grid and the line-clear animation
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of
//! the piece that locked there. Storage is a flat row-major array.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).
//!
//! Line clearing is two-phase: [`Board::clear_lines`] only records the full
//! rows, [`Board::update_clearing_animation`] fades them and removes them once
//! the fade completes.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, Rgb, ANIMATION_STEPS, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Rows detected full and still fading, ascending
    clearing_lines: ArrayVec<usize, BOARD_HEIGHT>,
    /// Shared fade step counter, 0..ANIMATION_STEPS
    animation_progress: u8,
    /// Row count from the most recent `clear_lines` scan
    lines_cleared: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            clearing_lines: ArrayVec::new(),
            animation_progress: 0,
            lines_cleared: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * BOARD_WIDTH + (x as usize))
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH;
        &self.cells[start..start + BOARD_WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < BOARD_HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Whether `piece` fits at its current offset.
    ///
    /// Cells must lie in columns `[0, width)` and above the bottom edge, and
    /// must not overlap a filled cell. Cells above row 0 only get the
    /// horizontal check, so pieces may spawn partly above the board.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return false;
            }
            y < 0 || matches!(self.get(x, y), Some(None))
        })
    }

    /// Write the piece's color into every cell it covers.
    ///
    /// The caller validates the position first. Cells above the board are
    /// dropped.
    pub fn place_block(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// Detect full rows and start their fade.
    ///
    /// The grid is left untouched; removal happens when the animation
    /// finishes. Returns the number of rows detected, which is also kept as
    /// [`Board::lines_cleared`]. While a previous clear is still animating
    /// this returns 0 without scanning.
    pub fn clear_lines(&mut self) -> usize {
        if !self.clearing_lines.is_empty() {
            return 0;
        }

        for y in 0..BOARD_HEIGHT {
            if self.is_row_full(y) {
                self.clearing_lines.push(y);
            }
        }
        self.animation_progress = 0;
        self.lines_cleared = self.clearing_lines.len();
        self.lines_cleared
    }

    /// Advance the fade by one step; on the last step remove the rows.
    ///
    /// All fading rows go in the same step, and the same number of empty
    /// rows enter at the top.
    pub fn update_clearing_animation(&mut self) {
        if self.clearing_lines.is_empty() {
            return;
        }

        self.animation_progress += 1;
        if self.animation_progress < ANIMATION_STEPS {
            return;
        }

        let rows = std::mem::take(&mut self.clearing_lines);
        self.remove_rows(&rows);
        self.animation_progress = 0;
    }

    /// Drop every row in `rows` at once and pad the top with empty rows.
    ///
    /// Two-pointer compaction from the bottom up, so each surviving row
    /// moves exactly once and keeps its order relative to the others.
    fn remove_rows(&mut self, rows: &[usize]) {
        let mut write_y = BOARD_HEIGHT;
        for read_y in (0..BOARD_HEIGHT).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * BOARD_WIDTH;
                self.cells
                    .copy_within(src..src + BOARD_WIDTH, write_y * BOARD_WIDTH);
            }
        }
        self.cells[..write_y * BOARD_WIDTH].fill(None);
    }

    /// True when no clear is pending.
    pub fn is_animation_complete(&self) -> bool {
        self.clearing_lines.is_empty()
    }

    pub fn clearing_lines(&self) -> &[usize] {
        &self.clearing_lines
    }

    pub fn animation_progress(&self) -> u8 {
        self.animation_progress
    }

    /// Rows found by the most recent `clear_lines` scan.
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Remaining opacity of a fading row, from 1.0 down toward 0.0.
    ///
    /// `None` for rows that are not being cleared.
    pub fn clear_fade(&self, y: usize) -> Option<f32> {
        if !self.clearing_lines.contains(&y) {
            return None;
        }
        Some(1.0 - self.animation_progress as f32 / ANIMATION_STEPS as f32)
    }

    /// Lowest resting copy of `piece` in its current column alignment.
    ///
    /// The input is not modified.
    pub fn get_ghost_position(&self, piece: &Piece) -> Piece {
        let mut ghost = piece.clone();
        while self.is_valid_position(&ghost) {
            ghost.move_by(0, 1);
        }
        ghost.move_by(0, -1);
        ghost
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grid as nested rows, for persistence and tests.
    pub fn grid_rows(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT).map(|y| self.row(y).to_vec()).collect()
    }

    /// Build a board from nested rows.
    ///
    /// Returns `None` unless there are exactly 20 rows of 10 cells.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        if rows.len() != BOARD_HEIGHT || rows.iter().any(|r| r.len() != BOARD_WIDTH) {
            return None;
        }
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            board.cells[y * BOARD_WIDTH..(y + 1) * BOARD_WIDTH].copy_from_slice(row);
        }
        Some(board)
    }

    /// Fill a whole row with one color (test and bench helper).
    pub fn fill_row(&mut self, y: usize, color: Rgb) {
        if y < BOARD_HEIGHT {
            let start = y * BOARD_WIDTH;
            self.cells[start..start + BOARD_WIDTH].fill(Some(color));
        }
    }

    /// Clear the entire board, including any pending animation
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
