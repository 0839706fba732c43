//! Piece module - a falling tetromino as shape matrix, color and offset
//!
//! A piece knows nothing about the board. Moves and rotations are
//! unconditional; the session checks the result against the board and
//! reverts when it is invalid.

use serde::{Deserialize, Serialize};

use crate::rng::SimpleRng;
use crate::types::{PieceKind, Rgb, SPAWN_POSITION};

/// Rotational direction for [`Piece::rotate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Rectangular occupancy matrix, rows top to bottom.
///
/// Always non-empty with rows of equal length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Returns `None` for an empty matrix, an empty row, or ragged rows.
    pub fn new(rows: Vec<Vec<bool>>) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Occupied cells as (column, row) offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &filled)| filled)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// Shape rotated a quarter turn.
    ///
    /// Clockwise reverses the row order and transposes; counter-clockwise
    /// transposes and then reverses the row order.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let (h, w) = (self.height(), self.width());
        let rows = (0..w)
            .map(|new_y| {
                (0..h)
                    .map(|new_x| match direction {
                        RotationDirection::Clockwise => self.rows[h - 1 - new_x][new_y],
                        RotationDirection::CounterClockwise => self.rows[new_x][w - 1 - new_y],
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = String;

    fn try_from(value: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let rows = value
            .into_iter()
            .map(|row| row.into_iter().map(|v| v != 0).collect())
            .collect();
        Shape::new(rows).ok_or_else(|| "shape must be a non-empty rectangular matrix".to_string())
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(u8::from).collect())
            .collect()
    }
}

/// Active or preview piece.
///
/// `(x, y)` is the grid offset of the shape's top-left corner. The serialized
/// form is the structural record `{shape, color, x, y}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub shape: Shape,
    pub color: Rgb,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(shape: Shape, color: Rgb) -> Self {
        Self {
            shape,
            color,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Catalog piece at the spawn offset.
    pub fn from_kind(kind: PieceKind) -> Self {
        // Catalog shapes are fixed and rectangular.
        let shape = Shape {
            rows: kind.spawn_rows(),
        };
        Self::new(shape, kind.color())
    }

    /// Uniformly random catalog piece at the spawn offset.
    pub fn random(rng: &mut SimpleRng) -> Self {
        Self::from_kind(rng.next_kind())
    }

    /// Rotate the shape in place; the offset is unchanged.
    pub fn rotate(&mut self, direction: RotationDirection) {
        self.shape = self.shape.rotated(direction);
    }

    /// Translate by the given deltas. No bounds checking.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Copy translated by the given deltas.
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        let mut p = self.clone();
        p.move_by(dx, dy);
        p
    }

    /// Occupied cells in board coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
