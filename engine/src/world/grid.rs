//! Grid Transform Module
//!
//! Maps between world space and the integer cell grid of the block game.
//!
//! ## Axes
//! - `row` is the horizontal index and grows with world X.
//! - `col` is the vertical index and grows downward: col 0 is the top of the
//!   playfield (bounds max Y), col `cols` the bottom (bounds min Y).
//!
//! A horizontal line of cells is therefore a "column" in this model.

use std::ops::{Add, AddAssign, Neg, Sub};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Width (and height) of a spawned piece in cells.
pub const PIECE_SIZE: i32 = 3;

// ============================================================================
// GRID POSITION
// ============================================================================

/// Integer cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub const ZERO: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Both coordinates non-negative.
    pub fn is_non_negative(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

impl Add for GridPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl AddAssign for GridPosition {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for GridPosition {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for GridPosition {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.row, -self.col)
    }
}

// ============================================================================
// ROUNDING
// ============================================================================

/// How a fractional grid coordinate is snapped to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Nearest cell, ties to even
    #[default]
    Round,
    Floor,
    Ceil,
}

impl Rounding {
    pub fn apply(self, value: f32) -> i32 {
        match self {
            Rounding::Round => value.round_ties_even() as i32,
            Rounding::Floor => value.floor() as i32,
            Rounding::Ceil => value.ceil() as i32,
        }
    }

    /// Rounding that snaps toward the direction of travel along an axis.
    ///
    /// A positive move rounds with `positive`, a negative one with the
    /// opposite, and no move rounds to nearest.
    pub fn for_travel(delta: f32, positive: Rounding) -> Rounding {
        let negative = match positive {
            Rounding::Floor => Rounding::Ceil,
            Rounding::Ceil => Rounding::Floor,
            Rounding::Round => Rounding::Round,
        };
        if delta > 0.0 {
            positive
        } else if delta < 0.0 {
            negative
        } else {
            Rounding::Round
        }
    }
}

// ============================================================================
// BOUNDS
// ============================================================================

/// World-space axis-aligned box covered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center - size * 0.5, center + size * 0.5)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(10.0, 20.0, 0.0))
    }
}

// ============================================================================
// GRID TRANSFORM
// ============================================================================

/// Playfield placement: world bounds split into `rows x cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTransform {
    pub bounds: Bounds,
    /// Cell count along X
    pub rows: i32,
    /// Cell count along Y
    pub cols: i32,
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::new(Bounds::default(), 10, 20)
    }
}

impl GridTransform {
    pub fn new(bounds: Bounds, rows: i32, cols: i32) -> Self {
        Self {
            bounds,
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// World units per row (X) and per col (Y).
    pub fn cell_size(&self) -> (f32, f32) {
        let size = self.bounds.size();
        (size.x / self.rows as f32, size.y / self.cols as f32)
    }

    /// Nearest cell to a world position.
    pub fn world_to_grid(&self, pos: Vec3) -> GridPosition {
        self.world_to_grid_with(pos, Rounding::Round, Rounding::Round)
    }

    /// Cell for a world position with explicit per-axis rounding.
    pub fn world_to_grid_with(&self, pos: Vec3, row_rounding: Rounding, col_rounding: Rounding) -> GridPosition {
        let (per_row, per_col) = self.cell_size();
        let local = pos - self.bounds.min;

        GridPosition {
            row: row_rounding.apply(local.x / per_row),
            col: col_rounding.apply(self.cols as f32 - local.y / per_col),
        }
    }

    /// World position of a (possibly fractional) grid coordinate.
    pub fn grid_to_world_f(&self, row: f32, col: f32) -> Vec3 {
        let min = self.bounds.min;
        let max = self.bounds.max;
        Vec3::new(
            min.x + (max.x - min.x) * (row / self.rows as f32),
            max.y + (min.y - max.y) * (col / self.cols as f32),
            self.bounds.center().z,
        )
    }

    /// World position of a cell corner.
    pub fn grid_to_world(&self, pos: GridPosition) -> Vec3 {
        self.grid_to_world_f(pos.row as f32, pos.col as f32)
    }

    /// World center of a `rows x cols` sub-grid placed at `origin`.
    pub fn grid_world_centroid(&self, origin: GridPosition, rows: i32, cols: i32) -> Vec3 {
        self.grid_to_world_f(
            origin.row as f32 + rows as f32 / 2.0,
            origin.col as f32 + cols as f32 / 2.0,
        )
    }

    /// Whether a cell lies inside the playfield.
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Whether every given cell lies inside the playfield.
    pub fn is_grid_in_bounds<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = GridPosition>,
    {
        cells.into_iter().all(|cell| self.contains(cell))
    }

    /// Clamp an origin so that the local box `occupied_min..=occupied_max`
    /// (relative to the origin) stays inside the playfield.
    pub fn clamp_origin(
        &self,
        origin: GridPosition,
        occupied_min: GridPosition,
        occupied_max: GridPosition,
    ) -> GridPosition {
        let clamp_axis = |value: i32, lo: i32, hi: i32, extent: i32| {
            let min_origin = -lo;
            let max_origin = extent - 1 - hi;
            if min_origin > max_origin {
                // Piece wider than the field: pin to the near edge
                min_origin
            } else {
                value.clamp(min_origin, max_origin)
            }
        };

        GridPosition {
            row: clamp_axis(origin.row, occupied_min.row, occupied_max.row, self.rows),
            col: clamp_axis(origin.col, occupied_min.col, occupied_max.col, self.cols),
        }
    }

    /// Origin at which a new piece of `width` cells enters: centered
    /// horizontally, at the top.
    pub fn spawn_position(&self, width: i32) -> GridPosition {
        GridPosition::new(((self.rows - width) / 2).max(0), 0)
    }

    /// Spawn origin for a standard 3x3 piece.
    pub fn piece_spawn_position(&self) -> GridPosition {
        self.spawn_position(PIECE_SIZE)
    }
}
