//! Partial Grid
//!
//! A rectangular block of cells placed at an origin inside the playfield.
//! The falling piece is a small 3x3 partial grid; the static floor is a
//! partial grid spanning the whole field at origin (0, 0).
//!
//! Cells are stored row-major: `data[row * cols + col]`.

use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::world::{GridPosition, GridTransform, PIECE_SIZE};

use super::cell::{Cell, CellData};
use super::error::GridError;

/// Quarter-turn direction, as seen on screen (col grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialGrid<T> {
    pub(crate) origin: GridPosition,
    pub(crate) rows: i32,
    pub(crate) cols: i32,
    pub(crate) data: Vec<T>,
}

impl<T: CellData> Default for PartialGrid<T> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T: CellData> PartialGrid<T> {
    /// Empty grid at origin (0, 0).
    ///
    /// Negative dimensions become 0. Dimensions whose cell count does not
    /// fit an `i32` yield an empty 0x0 grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let (rows, cols) = match rows.max(0).checked_mul(cols.max(0)) {
            Some(_) => (rows.max(0), cols.max(0)),
            None => {
                warn!("Grid of {}x{} cells is too large, using an empty grid", rows, cols);
                (0, 0)
            }
        };
        Self {
            origin: GridPosition::ZERO,
            rows,
            cols,
            data: vec![T::default(); (rows * cols) as usize],
        }
    }

    /// Empty grid covering the whole playfield.
    pub fn covering(transform: &GridTransform) -> Self {
        Self::new(transform.rows, transform.cols)
    }

    /// 3x3 piece from a pattern read line by line.
    ///
    /// `/` and newlines separate lines; the nine remaining characters map to
    /// `pattern[col * 3 + row]`. A line written after `"/ "` may carry that
    /// one extra leading space, so `" x / xx / x  "` reads like
    /// `" x /xx /x  "`. Any non-space is filled with `payload`.
    pub fn from_pattern(payload: T, pattern: &str) -> Result<Self, GridError> {
        let line_len = PIECE_SIZE as usize;
        let chars: Vec<char> = pattern
            .split(['/', '\n'])
            .enumerate()
            .flat_map(|(i, line)| {
                let padded = i > 0 && line.len() == line_len + 1 && line.starts_with(' ');
                let line = if padded { &line[1..] } else { line };
                line.chars()
            })
            .collect();
        let size = (PIECE_SIZE * PIECE_SIZE) as usize;
        if chars.len() != size {
            return Err(GridError::InvalidPattern(chars.len()));
        }

        let mut grid = Self::new(PIECE_SIZE, PIECE_SIZE);
        for col in 0..PIECE_SIZE {
            for row in 0..PIECE_SIZE {
                if chars[(col * PIECE_SIZE + row) as usize] != ' ' {
                    grid.set_local(GridPosition::new(row, col), payload)?;
                }
            }
        }
        Ok(grid)
    }

    /// Inverse of [`from_pattern`](Self::from_pattern) for square 3x3 grids:
    /// `x` for filled cells, space otherwise.
    pub fn to_pattern(&self) -> String {
        let mut pattern = String::with_capacity((self.rows * self.cols) as usize);
        for col in 0..self.cols {
            for row in 0..self.rows {
                let filled = self.local(row, col).is_some_and(|v| v.is_filled());
                pattern.push(if filled { 'x' } else { ' ' });
            }
        }
        pattern
    }

    pub fn origin(&self) -> GridPosition {
        self.origin
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows || col >= self.cols {
            return None;
        }
        Some((row * self.cols + col) as usize)
    }

    fn local(&self, row: i32, col: i32) -> Option<T> {
        self.index(row, col).map(|i| self.data[i])
    }

    /// Write a cell at a local coordinate.
    pub fn set_local(&mut self, pos: GridPosition, value: T) -> Result<(), GridError> {
        match self.index(pos.row, pos.col) {
            Some(i) => {
                self.data[i] = value;
                Ok(())
            }
            None => Err(GridError::OutsideExtent {
                pos,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }

    /// Cell value at an absolute position.
    ///
    /// Positions before the origin are an error; positions past the far edge
    /// read as empty.
    pub fn value_at(&self, pos: GridPosition) -> Result<T, GridError> {
        let local = pos - self.origin;
        if !local.is_non_negative() {
            return Err(GridError::OutOfRange { pos });
        }
        Ok(self.local(local.row, local.col).unwrap_or_default())
    }

    pub fn is_position_occupied(&self, pos: GridPosition) -> Result<bool, GridError> {
        Ok(self.value_at(pos)?.is_filled())
    }

    /// Filled cells with their absolute positions.
    pub fn cells(&self) -> impl Iterator<Item = Cell<T>> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                let value = self.data[(row * self.cols + col) as usize];
                value.is_filled().then(|| Cell {
                    pos: self.origin + GridPosition::new(row, col),
                    value,
                })
            })
        })
    }

    /// Absolute positions of the filled cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.cells().map(|cell| cell.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|v| !v.is_filled())
    }

    /// Local bounding box `(min, max)` of the filled cells.
    pub fn occupied_bounds(&self) -> Option<(GridPosition, GridPosition)> {
        self.cells().map(|cell| cell.pos - self.origin).fold(None, |acc, p| {
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (
                    GridPosition::new(lo.row.min(p.row), lo.col.min(p.col)),
                    GridPosition::new(hi.row.max(p.row), hi.col.max(p.col)),
                ),
            })
        })
    }

    /// Whether any filled cell of `other` lands on a filled cell of `self`.
    pub fn does_collide_with(&self, other: &PartialGrid<T>) -> Result<bool, GridError> {
        for pos in other.occupied_positions() {
            if self.is_position_occupied(pos)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Copy the filled cells of `other` into `self` at the same absolute
    /// positions.
    pub fn merge(&mut self, other: &PartialGrid<T>) -> Result<(), GridError> {
        for cell in other.cells() {
            let local = cell.pos - self.origin;
            if !local.is_non_negative() {
                return Err(GridError::OutOfRange { pos: cell.pos });
            }
            self.set_local(local, cell.value)?;
        }
        Ok(())
    }

    /// Occupancy of every row along one col, in row order.
    pub fn col_occupancy(&self, col: i32) -> impl Iterator<Item = bool> + '_ {
        (0..self.rows).map(move |row| self.local(row, col).is_some_and(|v| v.is_filled()))
    }

    /// Every row along `col` is filled.
    pub fn is_col_complete(&self, col: i32) -> bool {
        self.rows > 0 && col >= 0 && col < self.cols && self.col_occupancy(col).all(|filled| filled)
    }

    /// Delete one col: every col above it shifts down by one and col 0 is
    /// cleared.
    pub fn remove_col(&mut self, col: i32) {
        if col < 0 || col >= self.cols {
            return;
        }
        for row in 0..self.rows {
            let base = (row * self.cols) as usize;
            for c in (1..=col as usize).rev() {
                self.data[base + c] = self.data[base + c - 1];
            }
            self.data[base] = T::default();
        }
    }

    /// Move the origin by `delta`, clamped so every filled cell stays inside
    /// the playfield. An empty grid moves unclamped.
    pub fn translate(&mut self, delta: GridPosition, transform: &GridTransform) {
        let target = self.origin + delta;
        self.origin = match self.occupied_bounds() {
            Some((lo, hi)) => transform.clamp_origin(target, lo, hi),
            None => target,
        };
    }

    /// Set the origin directly, without clamping.
    pub fn rebase(&mut self, origin: GridPosition) {
        self.origin = origin;
    }

    /// The grid turned a quarter turn about its center. Same origin.
    ///
    /// Only square grids rotate; a non-square grid is returned unchanged.
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        if self.rows != self.cols {
            return self.clone();
        }

        let n = self.rows;
        let mut rotated = Self::new(n, n);
        rotated.origin = self.origin;
        for row in 0..n {
            for col in 0..n {
                let (to_row, to_col) = match direction {
                    RotateDirection::Clockwise => (n - 1 - col, row),
                    RotateDirection::CounterClockwise => (col, n - 1 - row),
                };
                rotated.data[(to_row * n + to_col) as usize] = self.data[(row * n + col) as usize];
            }
        }
        rotated
    }

    /// World-space center of the grid's full extent.
    pub fn world_centroid(&self, transform: &GridTransform) -> Vec3 {
        transform.grid_world_centroid(self.origin, self.rows, self.cols)
    }
}
