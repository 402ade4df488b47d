//! Game Field State
//!
//! Owns the two long-lived grids of a session and the spawner that feeds it:
//!
//! - **attached**: the floor, spanning the playfield at origin (0, 0)
//! - **detached**: the falling 3x3 piece
//!
//! Movement lives in [`super::movement`].

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::spawner::{GridSpawner, SpawnerKind};
use crate::world::{GridPosition, GridTransform};

use super::cell::{CellColor, CellData};
use super::error::GridError;
use super::events::{EventQueue, GridEvent, GridKind};
use super::partial_grid::PartialGrid;

/// Payload of the permanent floor line in [`FloorMode::FilledBottom`].
pub const FLOOR_COLOR: CellColor = CellColor::Blue;

/// Shape of the attached grid at the start of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FloorMode {
    /// Nothing placed yet; pieces land on the playfield edge.
    #[default]
    Empty,
    /// The bottom col is permanently filled and never cleared.
    FilledBottom,
}

pub struct GameFieldState {
    transform: GridTransform,
    floor_mode: FloorMode,
    pub(crate) attached: PartialGrid<CellColor>,
    pub(crate) detached: PartialGrid<CellColor>,
    spawner: Box<dyn GridSpawner>,
}

impl GameFieldState {
    /// Field with empty grids. Call [`start_new_game`](Self::start_new_game)
    /// or restore a snapshot before playing.
    pub fn new(transform: GridTransform, floor_mode: FloorMode, spawner: Box<dyn GridSpawner>) -> Self {
        Self {
            transform,
            floor_mode,
            attached: PartialGrid::covering(&transform),
            detached: PartialGrid::default(),
            spawner,
        }
    }

    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    pub fn floor_mode(&self) -> FloorMode {
        self.floor_mode
    }

    pub fn attached_grid(&self) -> &PartialGrid<CellColor> {
        &self.attached
    }

    pub fn detached_grid(&self) -> &PartialGrid<CellColor> {
        &self.detached
    }

    pub fn spawner_kind(&self) -> SpawnerKind {
        self.spawner.kind()
    }

    /// Reset the floor, spawn the first piece and tell views to redraw both.
    pub fn start_new_game(&mut self, events: &mut EventQueue) {
        self.setup_initial_attached_grid();
        self.spawn_new_detached_grid();
        events.push(GridEvent::ReplaceGrid(GridKind::Attached));
        events.push(GridEvent::ReplaceGrid(GridKind::Detached));
        info!("New game on a {}x{} field", self.transform.rows, self.transform.cols);
    }

    /// Allocate the attached grid for a fresh game according to the floor mode.
    pub fn setup_initial_attached_grid(&mut self) {
        let mut attached = PartialGrid::covering(&self.transform);
        if self.floor_mode == FloorMode::FilledBottom {
            let cols = attached.cols();
            let bottom = cols - 1;
            for row in 0..attached.rows() {
                attached.data[(row * cols + bottom) as usize] = FLOOR_COLOR;
            }
        }
        self.attached = attached;
    }

    /// Cols that can be cleared. The permanent floor line is excluded.
    fn clearable_cols(&self) -> i32 {
        match self.floor_mode {
            FloorMode::Empty => self.attached.cols(),
            FloorMode::FilledBottom => self.attached.cols() - 1,
        }
    }

    /// The detached piece is out of bounds or overlaps the floor.
    pub fn test_grids_collision(&self) -> Result<bool, GridError> {
        // Bounds first: out-of-field cells must not reach the overlap query
        if !self.transform.is_grid_in_bounds(self.detached.occupied_positions()) {
            return Ok(true);
        }
        self.attached.does_collide_with(&self.detached)
    }

    pub fn merge_detached_grid(&mut self) -> Result<(), GridError> {
        self.attached.merge(&self.detached)
    }

    /// Clear every complete col. Returns how many were removed.
    pub fn remove_completed_rows(&mut self) -> usize {
        let mut removed = 0;
        let mut col = 0;
        while col < self.clearable_cols() {
            if self.attached.is_col_complete(col) {
                self.attached.remove_col(col);
                removed += 1;
                debug!("Removed completed col {}", col);
                // Re-test the same index: the col above just moved into it
            } else {
                col += 1;
            }
        }
        removed
    }

    pub fn remove_completed_rows_if_needed(&mut self) -> bool {
        self.remove_completed_rows() > 0
    }

    /// Replace the detached piece with a fresh one at the spawn point.
    pub fn spawn_new_detached_grid(&mut self) {
        let mut grid = self.spawner.spawn_grid();
        grid.rebase(self.transform.spawn_position(grid.rows()));
        debug!("Spawned piece '{}' at {}", grid.to_pattern(), grid.origin());
        self.detached = grid;
    }

    /// Swap in previously stored grids.
    pub fn restore_grids(&mut self, attached: PartialGrid<CellColor>, detached: PartialGrid<CellColor>) {
        self.attached = attached;
        self.detached = detached;
    }

    /// Number of filled floor cells.
    pub fn placed_cell_count(&self) -> usize {
        self.attached.cells().count()
    }

    fn cell_symbol(&self, pos: GridPosition) -> char {
        let piece = self.detached.value_at(pos).unwrap_or_default();
        if piece.is_filled() {
            return '#';
        }
        self.attached.value_at(pos).unwrap_or_default().symbol()
    }
}

/// Text dump of the field, top col first, with the falling piece as `#`.
impl fmt::Display for GameFieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for col in 0..self.transform.cols {
            let line: String = (0..self.transform.rows)
                .map(|row| self.cell_symbol(GridPosition::new(row, col)))
                .collect();
            writeln!(f, "|{}|", line)?;
        }
        write!(f, "+{}+", "-".repeat(self.transform.rows as usize))
    }
}
