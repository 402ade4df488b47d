//! Game Persistence
//!
//! Saves and restores a running block game so it can be continued later.
//!
//! ## Format
//! Each grid is stored as a flat row-major cell array (`row * cols + col`)
//! plus its dimensions and origin. A slot additionally remembers which
//! spawner the game used and whether it holds a game at all.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::block_grid::{CellColor, CellData, GameFieldState, PartialGrid};
use crate::game::spawner::SpawnerKind;
use crate::world::GridPosition;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("stored grid has {actual} cells, expected {rows}x{cols} = {expected}")]
    LengthMismatch {
        rows: i32,
        cols: i32,
        expected: usize,
        actual: usize,
    },
    #[error("stored grid has invalid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("no stored game to continue")]
    NoData,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// STORED GRID
// ============================================================================

/// Serializable form of a [`PartialGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGrid<T> {
    pub data: Vec<T>,
    pub rows: i32,
    pub cols: i32,
    pub origin: GridPosition,
}

impl<T: CellData> PartialGrid<T> {
    pub fn store_data(&self) -> StoredGrid<T> {
        StoredGrid {
            data: self.data.clone(),
            rows: self.rows,
            cols: self.cols,
            origin: self.origin,
        }
    }

    /// Replace contents, dimensions and origin with stored ones.
    pub fn restore_data(&mut self, stored: StoredGrid<T>) -> Result<(), PersistenceError> {
        let expected = match stored.rows.checked_mul(stored.cols) {
            Some(cells) if stored.rows >= 0 && stored.cols >= 0 => cells as usize,
            _ => {
                return Err(PersistenceError::InvalidDimensions {
                    rows: stored.rows,
                    cols: stored.cols,
                });
            }
        };
        if stored.data.len() != expected {
            return Err(PersistenceError::LengthMismatch {
                rows: stored.rows,
                cols: stored.cols,
                expected,
                actual: stored.data.len(),
            });
        }

        self.data = stored.data;
        self.rows = stored.rows;
        self.cols = stored.cols;
        self.origin = stored.origin;
        Ok(())
    }

    pub fn from_stored(stored: StoredGrid<T>) -> Result<Self, PersistenceError> {
        let mut grid = Self::default();
        grid.restore_data(stored)?;
        Ok(grid)
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Everything needed to continue a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub spawner_kind: SpawnerKind,
    pub attached: StoredGrid<CellColor>,
    pub detached: StoredGrid<CellColor>,
}

impl GameSnapshot {
    pub fn capture(field: &GameFieldState) -> Self {
        Self {
            spawner_kind: field.spawner_kind(),
            attached: field.attached_grid().store_data(),
            detached: field.detached_grid().store_data(),
        }
    }

    /// Load both grids into `field`. The field is left untouched on error.
    ///
    /// The spawner is not swapped: build the field with the stored
    /// `spawner_kind` before restoring.
    pub fn restore_into(&self, field: &mut GameFieldState) -> Result<(), PersistenceError> {
        let attached = PartialGrid::from_stored(self.attached.clone())?;
        let detached = PartialGrid::from_stored(self.detached.clone())?;
        field.restore_grids(attached, detached);
        debug!("Restored field with {} placed cells", field.placed_cell_count());
        Ok(())
    }
}

// ============================================================================
// SLOTS
// ============================================================================

/// Storage for one saved game.
pub trait PersistentSlot {
    fn store(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistenceError>;

    /// The stored game, or [`PersistenceError::NoData`].
    fn restore(&self) -> Result<GameSnapshot, PersistenceError>;

    /// Forget the stored game. The spawner choice is kept.
    fn clear(&mut self) -> Result<(), PersistenceError>;

    /// A stored game is available.
    fn can_continue(&self) -> bool;

    /// Spawner to use for the next game, stored or default.
    fn spawner_kind(&self) -> SpawnerKind;

    fn store_spawner_kind(&mut self, kind: SpawnerKind) -> Result<(), PersistenceError>;
}

/// Contents of a slot, shared by the in-memory and file slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SlotContents {
    has_data: bool,
    spawner_kind: SpawnerKind,
    snapshot: Option<GameSnapshot>,
}

impl SlotContents {
    fn store(&mut self, snapshot: &GameSnapshot) {
        self.has_data = true;
        self.spawner_kind = snapshot.spawner_kind;
        self.snapshot = Some(snapshot.clone());
    }

    fn restore(&self) -> Result<GameSnapshot, PersistenceError> {
        match (&self.snapshot, self.has_data) {
            (Some(snapshot), true) => Ok(snapshot.clone()),
            _ => Err(PersistenceError::NoData),
        }
    }
}

/// Slot held in memory.
///
/// Clearing only drops the has-data flag; the snapshot stays around until
/// overwritten.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: SlotContents,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentSlot for MemorySlot {
    fn store(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistenceError> {
        self.contents.store(snapshot);
        Ok(())
    }

    fn restore(&self) -> Result<GameSnapshot, PersistenceError> {
        self.contents.restore()
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.contents.has_data = false;
        Ok(())
    }

    fn can_continue(&self) -> bool {
        self.contents.has_data
    }

    fn spawner_kind(&self) -> SpawnerKind {
        self.contents.spawner_kind
    }

    fn store_spawner_kind(&mut self, kind: SpawnerKind) -> Result<(), PersistenceError> {
        self.contents.spawner_kind = kind;
        Ok(())
    }
}

/// Slot backed by a JSON file. A missing file reads as an empty slot.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    path: PathBuf,
}

impl JsonFileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SlotContents, PersistenceError> {
        if !self.path.exists() {
            return Ok(SlotContents::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, contents: &SlotContents) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(contents)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PersistentSlot for JsonFileSlot {
    fn store(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistenceError> {
        let mut contents = self.read()?;
        contents.store(snapshot);
        self.write(&contents)?;
        info!("Saved game to {:?}", self.path);
        Ok(())
    }

    fn restore(&self) -> Result<GameSnapshot, PersistenceError> {
        self.read()?.restore()
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        let mut contents = self.read()?;
        contents.has_data = false;
        self.write(&contents)
    }

    fn can_continue(&self) -> bool {
        self.read().map(|c| c.has_data).unwrap_or(false)
    }

    fn spawner_kind(&self) -> SpawnerKind {
        self.read().map(|c| c.spawner_kind).unwrap_or_default()
    }

    fn store_spawner_kind(&mut self, kind: SpawnerKind) -> Result<(), PersistenceError> {
        let mut contents = self.read()?;
        contents.spawner_kind = kind;
        self.write(&contents)
    }
}
