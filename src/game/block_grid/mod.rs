//! Block Grid Module
//!
//! The falling-block playfield: cell grids, the field state that owns them,
//! piece movement and the view events it emits.
//!
//! # Submodules
//!
//! - [`cell`] - Cell payload trait and the `CellColor` palette
//! - [`partial_grid`] - Rectangular cell block placed at an origin
//! - [`field`] - `GameFieldState`: attached floor, detached piece, spawner
//! - [`movement`] - Move/rotate requests and landing
//! - [`events`] - Notifications for views
//! - [`error`] - `GridError`

pub mod cell;
pub mod error;
pub mod events;
pub mod field;
pub mod movement;
pub mod partial_grid;

pub use cell::{Cell, CellColor, CellData, ColorCycle};
pub use error::GridError;
pub use events::{EventQueue, GridEvent, GridKind};
pub use field::{FLOOR_COLOR, FloorMode, GameFieldState};
pub use movement::MoveOutcome;
pub use partial_grid::{PartialGrid, RotateDirection};
