//! Block grid errors.

use thiserror::Error;

use crate::world::GridPosition;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Negative local coordinate. Coordinates past the far edge are not an
    /// error; they read as empty.
    #[error("grid position {pos} is out of range")]
    OutOfRange { pos: GridPosition },
    /// Cell written outside the grid extent.
    #[error("grid position {pos} lies outside a {rows}x{cols} grid")]
    OutsideExtent { pos: GridPosition, rows: i32, cols: i32 },
    #[error("piece pattern must have 9 cells, got {0}")]
    InvalidPattern(usize),
}
