//! World Module
//!
//! Grid coordinates and the world-space placement of the block-game playfield.
//!
//! ## Default Playfield
//! 10 cells wide, 20 cells tall, one world unit per cell, with the bottom-left
//! corner at the world origin.

pub mod grid;

pub use grid::{Bounds, GridPosition, GridTransform, PIECE_SIZE, Rounding};
