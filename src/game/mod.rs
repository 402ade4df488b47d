//! Game Module
//!
//! Contains game-specific systems that build on top of the engine.

pub mod block_grid;
pub mod config;
pub mod cutting;
pub mod flow;
pub mod persistence;
pub mod racetrack;
pub mod spawner;

pub use block_grid::{
    CellColor, EventQueue, FloorMode, GameFieldState, GridError, GridEvent, GridKind, MoveOutcome, PartialGrid,
    RotateDirection,
};
pub use config::{BlockGameConfig, ConfigError, CuttingConfig, load_json};
pub use cutting::{Debris, SlashGesture, Target, TargetCutter};
pub use flow::{FlowEffect, FlowInput, FlowState, GameFlow, GameModel};
pub use persistence::{GameSnapshot, JsonFileSlot, MemorySlot, PersistenceError, PersistentSlot, StoredGrid};
pub use racetrack::{Racetrack, RacetrackError};
pub use spawner::{
    GrabBagSpawner, GridSpawner, SpawnerKind, SpecificFiguresSpawner, TrueRandomSpawner, create_spawner,
};
