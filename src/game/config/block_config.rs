//! Block Game Configuration

use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::game::block_grid::FloorMode;
use crate::game::spawner::SpawnerKind;
use crate::world::{Bounds, GridTransform, PIECE_SIZE};

/// Playfield layout and pacing of the falling-block game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockGameConfig {
    /// Cells along X
    pub rows: i32,
    /// Cells along Y
    pub cols: i32,
    /// World-space box covered by the playfield
    pub bounds: Bounds,
    /// Initial floor shape
    pub floor_mode: FloorMode,
    /// Piece selection strategy
    pub spawner: SpawnerKind,
    /// RNG seed for reproducible sessions (OS entropy when absent)
    pub seed: Option<u64>,
    /// Fall speed in cells per second
    pub gravity_step: f32,
    /// Where to save the game on exit
    pub save_path: Option<PathBuf>,
}

impl Default for BlockGameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 20,
            bounds: Bounds::new(Vec3::ZERO, Vec3::new(10.0, 20.0, 0.0)),
            floor_mode: FloorMode::Empty,
            spawner: SpawnerKind::GrabBag,
            seed: None,
            gravity_step: 2.0,
            save_path: None,
        }
    }
}

impl BlockGameConfig {
    pub fn transform(&self) -> GridTransform {
        GridTransform::new(self.bounds, self.rows, self.cols)
    }

    /// Reject playfields a piece cannot spawn into or that are too large to
    /// index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < PIECE_SIZE || self.cols < PIECE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "playfield {}x{} is smaller than a {}x{} piece",
                self.rows, self.cols, PIECE_SIZE, PIECE_SIZE
            )));
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(ConfigError::Invalid(format!("playfield {}x{} is too large", self.rows, self.cols)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BlockGameConfig = serde_json::from_str(r#"{ "rows": 6, "spawner": "TrueRandom" }"#).unwrap();
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 20);
        assert_eq!(config.spawner, SpawnerKind::TrueRandom);
        assert_eq!(config.transform().rows, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_playfields() {
        let huge = BlockGameConfig {
            rows: 70_000,
            cols: 70_000,
            ..BlockGameConfig::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::Invalid(_))));

        let tiny = BlockGameConfig {
            rows: 2,
            ..BlockGameConfig::default()
        };
        assert!(matches!(tiny.validate(), Err(ConfigError::Invalid(_))));
    }
}
