//! Target Cutter Configuration

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuttingConfig {
    /// Seconds between a cut and the next target appearing
    pub spawn_delay: f32,
    /// Magnitude of the push applied to each fragment
    pub debris_force: f32,
    /// Shortest slash (first to last point, screen units) that cuts
    pub slash_min_distance: f32,
    /// Recenter each fragment on its own centroid
    pub recenter_debris: bool,
    /// Round length in seconds
    pub game_length: f32,
}

impl Default for CuttingConfig {
    fn default() -> Self {
        Self {
            spawn_delay: 3.0,
            debris_force: 1600.0,
            slash_min_distance: 6.0,
            recenter_debris: true,
            game_length: 60.0,
        }
    }
}
