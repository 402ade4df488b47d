//! Uniform random spawner: every draw is independent.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::block_grid::{CellColor, ColorCycle, PartialGrid};

use super::{FIGURES, GridSpawner, SpawnerKind, build_piece, owned_figures};

pub struct TrueRandomSpawner<R: Rng = ChaCha8Rng> {
    rng: R,
    templates: Vec<String>,
    colors: ColorCycle,
}

impl TrueRandomSpawner<ChaCha8Rng> {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for TrueRandomSpawner<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TrueRandomSpawner<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_templates(rng, owned_figures(&FIGURES))
    }

    pub fn with_templates(rng: R, templates: Vec<String>) -> Self {
        Self {
            rng,
            templates,
            colors: ColorCycle::new(),
        }
    }
}

impl<R: Rng> GridSpawner for TrueRandomSpawner<R> {
    fn kind(&self) -> SpawnerKind {
        SpawnerKind::TrueRandom
    }

    fn spawn_grid(&mut self) -> PartialGrid<CellColor> {
        if self.templates.is_empty() {
            return PartialGrid::new(3, 3);
        }
        let index = self.rng.random_range(0..self.templates.len());
        build_piece(&self.templates[index], &mut self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_draws_cover_all_shapes_eventually() {
        let mut spawner = TrueRandomSpawner::with_seed(3);
        let shapes: HashSet<String> = (0..500).map(|_| spawner.spawn_grid().to_pattern()).collect();
        assert_eq!(shapes.len(), FIGURES.len());
    }

    #[test]
    fn test_colors_cycle_independently_of_shape() {
        let mut spawner = TrueRandomSpawner::with_seed(11);
        let colors: Vec<CellColor> = (0..8)
            .map(|_| spawner.spawn_grid().cells().next().map(|c| c.value).unwrap_or_default())
            .collect();
        assert_eq!(&colors[..7], &CellColor::ALL);
        assert_eq!(colors[7], CellColor::Red);
    }
}
