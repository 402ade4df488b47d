//! Grab-bag spawner: draws without replacement, refilling once empty.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::block_grid::{CellColor, ColorCycle, PartialGrid};

use super::{FIGURES, GridSpawner, SpawnerKind, build_piece, owned_figures};

pub struct GrabBagSpawner<R: Rng = ChaCha8Rng> {
    rng: R,
    templates: Vec<String>,
    /// Template indices not yet drawn this cycle
    bag: Vec<usize>,
    colors: ColorCycle,
}

impl GrabBagSpawner<ChaCha8Rng> {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for GrabBagSpawner<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GrabBagSpawner<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_templates(rng, owned_figures(&FIGURES))
    }

    pub fn with_templates(rng: R, templates: Vec<String>) -> Self {
        Self {
            rng,
            templates,
            bag: Vec::new(),
            colors: ColorCycle::new(),
        }
    }

    /// Draw the next template index.
    fn draw(&mut self) -> Option<usize> {
        if self.bag.is_empty() {
            self.bag.extend(0..self.templates.len());
        }
        if self.bag.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..self.bag.len());
        Some(self.bag.swap_remove(pick))
    }
}

impl<R: Rng> GridSpawner for GrabBagSpawner<R> {
    fn kind(&self) -> SpawnerKind {
        SpawnerKind::GrabBag
    }

    fn spawn_grid(&mut self) -> PartialGrid<CellColor> {
        match self.draw() {
            Some(index) => build_piece(&self.templates[index], &mut self.colors),
            None => PartialGrid::new(3, 3),
        }
    }
}
