//! Piece Spawners
//!
//! A spawner hands out the next falling piece: a 3x3 grid of one color.
//! Shape and color are chosen independently: shapes come from a template
//! list, colors walk the palette in order.
//!
//! # Strategies
//!
//! - [`GrabBagSpawner`] - every template once per cycle, in random order
//! - [`TrueRandomSpawner`] - independent uniform draw each time
//! - [`SpecificFiguresSpawner`] - fixed round-robin list (tutorials, tests)

mod grab_bag;
mod specific;
mod true_random;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::game::block_grid::{CellColor, ColorCycle, PartialGrid};

pub use grab_bag::GrabBagSpawner;
pub use specific::SpecificFiguresSpawner;
pub use true_random::TrueRandomSpawner;

/// The standard piece shapes. Each `/`-separated line is one col, top first.
pub const FIGURES: [&str; 10] = [
    "   /   /xxx",
    "x  /x  /x  ",
    "   /  x/xxx",
    "xxx/x  /   ",
    "   / xx/xx ",
    "xx / xx/   ",
    " xx/ xx/   ",
    "xx /xx /   ",
    "xxx/ x /   ",
    "x  /xx /x  ",
];

/// Default list for [`SpecificFiguresSpawner`].
pub const DEFAULT_SPECIFIC_FIGURES: [&str; 1] = ["xx /xx /   "];

/// Which spawner a session uses. Persisted so a continued game keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpawnerKind {
    #[default]
    GrabBag,
    TrueRandom,
    SpecificFigures,
}

impl std::fmt::Display for SpawnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnerKind::GrabBag => write!(f, "grab bag"),
            SpawnerKind::TrueRandom => write!(f, "true random"),
            SpawnerKind::SpecificFigures => write!(f, "specific figures"),
        }
    }
}

/// Source of new falling pieces.
pub trait GridSpawner {
    fn kind(&self) -> SpawnerKind;

    /// Next piece, at origin (0, 0).
    fn spawn_grid(&mut self) -> PartialGrid<CellColor>;
}

/// Build the spawner for `kind`. Random spawners are seeded from `seed` when
/// given, otherwise from the OS.
pub fn create_spawner(kind: SpawnerKind, seed: Option<u64>) -> Box<dyn GridSpawner> {
    match (kind, seed) {
        (SpawnerKind::GrabBag, Some(seed)) => Box::new(GrabBagSpawner::with_seed(seed)),
        (SpawnerKind::GrabBag, None) => Box::new(GrabBagSpawner::new()),
        (SpawnerKind::TrueRandom, Some(seed)) => Box::new(TrueRandomSpawner::with_seed(seed)),
        (SpawnerKind::TrueRandom, None) => Box::new(TrueRandomSpawner::new()),
        (SpawnerKind::SpecificFigures, _) => Box::new(SpecificFiguresSpawner::default()),
    }
}

/// Shape templates as owned strings.
pub(crate) fn owned_figures(figures: &[&str]) -> Vec<String> {
    figures.iter().map(|f| f.to_string()).collect()
}

/// Build a piece from a template in the next palette color.
///
/// A malformed template yields an empty piece (logged) rather than an error,
/// so a bad custom list cannot stop the game loop.
pub(crate) fn build_piece(template: &str, colors: &mut ColorCycle) -> PartialGrid<CellColor> {
    let color = colors.next_color();
    PartialGrid::from_pattern(color, template).unwrap_or_else(|err| {
        warn!("Ignoring piece template {:?}: {}", template, err);
        PartialGrid::new(3, 3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figures_are_valid_and_non_empty() {
        for figure in FIGURES {
            let grid = PartialGrid::from_pattern(CellColor::Red, figure).unwrap();
            assert!(!grid.is_empty(), "{figure:?}");
        }
    }

    #[test]
    fn test_create_spawner_kind() {
        for kind in [SpawnerKind::GrabBag, SpawnerKind::TrueRandom, SpawnerKind::SpecificFigures] {
            assert_eq!(create_spawner(kind, Some(7)).kind(), kind);
        }
    }

    #[test]
    fn test_bad_template_spawns_empty_piece() {
        let mut colors = ColorCycle::new();
        let piece = build_piece("nope", &mut colors);
        assert!(piece.is_empty());
        assert_eq!(piece.rows(), 3);
    }
}
