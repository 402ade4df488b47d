//! Deterministic spawner over a fixed list of shapes.

use crate::game::block_grid::{CellColor, ColorCycle, PartialGrid};

use super::{DEFAULT_SPECIFIC_FIGURES, GridSpawner, SpawnerKind, build_piece, owned_figures};

pub struct SpecificFiguresSpawner {
    figures: Vec<String>,
    next: usize,
    colors: ColorCycle,
}

impl SpecificFiguresSpawner {
    pub fn new(figures: Vec<String>) -> Self {
        Self {
            figures,
            next: 0,
            colors: ColorCycle::new(),
        }
    }
}

impl Default for SpecificFiguresSpawner {
    fn default() -> Self {
        Self::new(owned_figures(&DEFAULT_SPECIFIC_FIGURES))
    }
}

impl GridSpawner for SpecificFiguresSpawner {
    fn kind(&self) -> SpawnerKind {
        SpawnerKind::SpecificFigures
    }

    fn spawn_grid(&mut self) -> PartialGrid<CellColor> {
        if self.figures.is_empty() {
            return PartialGrid::new(3, 3);
        }
        let figure = &self.figures[self.next];
        self.next = (self.next + 1) % self.figures.len();
        build_piece(figure, &mut self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin() {
        let mut spawner = SpecificFiguresSpawner::new(owned_figures(&["x  /   /   ", " x /   /   "]));
        let patterns: Vec<String> = (0..4).map(|_| spawner.spawn_grid().to_pattern()).collect();
        assert_eq!(patterns, vec!["x        ", " x       ", "x        ", " x       "]);
    }

    #[test]
    fn test_default_is_square() {
        let mut spawner = SpecificFiguresSpawner::default();
        assert_eq!(spawner.spawn_grid().to_pattern(), "xx xx    ");
        assert_eq!(spawner.kind(), SpawnerKind::SpecificFigures);
    }
}
