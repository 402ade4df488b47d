//! Cell Payloads
//!
//! A grid cell holds a small `Copy` payload. The payload's `Default` value is
//! the empty sentinel; anything else counts as filled.

use serde::{Deserialize, Serialize};

use crate::world::GridPosition;

/// Payload that can be stored in a `PartialGrid`.
pub trait CellData: Copy + Default + PartialEq {
    /// Whether this value marks a filled cell.
    fn is_filled(&self) -> bool {
        *self != Self::default()
    }
}

impl<T: Copy + Default + PartialEq> CellData for T {}

/// A filled cell at an absolute grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<T> {
    pub pos: GridPosition,
    pub value: T,
}

/// Block color. `Empty` is the unfilled sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellColor {
    #[default]
    Empty,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
    Cyan,
    Purple,
}

impl CellColor {
    /// Every non-empty color, in palette order.
    pub const ALL: [CellColor; 7] = [
        CellColor::Red,
        CellColor::Green,
        CellColor::Yellow,
        CellColor::Orange,
        CellColor::Blue,
        CellColor::Cyan,
        CellColor::Purple,
    ];

    /// RGB color for display.
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            CellColor::Empty => [0.0, 0.0, 0.0],
            CellColor::Red => [0.9, 0.2, 0.2],
            CellColor::Green => [0.2, 0.8, 0.3],
            CellColor::Yellow => [0.95, 0.85, 0.2],
            CellColor::Orange => [0.95, 0.55, 0.15],
            CellColor::Blue => [0.2, 0.35, 0.9],
            CellColor::Cyan => [0.2, 0.85, 0.9],
            CellColor::Purple => [0.6, 0.25, 0.8],
        }
    }

    /// Single-character tag for text dumps.
    pub fn symbol(&self) -> char {
        match self {
            CellColor::Empty => '.',
            CellColor::Red => 'R',
            CellColor::Green => 'G',
            CellColor::Yellow => 'Y',
            CellColor::Orange => 'O',
            CellColor::Blue => 'B',
            CellColor::Cyan => 'C',
            CellColor::Purple => 'P',
        }
    }
}

/// Walks the color palette, wrapping around.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    index: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current color, then advance.
    pub fn next_color(&mut self) -> CellColor {
        let color = CellColor::ALL[self.index];
        self.index = (self.index + 1) % CellColor::ALL.len();
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_filled() {
        assert!(!CellColor::Empty.is_filled());
        assert!(CellColor::ALL.iter().all(|c| c.is_filled()));
        assert!(!0u8.is_filled());
        assert!(3u8.is_filled());
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        assert_eq!(CellColor::Empty.rgb(), [0.0, 0.0, 0.0]);
        let colors: Vec<[f32; 3]> = CellColor::ALL.iter().map(CellColor::rgb).collect();
        for (i, a) in colors.iter().enumerate() {
            assert_ne!(*a, CellColor::Empty.rgb());
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn test_color_cycle_wraps() {
        let mut cycle = ColorCycle::new();
        let first: Vec<_> = (0..7).map(|_| cycle.next_color()).collect();
        assert_eq!(first, CellColor::ALL.to_vec());
        assert_eq!(cycle.next_color(), CellColor::Red);
    }
}
