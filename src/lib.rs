#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use serde::{Deserialize, Serialize};

pub use ability::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use mask::*;
pub use tile::*;
pub use types::*;

mod ability;
mod engine;
mod error;
mod generator;
mod mask;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    pub const EXPERT: Self = Self::new_unchecked((30, 16), 99);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// The trivial rectangular mask behind classic presets: every cell open.
    pub fn open_mask(&self) -> ShapeMask {
        ShapeMask::open(self.size)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// A mine was hit but a revive use absorbed it.
    Revived,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_requests() {
        let config = GameConfig::new((0, 9), 500);
        assert_eq!(config.size, (1, 9));
        assert_eq!(config.mines, 9);
    }

    #[test]
    fn preset_masks_are_fully_open() {
        let mask = GameConfig::EXPERT.open_mask();
        assert_eq!(mask.size(), (30, 16));
        assert_eq!(
            mask.playable_count(),
            GameConfig::EXPERT.total_cells()
        );
    }

    #[test]
    fn mask_survives_a_wire_round_trip() {
        let mask = ShapeMask::from_rows(&["#.#", "...", ".#."]).unwrap();
        let json = serde_json::to_string(&mask).unwrap();
        let back: ShapeMask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mask);
    }
}
