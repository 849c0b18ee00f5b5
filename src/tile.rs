use serde::{Deserialize, Serialize};

/// What a playable cell holds underneath: a mine, or the count of adjacent
/// mines in the 8-neighborhood.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Clear(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Clear(0))
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// Player-visible projection of one playable cell, the only per-cell view a
/// driver should render from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine whose reveal ended the game.
    Detonated,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
