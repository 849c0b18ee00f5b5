use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One tag per grid cell: `Wall` cells hold no game state, `Open` cells form
/// the playable set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Open,
}

impl CellKind {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Open
    }
}

/// The Wall/Open tagging that defines a board's shape. Immutable once built;
/// a [`GameEngine`] owns one for the lifetime of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMask {
    cells: Array2<CellKind>,
}

impl ShapeMask {
    pub fn from_cells(cells: Array2<CellKind>) -> Self {
        Self { cells }
    }

    /// Fully open rectangle, the mask behind classic rectangular presets.
    pub fn open((rows, cols): Coord2) -> Self {
        Self::from_cells(Array2::default([rows.into(), cols.into()]))
    }

    /// Parses the text form used by map files and tests: `'#'` for wall,
    /// `'.'` for open, one string per row, all rows the same length.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 || height > Coord::MAX.into() || width > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            if row.len() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for ch in row.chars() {
                cells.push(match ch {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Open,
                    _ => return Err(GameError::InvalidBoardShape),
                });
            }
        }

        let cells =
            Array2::from_shape_vec([height, width], cells).map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self::from_cells(cells))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    /// True only for in-grid coordinates tagged `Open`.
    pub fn is_open(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols && self.cells[coords.to_nd_index()].is_open()
    }

    pub fn playable_count(&self) -> CellCount {
        self.cells.iter().filter(|kind| kind.is_open()).count() as CellCount
    }

    /// All coordinates of the playable set, row-major.
    pub fn iter_open(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, kind)| kind.is_open())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// In-grid 8-neighbors of `coords` that belong to the playable set.
    pub fn open_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        neighbors(coords, self.size()).filter(|&pos| self.cells[pos.to_nd_index()].is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn open_mask_is_fully_playable() {
        let mask = ShapeMask::open((4, 3));
        assert_eq!(mask.size(), (4, 3));
        assert_eq!(mask.playable_count(), 12);
        assert!(mask.is_open((3, 2)));
        assert!(!mask.is_open((4, 0)));
    }

    #[test]
    fn from_rows_parses_walls_and_open_cells() {
        let mask = ShapeMask::from_rows(&["#.#", "...", "##."]).unwrap();
        assert_eq!(mask.playable_count(), 5);
        assert!(!mask.is_open((0, 0)));
        assert!(mask.is_open((0, 1)));
        assert!(mask.is_open((2, 2)));
    }

    #[test]
    fn from_rows_rejects_ragged_and_unknown_input() {
        assert_eq!(
            ShapeMask::from_rows(&["..", "..."]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            ShapeMask::from_rows(&["..", ".x"]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(ShapeMask::from_rows(&[]), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn open_neighbors_skips_walls() {
        let mask = ShapeMask::from_rows(&["#.", ".#"]).unwrap();
        let found: Vec<_> = mask.open_neighbors((0, 1)).collect();
        assert_eq!(found, [(1, 0)]);
    }
}
