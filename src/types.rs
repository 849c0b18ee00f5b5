/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row/col displacements of the 8-neighborhood, diagonals included.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the in-bounds 8-neighbors of `center` on a `bounds.0 × bounds.1` grid.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.iter().filter_map(move |&delta| {
        let row = center.0.checked_add_signed(delta.0)?;
        let col = center.1.checked_add_signed(delta.1)?;
        (row < bounds.0 && col < bounds.1).then_some((row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let found: Vec<_> = neighbors((0, 0), (3, 3)).collect();
        assert_eq!(found, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(neighbors((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }
}
