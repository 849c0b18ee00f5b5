use ndarray::Array2;

use super::*;

/// Cave-shape generator: random noise smoothed by a cellular automaton into
/// irregular cavern-like open regions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CaveGenerator {
    seed: u64,
    fill_prob: f64,
    smooth_iters: u32,
}

impl CaveGenerator {
    /// `fill_prob` is the chance a cell starts as wall; `smooth_iters` is the
    /// number of automaton passes run over the noise.
    pub fn new(seed: u64, fill_prob: f64, smooth_iters: u32) -> Self {
        Self {
            seed,
            fill_prob,
            smooth_iters,
        }
    }
}

impl Default for CaveGenerator {
    fn default() -> Self {
        Self::new(0, 0.45, 3)
    }
}

impl MaskGenerator for CaveGenerator {
    fn generate(self, size: Coord2) -> ShapeMask {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let dim = [usize::from(size.0), usize::from(size.1)];

        // Seeding the noise is the only randomized step; smoothing is fully
        // determined by it.
        let mut grid = Array2::from_shape_simple_fn(dim, || {
            if rng.random::<f64>() < self.fill_prob {
                CellKind::Wall
            } else {
                CellKind::Open
            }
        });

        for _ in 0..self.smooth_iters {
            grid = smooth(&grid, size);
        }

        if !grid.iter().any(|kind| kind.is_open()) {
            log::warn!("cave generation left no open cells, seed {}", self.seed);
        }
        ShapeMask::from_cells(grid)
    }
}

/// One automaton pass. Reads only `prev`, so mid-pass updates never leak into
/// the neighbor counts of the same pass.
fn smooth(prev: &Array2<CellKind>, bounds: Coord2) -> Array2<CellKind> {
    Array2::from_shape_fn(prev.raw_dim(), |(row, col)| {
        let center = (row as Coord, col as Coord);
        let in_grid = neighbors(center, bounds).count();
        let walls = neighbors(center, bounds)
            .filter(|&pos| prev[pos.to_nd_index()] == CellKind::Wall)
            .count();

        // Off-grid neighbors count as walls, which biases the border closed.
        if walls + (8 - in_grid) >= 5 {
            CellKind::Wall
        } else {
            CellKind::Open
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_the_same_mask() {
        let first = CaveGenerator::new(42, 0.45, 3).generate((20, 30));
        let second = CaveGenerator::new(42, 0.45, 3).generate((20, 30));
        assert_eq!(first, second);
        assert_eq!(first.size(), (20, 30));
    }

    #[test]
    fn extreme_fill_probabilities_saturate_the_grid() {
        let walls = CaveGenerator::new(7, 1.0, 0).generate((5, 5));
        assert_eq!(walls.playable_count(), 0);

        let open = CaveGenerator::new(7, 0.0, 0).generate((5, 5));
        assert_eq!(open.playable_count(), 25);
    }

    #[test]
    fn off_grid_neighbors_count_as_walls() {
        // A lone open cell has all 8 neighbors off-grid, so one smoothing
        // pass must close it.
        let mask = CaveGenerator::new(0, 0.0, 1).generate((1, 1));
        assert_eq!(mask.playable_count(), 0);
    }

    #[test]
    fn smoothing_keeps_a_sheltered_interior_open() {
        // 5x5, all open: interior cells see zero walls and only border cells
        // pick up the off-grid bias (corners see 5 off-grid walls).
        let mask = CaveGenerator::new(0, 0.0, 1).generate((5, 5));
        assert!(mask.is_open((2, 2)));
        assert!(!mask.is_open((0, 0)));
        assert!(mask.is_open((0, 2)));
    }
}
