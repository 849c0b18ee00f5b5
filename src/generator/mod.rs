use crate::*;
pub use cave::*;

mod cave;

/// Strategy that produces a board mask of the requested size. Generators make
/// no connectivity or minimum-open-count promise; callers that need a
/// playable board must validate and retry.
pub trait MaskGenerator {
    fn generate(self, size: Coord2) -> ShapeMask;
}
