use crate::grid::Grid;
use crate::raycast::walker::{Stop, Walker};
use crate::raycast::{MarchSegment, Passable, RayMarchInfo};
use crate::types::TraversalError;

/// Walk like [`cast`](super::cast::cast) but record the length spent in every
/// cell left behind. Zero-length crossings are not recorded.
pub(crate) fn march<G, P, F, const D: usize>(
    grid: &G,
    start: [f32; D],
    direction: [f32; D],
    max_distance: f32,
    passable: P,
    position_allowed: F,
) -> Result<RayMarchInfo<[i32; D]>, TraversalError>
where
    G: Grid<D>,
    P: Passable<G::Cell>,
    F: Fn([f32; D]) -> bool,
{
    let mut walker = Walker::new(grid, start, direction, max_distance, passable, position_allowed)?;
    let mut segments = Vec::new();

    loop {
        let crossing = walker.advance();
        if crossing.length > 0.0 {
            segments.push(MarchSegment {
                cell: crossing.left,
                length: crossing.length,
            });
        }
        if crossing.stop != Stop::Continue {
            return Ok(RayMarchInfo {
                segments,
                total_length: crossing.distance,
            });
        }
    }
}
