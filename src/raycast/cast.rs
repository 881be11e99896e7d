use crate::grid::Grid;
use crate::raycast::walker::{Stop, Walker};
use crate::raycast::{Passable, RayCastInfo};
use crate::types::TraversalError;

/// Walk until the first blocking boundary or until `max_distance` runs out.
pub(crate) fn cast<G, P, F, const D: usize>(
    grid: &G,
    start: [f32; D],
    direction: [f32; D],
    max_distance: f32,
    passable: P,
    position_allowed: F,
) -> Result<RayCastInfo<[i32; D]>, TraversalError>
where
    G: Grid<D>,
    P: Passable<G::Cell>,
    F: Fn([f32; D]) -> bool,
{
    let mut walker = Walker::new(grid, start, direction, max_distance, passable, position_allowed)?;

    loop {
        let crossing = walker.advance();
        match crossing.stop {
            Stop::Continue => {}
            Stop::Blocked(blocker) => {
                return Ok(RayCastInfo::hit(crossing.distance, crossing.entered, blocker));
            }
            Stop::Exhausted => return Ok(RayCastInfo::miss(crossing.distance)),
        }
    }
}
