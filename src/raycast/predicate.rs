//! Capabilities a traversal consults while walking: one over cell contents,
//! one over the continuous position at each boundary crossing.

use glam::{Vec2, Vec3};

use crate::types::OCCUPIED;

/// Decides whether a ray may enter a cell.
///
/// Implemented for any `Fn(&T) -> bool`, so closures work directly:
///
/// ```
/// use grid_dda::raycast::Passable;
///
/// let open = |cell: &bool| *cell;
/// assert!(open.passable(&true));
/// ```
pub trait Passable<T: ?Sized> {
    fn passable(&self, cell: &T) -> bool;
}

impl<T: ?Sized, F> Passable<T> for F
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn passable(&self, cell: &T) -> bool {
        self(cell)
    }
}

/// Decides whether a ray may occupy a world position, independent of the
/// cell it lies in.
pub trait PositionFilter<P> {
    fn allows(&self, position: P) -> bool;
}

impl<P, F> PositionFilter<P> for F
where
    F: Fn(P) -> bool,
{
    #[inline]
    fn allows(&self, position: P) -> bool {
        self(position)
    }
}

/// Position filter that accepts everything.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AnyPosition;

impl<P> PositionFilter<P> for AnyPosition {
    #[inline]
    fn allows(&self, _position: P) -> bool {
        true
    }
}

/// Accepts positions within `radius` of `center` (a range dome layered on
/// top of the grid).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaxRange<P> {
    pub center: P,
    pub radius: f32,
}

impl<P> MaxRange<P> {
    pub fn new(center: P, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl PositionFilter<Vec2> for MaxRange<Vec2> {
    #[inline]
    fn allows(&self, position: Vec2) -> bool {
        position.distance_squared(self.center) <= self.radius * self.radius
    }
}

impl PositionFilter<Vec3> for MaxRange<Vec3> {
    #[inline]
    fn allows(&self, position: Vec3) -> bool {
        position.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Occupancy cells (`i8`) are passable below the threshold. Unknown cells
/// (negative values) count as passable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OccupancyThreshold(pub i8);

impl Default for OccupancyThreshold {
    fn default() -> Self {
        Self(OCCUPIED)
    }
}

impl Passable<i8> for OccupancyThreshold {
    #[inline]
    fn passable(&self, cell: &i8) -> bool {
        *cell < self.0
    }
}
