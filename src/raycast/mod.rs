use std::fmt;

use tracing::{error, warn};

use crate::types::{Blocker, TraversalError};

mod cast;
pub mod dda2d;
pub mod dda3d;
mod march;
pub mod predicate;
mod walker;

pub use predicate::{AnyPosition, MaxRange, OccupancyThreshold, Passable, PositionFilter};

/// Result of casting a ray until it hits something.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayCastInfo<C> {
    /// True when the ray stopped at a blocking boundary before running out of distance.
    pub hit: bool,
    /// Path length from the start to the blocking boundary, or the distance
    /// travelled on a miss (world units).
    pub distance: f32,
    /// Cell entered at the blocking boundary. It may lie outside the grid.
    pub cell: Option<C>,
    pub blocker: Option<Blocker>,
}

impl<C> RayCastInfo<C> {
    pub fn miss(distance: f32) -> Self {
        Self {
            hit: false,
            distance,
            cell: None,
            blocker: None,
        }
    }

    pub fn hit(distance: f32, cell: C, blocker: Blocker) -> Self {
        Self {
            hit: true,
            distance,
            cell: Some(cell),
            blocker: Some(blocker),
        }
    }

    /// Hit distance, or `default` on a miss.
    pub fn distance_or(&self, default: f32) -> f32 {
        if self.hit { self.distance } else { default }
    }

    pub fn map_cell<U>(self, f: impl FnOnce(C) -> U) -> RayCastInfo<U> {
        RayCastInfo {
            hit: self.hit,
            distance: self.distance,
            cell: self.cell.map(f),
            blocker: self.blocker,
        }
    }
}

impl<C> Default for RayCastInfo<C> {
    fn default() -> Self {
        Self::miss(0.0)
    }
}

/// Path length a marched ray spent inside one cell.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarchSegment<C> {
    pub cell: C,
    pub length: f32,
}

/// Result of marching a ray: every cell it passed through, in travel order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayMarchInfo<C> {
    pub segments: Vec<MarchSegment<C>>,
    pub total_length: f32,
}

impl<C> RayMarchInfo<C> {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &C> + '_ {
        self.segments.iter().map(|s| &s.cell)
    }

    /// Length travelled inside `cell`, zero if the ray never entered it.
    pub fn length_in(&self, cell: &C) -> f32
    where
        C: PartialEq,
    {
        self.segments
            .iter()
            .filter(|s| &s.cell == cell)
            .map(|s| s.length)
            .sum()
    }

    pub fn map_cells<U>(self, mut f: impl FnMut(C) -> U) -> RayMarchInfo<U> {
        RayMarchInfo {
            segments: self
                .segments
                .into_iter()
                .map(|s| MarchSegment {
                    cell: f(s.cell),
                    length: s.length,
                })
                .collect(),
            total_length: self.total_length,
        }
    }
}

impl<C> Default for RayMarchInfo<C> {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            total_length: 0.0,
        }
    }
}

/// Emit the advisory diagnostic for a refused ray.
fn report(err: &TraversalError, start: impl fmt::Debug) {
    match err {
        TraversalError::DegenerateDirection => warn!(?start, "{err}"),
        TraversalError::InvalidOrigin(_) => error!(?start, "{err}"),
    }
}
