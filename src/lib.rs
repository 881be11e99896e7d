//! Ray casting and ray marching over uniform 2D and 3D grids.
//!
//! Both queries walk the grid one cell boundary at a time (Amanatides & Woo).
//! The grid is read through [`Grid`], cell contents are judged by a
//! [`Passable`] predicate and the continuous position may be further limited
//! with a [`PositionFilter`].
//!
//! ```
//! use glam::Vec2;
//! use grid_dda::{Grid2d, MapInfo};
//!
//! let grid = Grid2d::filled(MapInfo::square(5, 1.0), true).unwrap();
//! let hit = grid.cast_ray(Vec2::new(0.5, 0.5), Vec2::Y, 10.0, |open: &bool| *open);
//! assert!(hit.hit);
//! assert_eq!(hit.distance, 4.5);
//! ```

pub mod grid;
pub mod raycast;
pub mod types;

pub use grid::{Grid, Grid2d, Grid3d};
pub use raycast::{
    AnyPosition, MarchSegment, MaxRange, OccupancyThreshold, Passable, PositionFilter,
    RayCastInfo, RayMarchInfo,
};
pub use types::{Blocker, GridError, MapInfo, TraversalError};
