use glam::{IVec2, Vec2};

use crate::grid::Grid2d;
use crate::raycast::cast::cast;
use crate::raycast::march::march;
use crate::raycast::{AnyPosition, Passable, PositionFilter, RayCastInfo, RayMarchInfo, report};
use crate::types::TraversalError;

impl<T> Grid2d<T> {
    /// Fast voxel traversal (Amanatides & Woo) that stops at the first cell
    /// boundary whose far side is not passable. The grid edge counts as a wall.
    ///
    /// Invalid input (zero direction, blocked or out-of-bounds start) is
    /// logged and answered with an empty miss; use [`Grid2d::try_cast_ray`]
    /// to get the reason as a value.
    pub fn cast_ray<P>(
        &self,
        start: Vec2,
        direction: Vec2,
        max_distance: f32,
        passable: P,
    ) -> RayCastInfo<IVec2>
    where
        P: Passable<T>,
    {
        self.cast_ray_filtered(start, direction, max_distance, passable, AnyPosition)
    }

    /// [`Grid2d::cast_ray`] that also stops where `filter` rejects the position
    /// reached at a boundary.
    pub fn cast_ray_filtered<P, F>(
        &self,
        start: Vec2,
        direction: Vec2,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> RayCastInfo<IVec2>
    where
        P: Passable<T>,
        F: PositionFilter<Vec2>,
    {
        self.try_cast_ray(start, direction, max_distance, passable, filter)
            .unwrap_or_else(|err| {
                report(&err, start);
                RayCastInfo::default()
            })
    }

    /// Same as [`Grid2d::cast_ray_filtered`] but returns the refusal reason as an `Err`.
    pub fn try_cast_ray<P, F>(
        &self,
        start: Vec2,
        direction: Vec2,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> Result<RayCastInfo<IVec2>, TraversalError>
    where
        P: Passable<T>,
        F: PositionFilter<Vec2>,
    {
        cast(
            self,
            start.to_array(),
            direction.to_array(),
            max_distance,
            passable,
            |p: [f32; 2]| filter.allows(Vec2::from_array(p)),
        )
        .map(|info| info.map_cell(IVec2::from_array))
    }

    /// Walk the same way as [`Grid2d::cast_ray`] and record how far the ray
    /// travelled inside every cell it passed through.
    pub fn march_ray<P>(
        &self,
        start: Vec2,
        direction: Vec2,
        max_distance: f32,
        passable: P,
    ) -> RayMarchInfo<IVec2>
    where
        P: Passable<T>,
    {
        self.march_ray_filtered(start, direction, max_distance, passable, AnyPosition)
    }

    /// [`Grid2d::march_ray`] that also stops where `filter` rejects the position
    /// reached at a boundary.
    pub fn march_ray_filtered<P, F>(
        &self,
        start: Vec2,
        direction: Vec2,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> RayMarchInfo<IVec2>
    where
        P: Passable<T>,
        F: PositionFilter<Vec2>,
    {
        self.try_march_ray(start, direction, max_distance, passable, filter)
            .unwrap_or_else(|err| {
                report(&err, start);
                RayMarchInfo::default()
            })
    }

    /// Same as [`Grid2d::march_ray_filtered`] but returns the refusal reason as an `Err`.
    pub fn try_march_ray<P, F>(
        &self,
        start: Vec2,
        direction: Vec2,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> Result<RayMarchInfo<IVec2>, TraversalError>
    where
        P: Passable<T>,
        F: PositionFilter<Vec2>,
    {
        march(
            self,
            start.to_array(),
            direction.to_array(),
            max_distance,
            passable,
            |p: [f32; 2]| filter.allows(Vec2::from_array(p)),
        )
        .map(|info| info.map_cells(IVec2::from_array))
    }
}
