use glam::{IVec3, Vec3};

use crate::grid::Grid3d;
use crate::raycast::cast::cast;
use crate::raycast::march::march;
use crate::raycast::{AnyPosition, Passable, PositionFilter, RayCastInfo, RayMarchInfo, report};
use crate::types::TraversalError;

impl<T> Grid3d<T> {
    /// Fast voxel traversal through the volume, stopping at the first
    /// boundary whose far side is not passable. Leaving the volume counts as a hit.
    pub fn cast_ray<P>(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        passable: P,
    ) -> RayCastInfo<IVec3>
    where
        P: Passable<T>,
    {
        self.cast_ray_filtered(start, direction, max_distance, passable, AnyPosition)
    }

    /// [`Grid3d::cast_ray`] that also stops where `filter` rejects the position
    /// reached at a boundary.
    pub fn cast_ray_filtered<P, F>(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> RayCastInfo<IVec3>
    where
        P: Passable<T>,
        F: PositionFilter<Vec3>,
    {
        self.try_cast_ray(start, direction, max_distance, passable, filter)
            .unwrap_or_else(|err| {
                report(&err, start);
                RayCastInfo::default()
            })
    }

    /// Same as [`Grid3d::cast_ray_filtered`] but returns the refusal reason as an `Err`.
    pub fn try_cast_ray<P, F>(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> Result<RayCastInfo<IVec3>, TraversalError>
    where
        P: Passable<T>,
        F: PositionFilter<Vec3>,
    {
        cast(
            self,
            start.to_array(),
            direction.to_array(),
            max_distance,
            passable,
            |p: [f32; 3]| filter.allows(Vec3::from_array(p)),
        )
        .map(|info| info.map_cell(IVec3::from_array))
    }

    /// Per-voxel path lengths along the ray, e.g. for integrating a density
    /// field. Stops under the same conditions as [`Grid3d::cast_ray`].
    pub fn march_ray<P>(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        passable: P,
    ) -> RayMarchInfo<IVec3>
    where
        P: Passable<T>,
    {
        self.march_ray_filtered(start, direction, max_distance, passable, AnyPosition)
    }

    /// [`Grid3d::march_ray`] that also stops where `filter` rejects the position
    /// reached at a boundary.
    pub fn march_ray_filtered<P, F>(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> RayMarchInfo<IVec3>
    where
        P: Passable<T>,
        F: PositionFilter<Vec3>,
    {
        self.try_march_ray(start, direction, max_distance, passable, filter)
            .unwrap_or_else(|err| {
                report(&err, start);
                RayMarchInfo::default()
            })
    }

    /// Same as [`Grid3d::march_ray_filtered`] but returns the refusal reason as an `Err`.
    pub fn try_march_ray<P, F>(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        passable: P,
        filter: F,
    ) -> Result<RayMarchInfo<IVec3>, TraversalError>
    where
        P: Passable<T>,
        F: PositionFilter<Vec3>,
    {
        march(
            self,
            start.to_array(),
            direction.to_array(),
            max_distance,
            passable,
            |p: [f32; 3]| filter.allows(Vec3::from_array(p)),
        )
        .map(|info| info.map_cells(IVec3::from_array))
    }
}
