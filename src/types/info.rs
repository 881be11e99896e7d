//! Map metadata.

use glam::{Vec2, Vec3};

use crate::types::GridError;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    /// Number of z layers. 2D grids use a depth of 1.
    #[cfg_attr(feature = "serde", serde(default = "default_depth"))]
    pub depth: u32,
    /// Edge length of one cell in world units, shared by every axis.
    pub resolution: f32,
    /// Origin of cell (0, 0, 0) in world coordinates. 2D grids only use `xy`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Vec3,
}

#[cfg(feature = "serde")]
fn default_depth() -> u32 {
    1
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            depth: 1,
            resolution: 0.05,
            origin: Vec3::ZERO,
        }
    }
}

impl MapInfo {
    pub fn square(width: u32, resolution: f32) -> Self {
        Self {
            width,
            height: width,
            resolution,
            ..Default::default()
        }
    }

    pub fn cube(width: u32, resolution: f32) -> Self {
        Self {
            width,
            height: width,
            depth: width,
            resolution,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Check the invariants every grid relies on: non-empty extents, a finite
    /// origin and a strictly positive, finite resolution.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(GridError::InvalidMetadata(format!(
                "resolution must be positive and finite, got {}",
                self.resolution
            )));
        }
        if !self.origin.is_finite() {
            return Err(GridError::InvalidMetadata(format!(
                "origin must be finite, got {}",
                self.origin
            )));
        }
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(GridError::InvalidMetadata(format!(
                "map extents must be non-zero, got {}x{}x{}",
                self.width, self.height, self.depth
            )));
        }
        Ok(())
    }

    /// Number of cells described by the extents.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.depth as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the map in world units.
    #[inline]
    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.resolution
    }

    /// Height of the map in world units.
    #[inline]
    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.resolution
    }

    /// Depth of the map in world units.
    #[inline]
    pub fn world_depth(&self) -> f32 {
        self.depth as f32 * self.resolution
    }

    /// Center of the map in 2D world coordinates.
    #[inline]
    pub fn world_center(&self) -> Vec2 {
        self.origin.truncate() + Vec2::new(0.5 * self.world_width(), 0.5 * self.world_height())
    }

    /// Center of the volume in 3D world coordinates.
    #[inline]
    pub fn world_center_3d(&self) -> Vec3 {
        self.origin
            + 0.5 * Vec3::new(self.world_width(), self.world_height(), self.world_depth())
    }
}
