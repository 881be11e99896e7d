use glam::{IVec3, UVec3, Vec3};

use crate::grid::Grid;
use crate::types::{GridError, MapInfo};

/// Rectangular-prism grid stored layer by layer (`(z * height + y) * width + x`).
#[derive(Debug, Clone)]
pub struct Grid3d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid3d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, GridError> {
        info.validate()?;

        let expected = info.len();
        if data.len() != expected {
            return Err(GridError::DataLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { info, data })
    }

    /// Build a volume from nested layers, indexed `layers[z][y][x]`.
    pub fn from_layers(
        layers: Vec<Vec<Vec<T>>>,
        resolution: f32,
        origin: Vec3,
    ) -> Result<Self, GridError> {
        let depth = layers.len();
        let height = layers.first().map_or(0, Vec::len);
        let width = layers
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, Vec::len);

        for (z, layer) in layers.iter().enumerate() {
            if layer.len() != height {
                return Err(GridError::Jagged(format!(
                    "layer {} has {} rows, expected {}",
                    z,
                    layer.len(),
                    height
                )));
            }
            if let Some((y, row)) = layer.iter().enumerate().find(|(_, row)| row.len() != width) {
                return Err(GridError::Jagged(format!(
                    "layer {} row {} has {} cells, expected {}",
                    z,
                    y,
                    row.len(),
                    width
                )));
            }
        }

        let info = MapInfo {
            width: width as u32,
            height: height as u32,
            depth: depth as u32,
            resolution,
            origin,
        };
        Self::new(info, layers.into_iter().flatten().flatten().collect())
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn depth(&self) -> u32 {
        self.info.depth
    }

    fn in_bounds(&self, pos: &UVec3) -> bool {
        pos.x < self.info.width && pos.y < self.info.height && pos.z < self.info.depth
    }

    pub fn get(&self, pos: &UVec3) -> Option<&T> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, pos: &UVec3, value: T) -> Result<(), GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(format!(
                "cell ({}, {}, {}) out of bounds for map {}x{}x{}",
                pos.x, pos.y, pos.z, self.info.width, self.info.height, self.info.depth
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    fn index(&self, pos: &UVec3) -> usize {
        let width = self.info.width as usize;
        let height = self.info.height as usize;
        ((pos.z as usize) * height + pos.y as usize) * width + pos.x as usize
    }

    pub fn map_to_world(&self, pos: &Vec3) -> Vec3 {
        self.info.origin + *pos * self.info.resolution
    }

    pub fn world_to_map(&self, pos: &Vec3) -> Option<Vec3> {
        let m = (*pos - self.info.origin) / self.info.resolution;
        if m.cmplt(Vec3::ZERO).any()
            || m.x >= self.info.width as f32
            || m.y >= self.info.height as f32
            || m.z >= self.info.depth as f32
        {
            return None;
        }
        Some(m)
    }

    /// Index of the cell containing `pos`. May lie outside the grid.
    pub fn cell_of(&self, pos: &Vec3) -> IVec3 {
        ((*pos - self.info.origin) / self.info.resolution)
            .floor()
            .as_ivec3()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> Grid3d<T> {
    pub fn filled(info: MapInfo, value: T) -> Result<Self, GridError> {
        let len = info.len();
        Self::new(info, vec![value; len])
    }
}

impl<T> Grid<3> for Grid3d<T> {
    type Cell = T;

    fn info(&self) -> &MapInfo {
        &self.info
    }

    fn extents(&self) -> [u32; 3] {
        [self.info.width, self.info.height, self.info.depth]
    }

    fn origin(&self) -> [f32; 3] {
        self.info.origin.to_array()
    }

    fn cell(&self, index: [i32; 3]) -> Option<&T> {
        if index.iter().any(|&i| i < 0) {
            return None;
        }
        let [x, y, z] = index;
        self.get(&UVec3::new(x as u32, y as u32, z as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_x_fastest() {
        let info = MapInfo {
            width: 2,
            height: 3,
            depth: 4,
            resolution: 1.0,
            origin: Vec3::ZERO,
        };
        let grid = Grid3d::new(info, (0..24).collect()).unwrap();
        assert_eq!(grid.get(&UVec3::new(1, 0, 0)), Some(&1));
        assert_eq!(grid.get(&UVec3::new(0, 1, 0)), Some(&2));
        assert_eq!(grid.get(&UVec3::new(0, 0, 1)), Some(&6));
        assert_eq!(grid.cell([1, 2, 3]), Some(&23));
        assert_eq!(grid.cell([0, 0, 4]), None);
        assert_eq!(grid.cell([0, -1, 0]), None);
    }

    #[test]
    fn from_layers_matches_nested_indexing() {
        let layers = vec![
            vec![vec!['a', 'b'], vec!['c', 'd']],
            vec![vec!['e', 'f'], vec!['g', 'h']],
        ];
        let grid = Grid3d::from_layers(layers, 1.0, Vec3::ZERO).unwrap();
        assert_eq!(grid.get(&UVec3::new(1, 0, 1)), Some(&'f'));
        assert_eq!(grid.get(&UVec3::new(0, 1, 0)), Some(&'c'));
    }

    #[test]
    fn from_layers_rejects_jagged_input() {
        let layers = vec![vec![vec![0; 2]; 2], vec![vec![0; 2], vec![0; 3]]];
        assert!(matches!(
            Grid3d::from_layers(layers, 1.0, Vec3::ZERO),
            Err(GridError::Jagged(_))
        ));

        let layers = vec![vec![vec![0; 2]; 2], vec![vec![0; 2]]];
        assert!(matches!(
            Grid3d::from_layers(layers, 1.0, Vec3::ZERO),
            Err(GridError::Jagged(_))
        ));
    }

    #[test]
    fn world_map_conversions() {
        let grid = Grid3d::filled(MapInfo::cube(4, 0.25).with_origin(Vec3::splat(1.0)), 0u8).unwrap();
        let m = grid.world_to_map(&Vec3::new(1.5, 1.125, 1.99)).expect("inside");
        assert_eq!(grid.map_to_world(&m), Vec3::new(1.5, 1.125, 1.99));
        assert_eq!(grid.cell_of(&Vec3::new(1.5, 1.125, 0.9)), IVec3::new(2, 0, -1));
        assert!(grid.world_to_map(&Vec3::new(0.9, 1.5, 1.5)).is_none());
        assert!(grid.world_to_map(&Vec3::new(1.5, 1.5, 2.0)).is_none());
    }
}
