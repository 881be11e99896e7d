use glam::{IVec2, UVec2, Vec2};

use crate::grid::Grid;
use crate::types::{GridError, MapInfo};

/// Rectangular grid of cells stored row-major (`y * width + x`).
#[derive(Debug, Clone)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, GridError> {
        let info = MapInfo { depth: 1, ..info };
        info.validate()?;

        let expected = (info.width as usize) * (info.height as usize);
        if data.len() != expected {
            return Err(GridError::DataLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { info, data })
    }

    /// Build a grid from nested rows, indexed `rows[y][x]`.
    pub fn from_rows(rows: Vec<Vec<T>>, resolution: f32, origin: Vec2) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(GridError::Jagged(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }

        let info = MapInfo {
            width: width as u32,
            height: height as u32,
            depth: 1,
            resolution,
            origin: origin.extend(0.0),
        };
        Self::new(info, rows.into_iter().flatten().collect())
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

    pub fn get(&self, pos: &UVec2) -> Option<&T> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, pos: &UVec2, value: T) -> Result<(), GridError> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return Err(GridError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for map {}x{}",
                pos.x, pos.y, self.info.width, self.info.height
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    fn index(&self, pos: &UVec2) -> usize {
        (pos.y as usize) * (self.info.width as usize) + (pos.x as usize)
    }

    /// Continuous map coordinates back to world coordinates.
    pub fn map_to_world(&self, pos: &Vec2) -> Vec2 {
        self.info.origin.truncate() + *pos * self.info.resolution
    }

    /// World coordinates to continuous map coordinates, `None` outside the grid.
    pub fn world_to_map(&self, pos: &Vec2) -> Option<Vec2> {
        let m = (*pos - self.info.origin.truncate()) / self.info.resolution;
        if m.x < 0.0 || m.y < 0.0 || m.x >= self.info.width as f32 || m.y >= self.info.height as f32 {
            return None;
        }
        Some(m)
    }

    /// Index of the cell containing `pos`. May lie outside the grid.
    pub fn cell_of(&self, pos: &Vec2) -> IVec2 {
        ((*pos - self.info.origin.truncate()) / self.info.resolution)
            .floor()
            .as_ivec2()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> Grid2d<T> {
    pub fn filled(info: MapInfo, value: T) -> Result<Self, GridError> {
        let len = (info.width as usize) * (info.height as usize);
        Self::new(info, vec![value; len])
    }
}

impl<T> Grid<2> for Grid2d<T> {
    type Cell = T;

    fn info(&self) -> &MapInfo {
        &self.info
    }

    fn extents(&self) -> [u32; 2] {
        [self.info.width, self.info.height]
    }

    fn origin(&self) -> [f32; 2] {
        self.info.origin.truncate().to_array()
    }

    fn cell(&self, index: [i32; 2]) -> Option<&T> {
        let [x, y] = index;
        if x < 0 || y < 0 {
            return None;
        }
        self.get(&UVec2::new(x as u32, y as u32))
    }
}
