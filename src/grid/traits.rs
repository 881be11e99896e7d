use crate::types::MapInfo;

/// Read-only view over a uniform grid with `D` axes.
///
/// Indices are signed so a traversal can ask about the cell it just stepped
/// into even when that cell lies past the grid edge; `cell` answers `None`
/// for anything outside the extents.
pub trait Grid<const D: usize> {
    type Cell;

    fn info(&self) -> &MapInfo;

    /// Cell extents along each axis.
    fn extents(&self) -> [u32; D];

    /// World position of the corner of cell zero.
    fn origin(&self) -> [f32; D];

    /// Get the cell with bounds checking.
    fn cell(&self, index: [i32; D]) -> Option<&Self::Cell>;

    fn resolution(&self) -> f32 {
        self.info().resolution
    }

    fn contains(&self, index: [i32; D]) -> bool {
        index
            .iter()
            .zip(self.extents())
            .all(|(&i, extent)| i >= 0 && (i as u32) < extent)
    }
}
