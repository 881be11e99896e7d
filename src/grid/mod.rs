pub mod grid2d;
pub mod grid3d;
pub mod traits;

pub use grid2d::Grid2d;
pub use grid3d::Grid3d;
pub use traits::Grid;
