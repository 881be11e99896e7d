use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("data length {actual} does not match map size {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("jagged input: {0}")]
    Jagged(String),
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}

/// Reason a ray stopped at a cell boundary, or was refused at its origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Blocker {
    /// The cell lies outside the grid. Grid edges behave like walls.
    OutOfBounds,
    /// The cell predicate rejected the cell contents.
    Impassable,
    /// The position predicate rejected the continuous position.
    PositionRejected,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::OutOfBounds => f.write_str("cell is outside the grid"),
            Blocker::Impassable => f.write_str("cell is not passable"),
            Blocker::PositionRejected => f.write_str("position is not allowed"),
        }
    }
}

/// Inputs a traversal refuses to walk. Both are recoverable: the plain
/// `cast_ray`/`march_ray` forms log them and return an empty result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("ray direction has zero length")]
    DegenerateDirection,
    #[error("ray origin is invalid: {0}")]
    InvalidOrigin(Blocker),
}
