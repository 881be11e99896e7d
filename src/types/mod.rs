pub mod constants;
pub mod error;
pub mod info;

pub use constants::*;
pub use error::{Blocker, GridError, TraversalError};
pub use info::MapInfo;
