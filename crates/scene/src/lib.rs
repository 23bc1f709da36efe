pub mod geometry;
pub mod picking;
pub mod registry;

pub use geometry::*;
pub use registry::*;
