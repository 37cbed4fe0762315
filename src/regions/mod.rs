mod boundary;
mod class;

pub use boundary::{BoundaryRay, BoundarySet, RegionBoundary, BOUNDARY_COUNT};
pub use class::{AvoClass, ClassRegion, MAX_REGION_VERTICES, REGION_COUNT};
