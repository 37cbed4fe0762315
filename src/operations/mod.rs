mod boundaries;
mod classify;
mod partition;

pub use boundaries::BuildBoundaries;
pub use classify::PointClassifier;
pub use partition::PartitionRegions;
