/// Notification sent to model subscribers after a committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    /// Background or maximum ellipse parameters changed.
    EllipsesUpdated,
    /// One or more boundary rays changed.
    RegionBoundariesUpdated,
    /// The symmetric-regions flag changed.
    RegionSymmetryUpdated,
    /// A new classifier replaced the previous one.
    ClassifierRebuilt,
}
