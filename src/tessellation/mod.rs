mod ellipse_outline;

pub use ellipse_outline::{TessellateEllipse, ELLIPSE_OUTLINE_POINTS};

use crate::math::Point2;

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
}
