mod bounds;
mod ellipse;

pub use bounds::{BoxEdge, Bounds};
pub use ellipse::{Ellipse, EllipseKind};
