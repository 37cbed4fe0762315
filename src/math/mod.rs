pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Reflects `point` through `center` (180° point rotation): `2c - p`.
#[must_use]
pub fn reflect_through(point: &Point2, center: &Point2) -> Point2 {
    Point2::new(2.0 * center.x - point.x, 2.0 * center.y - point.y)
}

/// Rotation terms `(cos, sin)` of the angle whose tangent is `slope`.
#[must_use]
pub fn slope_rotation(slope: f64) -> (f64, f64) {
    let cos = 1.0 / (1.0 + slope * slope).sqrt();
    (cos, cos * slope)
}
