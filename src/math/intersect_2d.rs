use super::{Point2, Vector2, TOLERANCE};
use crate::geometry::Ellipse;

/// Intersection of the line `point + t * direction` with an ellipse.
///
/// The line is solved in the centered, axis-aligned frame of the ellipse.
/// Of the two crossings, the one nearer to `point` (smaller `|t|`) is
/// returned in world coordinates.
///
/// Returns `None` if the line misses or only touches the ellipse, or if
/// `direction` is zero.
#[must_use]
pub fn line_ellipse_intersect_2d(
    point: &Point2,
    direction: &Vector2,
    ellipse: &Ellipse,
) -> Option<Point2> {
    let dir_len = direction.norm();
    if dir_len < TOLERANCE {
        return None;
    }
    let origin = ellipse.to_local(point);
    let dir = ellipse.to_local_direction(&(direction / dir_len));

    let a2 = ellipse.length() * ellipse.length();
    let b2 = ellipse.width() * ellipse.width();

    // Substitute the parametric line into x^2/a^2 + y^2/b^2 = 1, scaled by a^2 b^2.
    let qa = b2 * dir.x * dir.x + a2 * dir.y * dir.y;
    let qb = 2.0 * (b2 * origin.x * dir.x + a2 * origin.y * dir.y);
    let qc = b2 * origin.x * origin.x + a2 * origin.y * origin.y - a2 * b2;

    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant <= 0.0 || !discriminant.is_finite() {
        return None;
    }
    let disc_sqrt = discriminant.sqrt();
    let t1 = (-qb + disc_sqrt) / (2.0 * qa);
    let t2 = (-qb - disc_sqrt) / (2.0 * qa);
    let t = if t1.abs() <= t2.abs() { t1 } else { t2 };

    Some(ellipse.to_world(&(origin + dir * t)))
}
