use super::{Point2, TOLERANCE};

/// Z component of `(b - a) x (c - a)`.
///
/// Positive when `a -> b -> c` turns counter-clockwise.
#[must_use]
pub fn cross_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns whether the point lies on the left of, or on, every segment of
/// an open polyline.
///
/// Only the listed segments are tested; the path is not closed.
#[must_use]
pub fn left_of_path(point: &Point2, path: &[Point2]) -> bool {
    path.len() >= 2
        && path
            .windows(2)
            .all(|segment| cross_2d(point, &segment[0], &segment[1]) >= 0.0)
}

/// Returns the index of the first vertex where a closed polygon turns
/// clockwise, or `None` if every consecutive triple turns counter-clockwise
/// or is collinear.
#[must_use]
pub fn first_reflex_vertex(polygon: &[Point2]) -> Option<usize> {
    let n = polygon.len();
    (0..n).find(|&i| {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        let c = &polygon[(i + 2) % n];
        cross_2d(a, b, c) < -TOLERANCE
    })
}
