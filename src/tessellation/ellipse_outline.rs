use crate::error::{Result, TessellationError};
use crate::geometry::Ellipse;
use crate::math::Point2;

use super::Polyline;

/// Number of outline points handed to the renderer.
pub const ELLIPSE_OUTLINE_POINTS: usize = 60;

/// Floor on the length/width ratio used to bias the angle steps.
const MIN_BIAS_RATIO: f64 = 1.01;

/// Samples a closed outline of an ellipse for display.
///
/// Angle steps are biased per quadrant: they grow away from the major axis
/// and shrink toward it, so that points on eccentric ellipses look evenly
/// spread once drawn. Each quadrant spans exactly 90°.
#[derive(Debug)]
pub struct TessellateEllipse<'a> {
    ellipse: &'a Ellipse,
    count: usize,
}

impl<'a> TessellateEllipse<'a> {
    /// Creates a new outline operation with the given point count.
    #[must_use]
    pub fn new(ellipse: &'a Ellipse, count: usize) -> Self {
        Self { ellipse, count }
    }

    /// Creates an outline operation with [`ELLIPSE_OUTLINE_POINTS`] points.
    #[must_use]
    pub fn with_default_count(ellipse: &'a Ellipse) -> Self {
        Self::new(ellipse, ELLIPSE_OUTLINE_POINTS)
    }

    /// Executes the sampling. The outline is closed implicitly: the last point
    /// is not repeated.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count is not a multiple of 4 or is below 8.
    pub fn execute(&self) -> Result<Polyline> {
        if self.count < 8 || self.count % 4 != 0 {
            return Err(TessellationError::InvalidParameters(format!(
                "outline point count {} must be a multiple of 4 and at least 8",
                self.count
            ))
            .into());
        }

        let a = self.ellipse.length();
        let b = self.ellipse.width();
        let numer = a * a * b * b;

        let points = self
            .angles()
            .into_iter()
            .map(|alpha| {
                let (sin, cos) = alpha.to_radians().sin_cos();
                let r = (numer / (b * b * cos * cos + a * a * sin * sin)).sqrt();
                self.ellipse.to_world(&Point2::new(r * cos, r * sin))
            })
            .collect();
        Ok(Polyline { points })
    }

    /// Biased polar angles in degrees, starting at the major axis.
    #[allow(clippy::cast_precision_loss)]
    fn angles(&self) -> Vec<f64> {
        let q = self.count / 4;
        let ratio = (self.ellipse.length() / self.ellipse.width()).max(MIN_BIAS_RATIO);
        let inv_sq = 1.0 / (ratio * ratio);
        let summation = (q * (q - 1) / 2) as f64;

        let main = 90.0 / (q as f64 + summation - summation * inv_sq);
        let secondary = (1.0 - inv_sq) * main;

        let mut angles = Vec::with_capacity(self.count);
        let mut alpha = 0.0;
        angles.push(alpha);
        for i in 1..self.count {
            // Number of secondary increments for this step.
            let k = if i <= q {
                i - 1
            } else if i <= 2 * q {
                2 * q - i
            } else if i <= 3 * q {
                i - 2 * q - 1
            } else {
                4 * q - i
            };
            alpha += main + k as f64 * secondary;
            angles.push(alpha);
        }
        angles
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ellipse() -> Ellipse {
        Ellipse::new(Point2::new(0.5, -0.25), -1.028, 2.44, 0.716).unwrap()
    }

    #[test]
    fn default_count_is_sixty() {
        let e = ellipse();
        let outline = TessellateEllipse::with_default_count(&e).execute().unwrap();
        assert_eq!(outline.points.len(), ELLIPSE_OUTLINE_POINTS);
    }

    #[test]
    fn points_lie_on_the_ellipse() {
        let e = ellipse();
        let outline = TessellateEllipse::new(&e, 40).execute().unwrap();
        for pt in &outline.points {
            let local = e.to_local(pt);
            let s = (local.x / e.length()).powi(2) + (local.y / e.width()).powi(2);
            assert_relative_eq!(s, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn quadrants_land_on_axes() {
        let e = ellipse();
        let outline = TessellateEllipse::with_default_count(&e).execute().unwrap();
        let pts = &outline.points;
        let q = ELLIPSE_OUTLINE_POINTS / 4;

        let major = e.to_local(&pts[0]);
        assert_relative_eq!(major.x, e.length(), epsilon = 1e-9);
        let minor = e.to_local(&pts[q]);
        assert_relative_eq!(minor.y, e.width(), epsilon = 1e-9);
        let back = e.to_local(&pts[2 * q]);
        assert_relative_eq!(back.x, -e.length(), epsilon = 1e-9);
        let down = e.to_local(&pts[3 * q]);
        assert_relative_eq!(down.y, -e.width(), epsilon = 1e-9);
    }

    #[test]
    fn steps_are_biased_toward_the_major_axis() {
        let e = ellipse();
        let angles = TessellateEllipse::with_default_count(&e).angles();
        let first = angles[1] - angles[0];
        let last_in_quadrant = angles[15] - angles[14];
        assert!(first < last_in_quadrant);
        assert!(angles.windows(2).all(|w| w[1] > w[0]));
        assert!(*angles.last().unwrap() < 360.0);
    }

    #[test]
    fn rejects_bad_counts() {
        let e = ellipse();
        assert!(TessellateEllipse::new(&e, 4).execute().is_err());
        assert!(TessellateEllipse::new(&e, 30).execute().is_err());
    }
}
