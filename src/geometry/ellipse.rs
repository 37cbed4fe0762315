use crate::error::{GeometryError, Result};
use crate::math::{slope_rotation, Point2, Vector2, TOLERANCE};

/// Minimum length/width ratio of an ellipse sized from a cursor.
const MIN_AXIS_RATIO: f64 = 1.01;

/// Scale from the cursor offset to the ellipse half axes.
const CURSOR_DRAWING_SCALAR: f64 = 2.0;

/// Which of the two crossplot envelopes an ellipse describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipseKind {
    /// Inner envelope; points inside it are background.
    Background,
    /// Outer envelope bounding the gradation shells.
    Maximum,
}

impl EllipseKind {
    /// Both kinds, in persistence order.
    pub const ALL: [EllipseKind; 2] = [EllipseKind::Background, EllipseKind::Maximum];

    /// Name used as a persistence key segment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EllipseKind::Background => "Background",
            EllipseKind::Maximum => "Maximum",
        }
    }
}

/// An ellipse in the A/B crossplot plane.
///
/// The major axis follows the trend line `y - cy = slope * (x - cx)`.
/// `length` and `width` are the half major and half minor axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    center: Point2,
    slope: f64,
    length: f64,
    width: f64,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Errors
    ///
    /// Returns an error if the slope or center is not finite, or if either
    /// half axis is not a positive finite number.
    pub fn new(center: Point2, slope: f64, length: f64, width: f64) -> Result<Self> {
        if !slope.is_finite() {
            return Err(GeometryError::InvalidParameter {
                parameter: "slope",
                value: slope,
            }
            .into());
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "ellipse center ({}, {}) is not finite",
                center.x, center.y
            ))
            .into());
        }
        for (parameter, value) in [("length", length), ("width", width)] {
            if !value.is_finite() || value < TOLERANCE {
                return Err(GeometryError::InvalidParameter { parameter, value }.into());
            }
        }
        Ok(Self {
            center,
            slope,
            length,
            width,
        })
    }

    /// Sizes an ellipse of the given slope so that it reaches `cursor`.
    ///
    /// The cursor is projected onto the trend line through `center`; the
    /// distance along the line sets the length and the distance off the line
    /// sets the width, both doubled. Nearly round results are flattened so the
    /// length is at least 1.01 times the width.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor lies on the center or on the trend line.
    pub fn through_cursor(cursor: Point2, slope: f64, center: Point2) -> Result<Self> {
        let mut offset = cursor - center;
        let along_x = (slope * offset.y + offset.x) / (slope * slope + 1.0);
        let along = Vector2::new(along_x, slope * along_x);

        let length = along.norm() * CURSOR_DRAWING_SCALAR;
        let mut width = (offset - along).norm() * CURSOR_DRAWING_SCALAR;

        let ratio = length / width;
        if ratio < MIN_AXIS_RATIO {
            offset = along + (offset - along) * (ratio / MIN_AXIS_RATIO);
            width = (offset - along).norm() * CURSOR_DRAWING_SCALAR;
        }
        Self::new(center, slope, length, width)
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the slope of the major axis.
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Returns the half major axis.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the half minor axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns a co-centered, co-oriented ellipse with other half axes.
    ///
    /// # Errors
    ///
    /// Returns an error if either half axis is invalid.
    pub fn with_axes(&self, length: f64, width: f64) -> Result<Self> {
        Self::new(self.center, self.slope, length, width)
    }

    /// Maps a world point into the centered, axis-aligned frame of the ellipse.
    #[must_use]
    pub fn to_local(&self, point: &Point2) -> Point2 {
        let (cos, sin) = slope_rotation(self.slope);
        let d = point - self.center;
        Point2::new(d.x * cos + d.y * sin, d.y * cos - d.x * sin)
    }

    /// Maps a world direction into the axis-aligned frame of the ellipse.
    #[must_use]
    pub fn to_local_direction(&self, direction: &Vector2) -> Vector2 {
        let (cos, sin) = slope_rotation(self.slope);
        Vector2::new(
            direction.x * cos + direction.y * sin,
            direction.y * cos - direction.x * sin,
        )
    }

    /// Maps a point of the ellipse frame back to world coordinates.
    #[must_use]
    pub fn to_world(&self, local: &Point2) -> Point2 {
        let (cos, sin) = slope_rotation(self.slope);
        Point2::new(
            self.center.x + local.x * cos - local.y * sin,
            self.center.y + local.x * sin + local.y * cos,
        )
    }

    /// Returns whether `point` lies strictly inside the ellipse.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        let local = self.to_local(point);
        let x = local.x / self.length;
        let y = local.y / self.width;
        x * x + y * y < 1.0
    }
}
