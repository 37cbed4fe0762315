use crate::error::{RegionError, Result};
use crate::geometry::{Bounds, Ellipse};
use crate::math::intersect_2d::line_ellipse_intersect_2d;
use crate::math::{Point2, Vector2};
use crate::regions::{BoundaryRay, BoundarySet, RegionBoundary};

/// Fraction of the half-width of the bounds separating the two vertical
/// probes from the ellipse center.
const VERTICAL_PROBE_FRACTION: f64 = 0.1;

/// Slot order of the solved rays for a falling trend.
///
/// Rays are listed as `[i0, i1, i2, i3, n4, i4, i5, i6, i7, n0]`: the two
/// vertical probes, the horizontal probe, the two trend-parallel probes, and
/// their reflections through the center.
const FALLING_TREND_SLOTS: [RegionBoundary; 10] = [
    RegionBoundary::P1ToP2,
    RegionBoundary::P2ToP3,
    RegionBoundary::P3ToP4,
    RegionBoundary::P4ToNull,
    RegionBoundary::NullToN1,
    RegionBoundary::N1ToN2,
    RegionBoundary::N2ToN3,
    RegionBoundary::N3ToN4,
    RegionBoundary::N4ToNull,
    RegionBoundary::NullToP1,
];

/// Slot order of the solved rays for a flat or rising trend.
const RISING_TREND_SLOTS: [RegionBoundary; 10] = [
    RegionBoundary::P1ToP2,
    RegionBoundary::P2ToP3,
    RegionBoundary::NullToN1,
    RegionBoundary::P3ToP4,
    RegionBoundary::P4ToNull,
    RegionBoundary::N1ToN2,
    RegionBoundary::N2ToN3,
    RegionBoundary::NullToP1,
    RegionBoundary::N3ToN4,
    RegionBoundary::N4ToNull,
];

/// Computes the ten region boundaries around the background ellipse.
///
/// Five rays are solved from fixed probes against the bounds; the other five
/// are their 180° reflections through the ellipse center, so the partition is
/// point-symmetric.
#[derive(Debug)]
pub struct BuildBoundaries<'a> {
    background: &'a Ellipse,
    maximum: &'a Ellipse,
    bounds: Bounds,
}

impl<'a> BuildBoundaries<'a> {
    /// Creates a new boundary computation.
    #[must_use]
    pub fn new(background: &'a Ellipse, maximum: &'a Ellipse, bounds: Bounds) -> Self {
        Self {
            background,
            maximum,
            bounds,
        }
    }

    /// Executes the computation.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::SlopeMismatch` if the two ellipses are not
    /// co-oriented, and `RegionError::MissedIntersection` if a probe line
    /// misses the background ellipse.
    #[allow(clippy::float_cmp)]
    pub fn execute(&self) -> Result<BoundarySet> {
        let slope = self.background.slope();
        if slope != self.maximum.slope() {
            return Err(RegionError::SlopeMismatch {
                background: slope,
                maximum: self.maximum.slope(),
            }
            .into());
        }
        let slots = if slope < 0.0 {
            &FALLING_TREND_SLOTS
        } else {
            &RISING_TREND_SLOTS
        };

        let b = &self.bounds;
        let center = *self.background.center();
        let offset = VERTICAL_PROBE_FRACTION * b.half_width();
        let up = Vector2::new(0.0, 1.0);
        let along = Vector2::new(1.0, slope);

        let i0 = self.probe(Point2::new(center.x + offset, b.ymin()), up, slots[0])?;
        let i1 = self.probe(Point2::new(center.x - offset, b.ymin()), up, slots[1])?;
        let i2 = self.probe(Point2::new(b.xmin(), center.y), Vector2::new(1.0, 0.0), slots[2])?;

        // Trend-parallel lines at a perpendicular distance of half the width.
        let shift = (1.0 + slope * slope).sqrt() * self.background.width() / 2.0;
        let i3 = self.probe(self.trend_entry(-shift), along, slots[3])?;
        let n4 = self.probe(self.trend_entry(shift), along, slots[4])?;

        let solved = [
            BoundaryRay::new(Point2::new(i0.x, b.ymin()), i0),
            BoundaryRay::new(Point2::new(i1.x, b.ymin()), i1),
            BoundaryRay::new(Point2::new(b.xmin(), center.y), i2),
            BoundaryRay::new(self.trend_entry(-shift), i3),
            BoundaryRay::new(self.trend_entry(shift), n4),
        ];

        let mut set = BoundarySet::default();
        for (k, ray) in solved.iter().enumerate() {
            set[slots[k]] = *ray;
            set[slots[k + 5]] = ray.reflected(&center);
        }

        tracing::debug!(slope, ?center, "computed region boundaries");
        Ok(set)
    }

    /// Where the trend line shifted vertically by `shift` enters the bounds
    /// from the left, clipped to the bottom edge for a rising trend or the
    /// top edge for a falling one.
    fn trend_entry(&self, shift: f64) -> Point2 {
        let b = &self.bounds;
        let c = self.background.center();
        let m = self.background.slope();
        let rise = (b.xmin() - c.x) * m + shift;
        if m > 0.0 && rise < b.ymin() - c.y {
            Point2::new(c.x + (b.ymin() - c.y - shift) / m, b.ymin())
        } else if m <= 0.0 && rise > b.ymax() - c.y {
            Point2::new(c.x + (b.ymax() - c.y - shift) / m, b.ymax())
        } else {
            Point2::new(b.xmin(), c.y + rise)
        }
    }

    fn probe(&self, from: Point2, direction: Vector2, slot: RegionBoundary) -> Result<Point2> {
        line_ellipse_intersect_2d(&from, &direction, self.background)
            .ok_or_else(|| RegionError::MissedIntersection(slot).into())
    }
}
