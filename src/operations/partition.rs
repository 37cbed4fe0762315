use crate::error::{AbavoError, RegionError, Result};
use crate::geometry::{BoxEdge, Bounds};
use crate::math::polygon_2d::first_reflex_vertex;
use crate::math::Point2;
use crate::regions::{AvoClass, BoundarySet, ClassRegion, RegionBoundary, REGION_COUNT};

/// Chains the ten boundary rays into the ten class regions tiling the bounds
/// around the background ellipse.
///
/// Each region is the wedge between two consecutive rays, closed against
/// the bounds with one corner when the two outer points sit on different
/// edges. Which ray pair feeds which class depends on the trend direction.
#[derive(Debug)]
pub struct PartitionRegions<'a> {
    boundaries: &'a BoundarySet,
    bounds: Bounds,
    slope: f64,
}

impl<'a> PartitionRegions<'a> {
    /// Creates a new partition operation for ellipses of the given slope.
    #[must_use]
    pub fn new(boundaries: &'a BoundarySet, bounds: Bounds, slope: f64) -> Self {
        Self {
            boundaries,
            bounds,
            slope,
        }
    }

    /// Executes the partition, returning regions in [`AvoClass::RING`] order.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::RegionsCross` if a region cannot be closed
    /// against the bounds, and `RegionError::NotConvex` if a closed region is
    /// not convex.
    pub fn execute(&self) -> Result<[ClassRegion; REGION_COUNT]> {
        let mut regions = [ClassRegion::new(AvoClass::TopClass1, [Point2::origin(); 4], None);
            REGION_COUNT];
        for (r, class) in AvoClass::RING.into_iter().enumerate() {
            let first = self.leading_boundary(r);
            let a = &self.boundaries[first];
            let b = &self.boundaries[first.next()];
            let wedge = [a.outer, a.inner, b.inner, b.outer];

            let corner = self.closing_corner(&wedge[3], &wedge[0], class)?;
            let region = ClassRegion::new(class, wedge, corner);
            if first_reflex_vertex(region.vertices()).is_some() {
                return Err(RegionError::NotConvex { class }.into());
            }
            regions[r] = region;
        }
        Ok(regions)
    }

    /// The boundary on the clockwise side of region `r`.
    fn leading_boundary(&self, r: usize) -> RegionBoundary {
        if self.slope < 0.0 {
            RegionBoundary::from_index(r)
        } else {
            RegionBoundary::from_index(15 - r)
        }
    }

    /// Corner closing the polygon from `last` back to `first`, if they lie on
    /// different edges.
    fn closing_corner(
        &self,
        last: &Point2,
        first: &Point2,
        class: AvoClass,
    ) -> Result<Option<Point2>> {
        let b = &self.bounds;
        let cases = [
            (BoxEdge::Left, [BoxEdge::Bottom, BoxEdge::Top]),
            (BoxEdge::Right, [BoxEdge::Bottom, BoxEdge::Top]),
            (BoxEdge::Bottom, [BoxEdge::Left, BoxEdge::Right]),
            (BoxEdge::Top, [BoxEdge::Left, BoxEdge::Right]),
        ];
        let crossed = || AbavoError::from(RegionError::RegionsCross { class });

        let (edge, neighbours) = cases
            .iter()
            .find(|(edge, _)| b.on_edge(last, *edge))
            .ok_or_else(crossed)?;
        if b.on_edge(first, *edge) {
            return Ok(None);
        }
        let other = neighbours
            .iter()
            .find(|n| b.on_edge(first, **n))
            .ok_or_else(crossed)?;
        Ok(b.corner(*edge, *other))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Preset;

    fn alaska() -> [ClassRegion; REGION_COUNT] {
        let preset = Preset::alaska_big_ellipses();
        PartitionRegions::new(&preset.boundaries, preset.bounds, preset.background.slope)
            .execute()
            .unwrap()
    }

    #[test]
    fn ten_convex_ccw_regions() {
        for preset in [Preset::alaska_big_ellipses(), Preset::positive_trend_ellipses()] {
            let regions =
                PartitionRegions::new(&preset.boundaries, preset.bounds, preset.background.slope)
                    .execute()
                    .unwrap();
            assert_eq!(regions.len(), REGION_COUNT);
            for (r, region) in regions.iter().enumerate() {
                assert_eq!(region.class(), AvoClass::RING[r]);
                assert!(matches!(region.vertices().len(), 4 | 5));
                assert!(region.area() > 0.0, "{} has area {}", region.class(), region.area());
            }
        }
    }

    #[test]
    fn closure_corners_for_falling_trend() {
        let counts: Vec<usize> = alaska().iter().map(|r| r.vertices().len()).collect();
        assert_eq!(counts, vec![4, 5, 4, 5, 4, 4, 5, 4, 5, 4]);

        let regions = alaska();
        let corner = regions[1].vertices()[4];
        assert_eq!(corner, Point2::new(-2.5, -2.5));
        let corner = regions[8].vertices()[4];
        assert_eq!(corner, Point2::new(2.5, -2.5));
    }

    #[test]
    fn closure_corners_for_rising_trend() {
        let preset = Preset::positive_trend_ellipses();
        let regions =
            PartitionRegions::new(&preset.boundaries, preset.bounds, preset.background.slope)
                .execute()
                .unwrap();
        let counts: Vec<usize> = regions.iter().map(|r| r.vertices().len()).collect();
        assert_eq!(counts, vec![4, 5, 4, 4, 5, 4, 5, 4, 4, 5]);
    }

    #[test]
    fn regions_tile_the_bounds() {
        let preset = Preset::alaska_big_ellipses();
        let regions = alaska();
        let (bg, _) = preset.ellipses().unwrap();
        let total: f64 = regions.iter().map(ClassRegion::area).sum();
        // Box minus the inscribed polygon of the ten inner points.
        let inner: Vec<Point2> = (0..REGION_COUNT)
            .map(|i| preset.boundaries[RegionBoundary::from_index(i)].inner)
            .collect();
        let hole = crate::math::polygon_2d::signed_area_2d(&inner).abs();
        assert!((total + hole - 25.0).abs() < 1e-9, "total={total} hole={hole}");
        assert!(hole < std::f64::consts::PI * bg.length() * bg.width());
    }

    #[test]
    fn crossing_boundaries_fail_closure() {
        let preset = Preset::alaska_big_ellipses();
        let mut boundaries = preset.boundaries;
        // Pull an outer point off the bounds.
        boundaries[RegionBoundary::P2ToP3].outer = Point2::new(-0.25, -2.0);
        let err = PartitionRegions::new(&boundaries, preset.bounds, preset.background.slope)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            AbavoError::Region(RegionError::RegionsCross {
                class: AvoClass::TopClass2
            })
        ));
    }

    #[test]
    fn swapped_inner_points_are_not_convex() {
        let preset = Preset::alaska_big_ellipses();
        let mut boundaries = preset.boundaries;
        let a = boundaries[RegionBoundary::P1ToP2].inner;
        let b = boundaries[RegionBoundary::P2ToP3].inner;
        boundaries[RegionBoundary::P1ToP2].inner = b;
        boundaries[RegionBoundary::P2ToP3].inner = a;
        let err = PartitionRegions::new(&boundaries, preset.bounds, preset.background.slope)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            AbavoError::Region(RegionError::NotConvex {
                class: AvoClass::TopClass2
            })
        ));
    }
}
