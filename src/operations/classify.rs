use crate::error::{OperationError, RegionError, Result};
use crate::geometry::{Bounds, Ellipse};
use crate::math::{slope_rotation, Point2};
use crate::regions::{AvoClass, BoundarySet, ClassRegion, REGION_COUNT};

use super::PartitionRegions;

/// Number of gradation shells between the background and maximum ellipses.
const SHELL_COUNT: usize = 7;

/// Gradation added per shell.
const GRADATION_STEP: f64 = 0.03125;

/// Half a step, centering each shell's gradation in its bin.
const GRADATION_OFFSET: f64 = 0.015625;

/// Classifies crossplot points into signed AVO class values.
///
/// Built once from the two ellipses and the boundary rays, then shared
/// read-only; any parameter change builds a new classifier.
#[derive(Debug, Clone)]
pub struct PointClassifier {
    center: Point2,
    cos: f64,
    sin: f64,
    /// Half axes `(length, width)` of the shells, innermost first.
    shells: [(f64, f64); SHELL_COUNT],
    regions: [ClassRegion; REGION_COUNT],
    normalization: f64,
}

impl PointClassifier {
    /// Builds a classifier.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::SlopeMismatch` if the ellipses are not
    /// co-oriented, any partition error from [`PartitionRegions`], and
    /// `OperationError::InvalidInput` for a non-positive normalization.
    #[allow(clippy::float_cmp, clippy::cast_precision_loss)]
    pub fn new(
        background: &Ellipse,
        maximum: &Ellipse,
        boundaries: &BoundarySet,
        bounds: Bounds,
        normalization: f64,
    ) -> Result<Self> {
        let slope = background.slope();
        if slope != maximum.slope() {
            return Err(RegionError::SlopeMismatch {
                background: slope,
                maximum: maximum.slope(),
            }
            .into());
        }
        if !(normalization.is_finite() && normalization > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "normalization factor must be positive, got {normalization}"
            ))
            .into());
        }

        let regions = PartitionRegions::new(boundaries, bounds, slope).execute()?;

        let steps = (SHELL_COUNT - 1) as f64;
        let length_step = (maximum.length() - background.length()) / steps;
        let width_step = (maximum.width() - background.width()) / steps;
        let mut shells = [(0.0, 0.0); SHELL_COUNT];
        for (i, shell) in shells.iter_mut().enumerate() {
            *shell = (
                background.length() + i as f64 * length_step,
                background.width() + i as f64 * width_step,
            );
        }

        let (cos, sin) = slope_rotation(slope);
        tracing::debug!(slope, normalization, "built point classifier");
        Ok(Self {
            center: *background.center(),
            cos,
            sin,
            shells,
            regions,
            normalization,
        })
    }

    /// Index of the first shell containing `(a, b)`.
    ///
    /// 0 is inside the background ellipse; 7 is outside the maximum one.
    #[must_use]
    pub fn shell_index(&self, a: f64, b: f64) -> usize {
        let dx = a - self.center.x;
        let dy = b - self.center.y;
        let x = dx * self.cos + dy * self.sin;
        let y = dy * self.cos - dx * self.sin;
        self.shells
            .iter()
            .position(|&(length, width)| {
                let (u, v) = (x / length, y / width);
                u * u + v * v < 1.0
            })
            .unwrap_or(SHELL_COUNT)
    }

    /// The class of the first region containing `(a, b)`, if any.
    #[must_use]
    pub fn region_at(&self, a: f64, b: f64) -> Option<AvoClass> {
        let point = Point2::new(a, b);
        self.regions
            .iter()
            .find(|region| region.contains(&point))
            .map(ClassRegion::class)
    }

    /// Classifies a single point.
    ///
    /// Returns NaN for background points and for the rare point that lies
    /// in no wedge; otherwise `sign * normalization * (base + gradation)`.
    /// Points past the bounds keep the class of the wedge they fall in.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn classify(&self, a: f64, b: f64) -> f64 {
        let shell = self.shell_index(a, b);
        if shell == 0 {
            return f64::NAN;
        }
        let Some(class) = self.region_at(a, b) else {
            return f64::NAN;
        };
        let gradation = (shell + 1) as f64 * GRADATION_STEP - GRADATION_OFFSET;
        class.sign() * self.normalization * (class.base_fraction() + gradation)
    }

    /// Classifies paired A/B samples into `out`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the three slices differ in
    /// length.
    pub fn classify_slice(&self, a: &[f64], b: &[f64], out: &mut [f64]) -> Result<()> {
        if a.len() != b.len() || a.len() != out.len() {
            return Err(OperationError::InvalidInput(format!(
                "slice lengths differ: a={}, b={}, out={}",
                a.len(),
                b.len(),
                out.len()
            ))
            .into());
        }
        for ((value, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *value = self.classify(x, y);
        }
        Ok(())
    }

    /// The ten class regions, in [`AvoClass::RING`] order.
    #[must_use]
    pub fn regions(&self) -> &[ClassRegion; REGION_COUNT] {
        &self.regions
    }

    #[must_use]
    pub fn normalization(&self) -> f64 {
        self.normalization
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AbavoError;
    use crate::math::Vector2;
    use crate::model::Preset;
    use crate::regions::{BoundaryRay, RegionBoundary};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn classifier(preset: &Preset, normalization: f64) -> PointClassifier {
        let (bg, max) = preset.ellipses().unwrap();
        PointClassifier::new(&bg, &max, &preset.boundaries, preset.bounds, normalization).unwrap()
    }

    fn alaska() -> PointClassifier {
        classifier(&Preset::alaska_big_ellipses(), 1.0)
    }

    /// The preset geometry moved by `(dx, dy)`, with its own maximum axes.
    fn shifted(preset: &Preset, dx: f64, dy: f64, max_length: f64, max_width: f64) -> PointClassifier {
        let offset = Vector2::new(dx, dy);
        let mut boundaries = preset.boundaries;
        for slot in RegionBoundary::ALL {
            let ray = boundaries[slot];
            boundaries[slot] = BoundaryRay::new(ray.outer + offset, ray.inner + offset);
        }
        let b = preset.bounds;
        let bounds = Bounds::new(b.xmin() + dx, b.xmax() + dx, b.ymin() + dy, b.ymax() + dy).unwrap();
        let (bg, _) = preset.ellipses().unwrap();
        let bg = Ellipse::new(bg.center() + offset, bg.slope(), bg.length(), bg.width()).unwrap();
        let max = bg.with_axes(max_length, max_width).unwrap();
        PointClassifier::new(&bg, &max, &boundaries, bounds, 1.0).unwrap()
    }

    fn same(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || a == b
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PointClassifier>();
    }

    #[test]
    fn background_points_are_nan() {
        let c = alaska();
        assert!(c.classify(0.0, 0.0).is_nan());
        assert!(c.classify(1.5, -1.5).is_nan());
        assert_eq!(c.shell_index(0.0, 0.0), 0);
    }

    #[test]
    fn corners_of_the_falling_trend_box() {
        let c = alaska();
        assert_relative_eq!(c.classify(2.5, -2.5), 0.0);
        assert_eq!(c.region_at(2.5, -2.5), Some(AvoClass::BaseNull));
        assert_relative_eq!(c.classify(-2.5, 2.5), 0.0);
        assert_eq!(c.region_at(-2.5, 2.5), Some(AvoClass::TopNull));
        assert_relative_eq!(c.classify(2.5, 2.5), -0.734_375);
        assert_relative_eq!(c.classify(-2.5, -2.5), 0.734_375);
    }

    #[test]
    fn known_class_values() {
        let c = alaska();
        assert_relative_eq!(c.classify(0.0, -2.4), 0.484_375);
        assert_eq!(c.region_at(0.0, -2.4), Some(AvoClass::TopClass2));
        assert_relative_eq!(c.classify(0.0, 2.4), -0.484_375);
        assert_relative_eq!(c.classify(1.2, 1.0), -0.671_875);
        assert_eq!(c.shell_index(1.2, 1.0), 5);
        assert_relative_eq!(c.classify(-1.2, -1.0), 0.671_875);
    }

    #[test]
    fn gradation_grows_along_a_ray() {
        let c = alaska();
        let d = std::f64::consts::FRAC_1_SQRT_2;
        let expected = [
            (0.5, f64::NAN),
            (0.8, -0.546_875),
            (0.9, -0.546_875),
            (1.0, -0.578_125),
            (1.2, -0.609_375),
            (1.5, -0.671_875),
            (2.0, -0.734_375),
            (2.4, -0.734_375),
        ];
        for (t, value) in expected {
            let got = c.classify(t * d, t * d);
            assert!(same(got, value) || (got - value).abs() < 1e-12, "t={t}: {got}");
        }
    }

    #[test]
    fn normalization_scales_output() {
        let c = classifier(&Preset::alaska_big_ellipses(), 128.0);
        let d = std::f64::consts::FRAC_1_SQRT_2;
        let got: Vec<f64> = [0.8, 0.9, 1.0, 1.2, 1.5, 2.0, 2.4]
            .iter()
            .map(|t| c.classify(-t * d, -t * d))
            .collect();
        assert_eq!(got, vec![70.0, 70.0, 74.0, 78.0, 86.0, 94.0, 94.0]);
        assert_relative_eq!(c.normalization(), 128.0);
    }

    #[test]
    fn rising_trend_values() {
        let c = classifier(&Preset::positive_trend_ellipses(), 1.0);
        assert_relative_eq!(c.classify(1.5, -1.5), -0.734_375);
        assert_relative_eq!(c.classify(-1.5, 1.5), 0.734_375);
        assert_relative_eq!(c.classify(1.9, 1.9), 0.234_375);
        assert_eq!(c.region_at(1.2, 1.0), Some(AvoClass::BaseNull));
        assert_eq!(c.shell_index(1.2, 1.0), 4);
        assert_relative_eq!(c.classify(1.2, 1.0), 0.0);
        assert_relative_eq!(c.classify(2.5, 2.5), 0.234_375);
        assert_eq!(c.region_at(2.5, 2.5), Some(AvoClass::TopClass1));
        assert_relative_eq!(c.classify(2.5, -2.5), -0.734_375);
    }

    #[test]
    fn points_past_the_bounds_keep_their_class() {
        let c = alaska();
        assert_relative_eq!(c.classify(-2.6, -2.6), 0.734_375);
        assert_eq!(c.region_at(-2.6, -2.6), Some(AvoClass::TopClass3));
        assert_relative_eq!(c.classify(0.0, -2.6), 0.484_375);
        assert_relative_eq!(c.classify(0.0, -10.0), 0.484_375);
        assert_eq!(c.region_at(0.0, -10.0), Some(AvoClass::TopClass2));
        assert_relative_eq!(c.classify(2.6, 2.6), -0.734_375);
        assert_relative_eq!(c.classify(10.0, 0.0), -0.734_375);
        assert_relative_eq!(c.classify(3.0, -3.0), 0.0);
        assert_eq!(c.region_at(3.0, -3.0), Some(AvoClass::BaseNull));
    }

    #[test]
    fn slope_mismatch_fails() {
        let preset = Preset::alaska_big_ellipses();
        let bg = Ellipse::new(Point2::origin(), -1.0, 2.44, 0.716).unwrap();
        let max = Ellipse::new(Point2::origin(), -1.1, 2.96, 1.82).unwrap();
        let err = PointClassifier::new(&bg, &max, &preset.boundaries, preset.bounds, 1.0)
            .unwrap_err();
        assert!(matches!(
            err,
            AbavoError::Region(RegionError::SlopeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_bad_normalization() {
        let preset = Preset::alaska_big_ellipses();
        let (bg, max) = preset.ellipses().unwrap();
        for n in [0.0, -1.0, f64::INFINITY] {
            let err =
                PointClassifier::new(&bg, &max, &preset.boundaries, preset.bounds, n).unwrap_err();
            assert!(matches!(
                err,
                AbavoError::Operation(OperationError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn slice_matches_pointwise() {
        let c = alaska();
        let a = [0.0, 2.5, -2.5, 1.2, 0.0];
        let b = [0.0, 2.5, -2.5, 1.0, -2.4];
        let mut out = [0.0; 5];
        c.classify_slice(&a, &b, &mut out).unwrap();
        for i in 0..a.len() {
            assert!(same(out[i], c.classify(a[i], b[i])));
        }
        let mut short = [0.0; 4];
        assert!(c.classify_slice(&a, &b, &mut short).is_err());
    }

    #[test]
    fn classifies_from_many_threads() {
        let c = Arc::new(alaska());
        let expected = c.classify(-1.2, -1.0);
        std::thread::scope(|s| {
            for k in 0..4 {
                let c = Arc::clone(&c);
                s.spawn(move || {
                    for _ in 0..100 {
                        assert_relative_eq!(c.classify(-1.2, -1.0), expected);
                        assert!(c.classify(0.01 * f64::from(k), 0.0).is_nan());
                    }
                });
            }
        });
    }

    proptest! {
        #[test]
        fn antisymmetric_about_the_center(a in -2.49f64..2.49, b in -2.49f64..2.49) {
            let c = alaska();
            let here = c.classify(a, b);
            let there = c.classify(-a, -b);
            prop_assert!(same(here, -there), "{here} vs {there}");
        }

        #[test]
        fn center_is_always_background(
            dx in -10.0f64..10.0,
            dy in -10.0f64..10.0,
            max_length in 2.5f64..4.0,
            max_width in 0.8f64..3.0,
        ) {
            for preset in Preset::all() {
                let (bg, _) = preset.ellipses().unwrap();
                let c = shifted(&preset, dx, dy, max_length, max_width);
                let center = bg.center();
                prop_assert!(c.classify(center.x + dx, center.y + dy).is_nan());
            }
        }

        #[test]
        fn value_matches_containing_region(a in -2.49f64..2.49, b in -2.49f64..2.49) {
            let c = alaska();
            let value = c.classify(a, b);
            if let Some(class) = c.region_at(a, b) {
                if class.is_null() {
                    prop_assert!(value.is_nan() || value == 0.0);
                } else if !value.is_nan() {
                    let unsigned = value.abs() - class.base_fraction();
                    prop_assert!(value * class.sign() >= 0.0);
                    prop_assert!(unsigned > 0.0 && unsigned < 0.25, "{class}: {value}");
                }
            }
        }

        #[test]
        fn reflected_points_fall_five_regions_apart(a in -2.49f64..2.49, b in -2.49f64..2.49) {
            let c = alaska();
            if let (Some(here), Some(there)) = (c.region_at(a, b), c.region_at(-a, -b)) {
                prop_assert_eq!((here.ring_index() + 5) % REGION_COUNT, there.ring_index());
            }
        }

        #[test]
        fn points_outside_background_are_classified(a in -8.0f64..8.0, b in -8.0f64..8.0) {
            let c = alaska();
            prop_assume!(c.shell_index(a, b) > 0);
            let value = c.classify(a, b);
            prop_assert!(value.is_finite());
            prop_assert!(value.abs() <= 1.0);
        }

        #[test]
        fn shells_do_not_shrink_outward(angle in 0.0f64..std::f64::consts::TAU, t in 0.0f64..3.0) {
            let c = alaska();
            let (sin, cos) = angle.sin_cos();
            let near = c.shell_index(t * cos, t * sin);
            let far = c.shell_index((t + 0.1) * cos, (t + 0.1) * sin);
            prop_assert!(near <= far);
        }
    }
}
