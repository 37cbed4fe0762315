use crate::error::{OperationError, Result};
use crate::geometry::{Bounds, Ellipse};
use crate::math::Point2;
use crate::regions::{BoundaryRay, BoundarySet};

use super::{EllipseParams, RegionsParameters};

/// A named, ready-to-use set of ellipses and boundary rays.
///
/// Rays are stored precomputed so a model can be seeded without running the
/// boundary solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub background: EllipseParams,
    pub maximum: EllipseParams,
    pub boundaries: BoundarySet,
    pub bounds: Bounds,
}

fn ray(outer: (f64, f64), inner: (f64, f64)) -> BoundaryRay {
    BoundaryRay::new(Point2::new(outer.0, outer.1), Point2::new(inner.0, inner.1))
}

impl Preset {
    /// Large ellipses on a falling trend.
    #[must_use]
    #[allow(clippy::unreadable_literal, clippy::excessive_precision)]
    pub fn alaska_big_ellipses() -> Self {
        Self {
            name: "Alaska Big Ellipses",
            background: EllipseParams::new(-1.028, 2.44, 0.716, 0.0, 0.0),
            maximum: EllipseParams::new(-1.028, 2.96, 1.82, 0.0, 0.0),
            boundaries: BoundarySet::new([
                ray((0.25000000000000017, -2.5), (0.25000000000000017, -1.1885979454318154)),
                ray((-0.2499999999999994, -2.5), (-0.2499999999999994, -0.7580379227078285)),
                ray((-2.5, 0.0), (-0.9605161239918532, 0.0)),
                ray((-2.5, 2.056574577396094), (-1.7300333478013958, 1.265048858935929)),
                ray((-1.9324655422140988, 2.5), (-1.2168036314706432, 1.7642995557557275)),
                ray((-0.25000000000000017, 2.5), (-0.25000000000000017, 1.1885979454318154)),
                ray((0.2499999999999994, 2.5), (0.2499999999999994, 0.7580379227078285)),
                ray((2.5, 0.0), (0.9605161239918532, 0.0)),
                ray((2.5, -2.056574577396094), (1.7300333478013958, -1.265048858935929)),
                ray((1.9324655422140988, -2.5), (1.2168036314706432, -1.7642995557557275)),
            ]),
            bounds: Bounds::centered_square(2.5),
        }
    }

    /// Compact ellipses on a rising trend.
    #[must_use]
    #[allow(clippy::unreadable_literal, clippy::excessive_precision)]
    pub fn positive_trend_ellipses() -> Self {
        Self {
            name: "Positive Trend Ellipses",
            background: EllipseParams::new(0.85, 1.2, 0.35, 0.0, 0.0),
            maximum: EllipseParams::new(0.85, 1.9, 1.1, 0.0, 0.0),
            boundaries: BoundarySet::new([
                ray((0.19999999999999993, -2.0), (0.19999999999999993, -0.28916000908915573)),
                ray((-0.19999999999999998, -2.0), (-0.19999999999999998, -0.5822239072577111)),
                ray((-2.0, -1.929677083097117), (-0.6784920928695308, -0.8063953620362183)),
                ray((-2.0, -1.4703229169028829), (-0.9051690399029702, -0.5397166008204075)),
                ray((-2.0, 0.0), (-0.5111610109892576, -5.551115123125783e-17)),
                ray((-0.19999999999999993, 2.0), (-0.19999999999999993, 0.28916000908915573)),
                ray((0.19999999999999998, 2.0), (0.19999999999999998, 0.5822239072577111)),
                ray((2.0, 1.929677083097117), (0.6784920928695308, 0.8063953620362183)),
                ray((2.0, 1.4703229169028829), (0.9051690399029702, 0.5397166008204075)),
                ray((2.0, 0.0), (0.5111610109892576, 5.551115123125783e-17)),
            ]),
            bounds: Bounds::centered_square(2.0),
        }
    }

    /// Every built-in preset.
    #[must_use]
    pub fn all() -> [Preset; 2] {
        [Self::alaska_big_ellipses(), Self::positive_trend_ellipses()]
    }

    /// Looks up a built-in preset by name.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for an unknown name.
    pub fn by_name(name: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| OperationError::InvalidInput(format!("unknown preset {name:?}")).into())
    }

    /// The validated background and maximum ellipses.
    ///
    /// # Errors
    ///
    /// Returns an error if either ellipse is invalid.
    pub fn ellipses(&self) -> Result<(Ellipse, Ellipse)> {
        Ok((self.background.to_ellipse()?, self.maximum.to_ellipse()?))
    }
}

impl From<&Preset> for RegionsParameters {
    fn from(preset: &Preset) -> Self {
        Self {
            symmetric_regions: true,
            background: preset.background,
            maximum: preset.maximum,
            boundaries: preset.boundaries,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_complete_and_symmetric() {
        for preset in Preset::all() {
            let (bg, max) = preset.ellipses().unwrap();
            assert!(preset.boundaries.is_finite());
            assert!(preset.boundaries.is_point_symmetric(bg.center(), 1e-15));
            assert!(max.length() > bg.length() && max.width() > bg.width());
            assert_eq!(
                Bounds::enclosing_outer_points(&preset.boundaries).unwrap(),
                preset.bounds
            );
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            Preset::by_name("Positive Trend Ellipses").unwrap().name,
            "Positive Trend Ellipses"
        );
        assert!(Preset::by_name("Gulf Coast").is_err());
    }
}
