use crate::error::Result;
use crate::geometry::{Ellipse, EllipseKind};
use crate::math::Point2;
use crate::regions::{BoundaryRay, BoundarySet};

/// Editable fields of an ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipseField {
    Slope,
    Length,
    Width,
    CenterX,
    CenterY,
}

impl EllipseField {
    pub const ALL: [EllipseField; 5] = [
        EllipseField::Slope,
        EllipseField::Length,
        EllipseField::Width,
        EllipseField::CenterX,
        EllipseField::CenterY,
    ];

    /// Key used in the flat persistence map.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            EllipseField::Slope => "slope",
            EllipseField::Length => "length",
            EllipseField::Width => "width",
            EllipseField::CenterX => "centerX",
            EllipseField::CenterY => "centerY",
        }
    }
}

/// Editable fields of a boundary ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryField {
    OuterX,
    OuterY,
    InnerX,
    InnerY,
}

impl BoundaryField {
    pub const ALL: [BoundaryField; 4] = [
        BoundaryField::OuterX,
        BoundaryField::OuterY,
        BoundaryField::InnerX,
        BoundaryField::InnerY,
    ];

    /// Key used in the flat persistence map.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            BoundaryField::OuterX => "outerX",
            BoundaryField::OuterY => "outerY",
            BoundaryField::InnerX => "innerX",
            BoundaryField::InnerY => "innerY",
        }
    }

    /// Reads this coordinate of `ray`.
    #[must_use]
    pub fn get(self, ray: &BoundaryRay) -> f64 {
        match self {
            BoundaryField::OuterX => ray.outer.x,
            BoundaryField::OuterY => ray.outer.y,
            BoundaryField::InnerX => ray.inner.x,
            BoundaryField::InnerY => ray.inner.y,
        }
    }

    /// Writes this coordinate of `ray`.
    pub fn set(self, ray: &mut BoundaryRay, value: f64) {
        match self {
            BoundaryField::OuterX => ray.outer.x = value,
            BoundaryField::OuterY => ray.outer.y = value,
            BoundaryField::InnerX => ray.inner.x = value,
            BoundaryField::InnerY => ray.inner.y = value,
        }
    }
}

/// Raw, possibly incomplete ellipse parameters as edited by a user.
///
/// Unset fields are NaN. Use [`EllipseParams::to_ellipse`] to obtain a
/// validated [`Ellipse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    pub slope: f64,
    pub length: f64,
    pub width: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            slope: f64::NAN,
            length: f64::NAN,
            width: f64::NAN,
            center_x: f64::NAN,
            center_y: f64::NAN,
        }
    }
}

impl EllipseParams {
    #[must_use]
    pub const fn new(slope: f64, length: f64, width: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            slope,
            length,
            width,
            center_x,
            center_y,
        }
    }

    #[must_use]
    pub fn get(&self, field: EllipseField) -> f64 {
        match field {
            EllipseField::Slope => self.slope,
            EllipseField::Length => self.length,
            EllipseField::Width => self.width,
            EllipseField::CenterX => self.center_x,
            EllipseField::CenterY => self.center_y,
        }
    }

    pub fn set(&mut self, field: EllipseField, value: f64) {
        match field {
            EllipseField::Slope => self.slope = value,
            EllipseField::Length => self.length = value,
            EllipseField::Width => self.width = value,
            EllipseField::CenterX => self.center_x = value,
            EllipseField::CenterY => self.center_y = value,
        }
    }

    /// Validates the parameters into an ellipse.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is unset or invalid.
    pub fn to_ellipse(&self) -> Result<Ellipse> {
        Ellipse::new(
            Point2::new(self.center_x, self.center_y),
            self.slope,
            self.length,
            self.width,
        )
    }
}

impl From<&Ellipse> for EllipseParams {
    fn from(ellipse: &Ellipse) -> Self {
        let c = ellipse.center();
        Self::new(ellipse.slope(), ellipse.length(), ellipse.width(), c.x, c.y)
    }
}

/// Complete editable state of an ellipse regions model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionsParameters {
    /// Whether edits to one boundary are mirrored into its reflected slot.
    pub symmetric_regions: bool,
    pub background: EllipseParams,
    pub maximum: EllipseParams,
    pub boundaries: BoundarySet,
}

impl Default for RegionsParameters {
    fn default() -> Self {
        Self {
            symmetric_regions: true,
            background: EllipseParams::default(),
            maximum: EllipseParams::default(),
            boundaries: BoundarySet::default(),
        }
    }
}

impl RegionsParameters {
    #[must_use]
    pub fn ellipse(&self, kind: EllipseKind) -> &EllipseParams {
        match kind {
            EllipseKind::Background => &self.background,
            EllipseKind::Maximum => &self.maximum,
        }
    }

    pub fn ellipse_mut(&mut self, kind: EllipseKind) -> &mut EllipseParams {
        match kind {
            EllipseKind::Background => &mut self.background,
            EllipseKind::Maximum => &mut self.maximum,
        }
    }

    /// Both ellipses, validated.
    ///
    /// # Errors
    ///
    /// Returns an error if either ellipse is incomplete or invalid.
    pub fn ellipses(&self) -> Result<(Ellipse, Ellipse)> {
        Ok((self.background.to_ellipse()?, self.maximum.to_ellipse()?))
    }

    /// Returns the boundaries if they are all set.
    #[must_use]
    pub fn complete_boundaries(&self) -> Option<&BoundarySet> {
        self.boundaries.is_finite().then_some(&self.boundaries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unset_params_do_not_validate() {
        assert!(EllipseParams::default().to_ellipse().is_err());
        let mut p = EllipseParams::new(-1.0, 2.0, 0.5, 0.0, 0.0);
        assert!(p.to_ellipse().is_ok());
        p.set(EllipseField::Width, f64::NAN);
        assert!(p.to_ellipse().is_err());
    }

    #[test]
    fn fields_round_trip_through_ellipse() {
        let p = EllipseParams::new(0.85, 1.2, 0.35, 0.1, -0.2);
        let back = EllipseParams::from(&p.to_ellipse().unwrap());
        assert_eq!(p, back);
        for field in EllipseField::ALL {
            assert_eq!(p.get(field).to_bits(), back.get(field).to_bits());
        }
    }

    #[test]
    fn default_state_is_symmetric_and_unset() {
        let params = RegionsParameters::default();
        assert!(params.symmetric_regions);
        assert!(!params.boundaries.is_finite());
        assert!(params.ellipses().is_err());
    }
}
