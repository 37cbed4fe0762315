use std::fmt;
use std::ops::{Index, IndexMut};

use crate::math::{reflect_through, Point2};

/// Number of region boundaries around the background ellipse.
pub const BOUNDARY_COUNT: usize = 10;

/// The ten named radial dividers, in cyclic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionBoundary {
    P1ToP2,
    P2ToP3,
    P3ToP4,
    P4ToNull,
    NullToN1,
    N1ToN2,
    N2ToN3,
    N3ToN4,
    N4ToNull,
    NullToP1,
}

impl RegionBoundary {
    /// All slots in cyclic order.
    pub const ALL: [RegionBoundary; BOUNDARY_COUNT] = [
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

    /// Position of the slot in the cyclic order.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot at `index` (taken modulo the slot count).
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % BOUNDARY_COUNT]
    }

    /// The following slot in the cycle.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The slot holding the 180° reflection of this one.
    #[must_use]
    pub fn reflected(self) -> Self {
        Self::from_index(self.index() + BOUNDARY_COUNT / 2)
    }

    /// Key used in the flat persistence map.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            RegionBoundary::P1ToP2 => "P1toP2",
            RegionBoundary::P2ToP3 => "P2toP3",
            RegionBoundary::P3ToP4 => "P3toP4",
            RegionBoundary::P4ToNull => "P4toNULL",
            RegionBoundary::NullToN1 => "NULLtoN1",
            RegionBoundary::N1ToN2 => "N1toN2",
            RegionBoundary::N2ToN3 => "N2toN3",
            RegionBoundary::N3ToN4 => "N3toN4",
            RegionBoundary::N4ToNull => "N4toNULL",
            RegionBoundary::NullToP1 => "NULLtoP1",
        }
    }

    /// Human-readable description of the two regions the slot separates.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RegionBoundary::P1ToP2 => "Class I (Top) and Class II (Top)",
            RegionBoundary::P2ToP3 => "Class II (Top) and Class III (Top)",
            RegionBoundary::P3ToP4 => "Class III (Top) and Class IV (Top)",
            RegionBoundary::P4ToNull => "Class IV (Top) and NULL",
            RegionBoundary::NullToN1 => "NULL and Class I (Base)",
            RegionBoundary::N1ToN2 => "Class I (Base) and Class II (Base)",
            RegionBoundary::N2ToN3 => "Class II (Base) and Class III (Base)",
            RegionBoundary::N3ToN4 => "Class III (Base) and Class IV (Base)",
            RegionBoundary::N4ToNull => "Class IV (Base) and NULL",
            RegionBoundary::NullToP1 => "NULL and Class I (Top)",
        }
    }
}

impl fmt::Display for RegionBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A region boundary: an outer point on the bounds and an inner point on
/// the background ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryRay {
    pub outer: Point2,
    pub inner: Point2,
}

impl BoundaryRay {
    #[must_use]
    pub fn new(outer: Point2, inner: Point2) -> Self {
        Self { outer, inner }
    }

    /// A ray with every coordinate unset (NaN).
    #[must_use]
    pub fn unset() -> Self {
        let nan = Point2::new(f64::NAN, f64::NAN);
        Self::new(nan, nan)
    }

    /// The 180° reflection of the ray through `center`.
    #[must_use]
    pub fn reflected(&self, center: &Point2) -> Self {
        Self::new(
            reflect_through(&self.outer, center),
            reflect_through(&self.inner, center),
        )
    }

    /// Returns whether every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.outer.x, self.outer.y, self.inner.x, self.inner.y]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for BoundaryRay {
    fn default() -> Self {
        Self::unset()
    }
}

/// The ten boundary rays, indexed by [`RegionBoundary`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundarySet {
    rays: [BoundaryRay; BOUNDARY_COUNT],
}

impl BoundarySet {
    #[must_use]
    pub fn new(rays: [BoundaryRay; BOUNDARY_COUNT]) -> Self {
        Self { rays }
    }

    /// Iterates over `(slot, ray)` pairs in cyclic order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionBoundary, &BoundaryRay)> {
        RegionBoundary::ALL.into_iter().zip(self.rays.iter())
    }

    /// Returns whether every ray is fully defined.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rays.iter().all(BoundaryRay::is_finite)
    }

    /// Returns whether each ray is the reflection of the ray five slots
    /// away, through `center`, within `tolerance`.
    #[must_use]
    pub fn is_point_symmetric(&self, center: &Point2, tolerance: f64) -> bool {
        RegionBoundary::ALL.iter().all(|&slot| {
            let expected = self[slot].reflected(center);
            let actual = &self[slot.reflected()];
            (expected.outer - actual.outer).norm() <= tolerance
                && (expected.inner - actual.inner).norm() <= tolerance
        })
    }
}

impl Index<RegionBoundary> for BoundarySet {
    type Output = BoundaryRay;

    fn index(&self, slot: RegionBoundary) -> &BoundaryRay {
        &self.rays[slot.index()]
    }
}

impl IndexMut<RegionBoundary> for BoundarySet {
    fn index_mut(&mut self, slot: RegionBoundary) -> &mut BoundaryRay {
        &mut self.rays[slot.index()]
    }
}
