use std::fmt;

use crate::math::polygon_2d::{left_of_path, signed_area_2d};
use crate::math::Point2;

/// Number of class regions (eight classes plus two null wedges).
pub const REGION_COUNT: usize = 10;

/// Maximum vertex count of a class region polygon.
pub const MAX_REGION_VERTICES: usize = 5;

/// The eight AVO classes and the two null transition wedges.
///
/// Top classes carry a positive sign, base classes a negative one; the
/// class number fixes the base fraction of the classification value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvoClass {
    TopClass1,
    TopClass2,
    TopClass3,
    TopClass4,
    /// Wedge between Class IV (Top) and Class I (Base).
    TopNull,
    BaseClass1,
    BaseClass2,
    BaseClass3,
    BaseClass4,
    /// Wedge between Class IV (Base) and Class I (Top).
    BaseNull,
}

impl AvoClass {
    /// Regions in the fixed scan order of the classifier.
    ///
    /// Region `i` lies between two consecutive boundaries of the ring; the
    /// first region follows the Class I/II (Top) boundary.
    pub const RING: [AvoClass; REGION_COUNT] = [
        AvoClass::TopClass2,
        AvoClass::TopClass3,
        AvoClass::TopClass4,
        AvoClass::TopNull,
        AvoClass::BaseClass1,
        AvoClass::BaseClass2,
        AvoClass::BaseClass3,
        AvoClass::BaseClass4,
        AvoClass::BaseNull,
        AvoClass::TopClass1,
    ];

    /// Position of the class in [`AvoClass::RING`].
    #[must_use]
    pub fn ring_index(self) -> usize {
        match self {
            AvoClass::TopClass2 => 0,
            AvoClass::TopClass3 => 1,
            AvoClass::TopClass4 => 2,
            AvoClass::TopNull => 3,
            AvoClass::BaseClass1 => 4,
            AvoClass::BaseClass2 => 5,
            AvoClass::BaseClass3 => 6,
            AvoClass::BaseClass4 => 7,
            AvoClass::BaseNull => 8,
            AvoClass::TopClass1 => 9,
        }
    }

    /// Sign of the classification value: +1 top, -1 base, 0 null.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            AvoClass::TopClass1 | AvoClass::TopClass2 | AvoClass::TopClass3 | AvoClass::TopClass4 => {
                1.0
            }
            AvoClass::BaseClass1
            | AvoClass::BaseClass2
            | AvoClass::BaseClass3
            | AvoClass::BaseClass4 => -1.0,
            AvoClass::TopNull | AvoClass::BaseNull => 0.0,
        }
    }

    /// Offset of the class within the unit classification range.
    #[must_use]
    pub fn base_fraction(self) -> f64 {
        match self {
            AvoClass::TopClass2 | AvoClass::BaseClass2 => 0.25,
            AvoClass::TopClass3 | AvoClass::BaseClass3 => 0.5,
            AvoClass::TopClass4 | AvoClass::BaseClass4 => 0.75,
            AvoClass::TopClass1 | AvoClass::BaseClass1 | AvoClass::TopNull | AvoClass::BaseNull => {
                0.0
            }
        }
    }

    /// Returns whether the class is one of the two null wedges.
    #[must_use]
    pub fn is_null(self) -> bool {
        matches!(self, AvoClass::TopNull | AvoClass::BaseNull)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AvoClass::TopClass1 => "Class I (Top)",
            AvoClass::TopClass2 => "Class II (Top)",
            AvoClass::TopClass3 => "Class III (Top)",
            AvoClass::TopClass4 => "Class IV (Top)",
            AvoClass::TopNull => "NULL (Top to Base)",
            AvoClass::BaseClass1 => "Class I (Base)",
            AvoClass::BaseClass2 => "Class II (Base)",
            AvoClass::BaseClass3 => "Class III (Base)",
            AvoClass::BaseClass4 => "Class IV (Base)",
            AvoClass::BaseNull => "NULL (Base to Top)",
        }
    }
}

impl fmt::Display for AvoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A convex, counter-clockwise class region polygon with 4 or 5 vertices.
///
/// Vertices are stored inline so classification never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassRegion {
    class: AvoClass,
    vertices: [Point2; MAX_REGION_VERTICES],
    len: usize,
}

impl ClassRegion {
    /// Creates a region from its four wedge vertices and an optional
    /// closing corner.
    #[must_use]
    pub fn new(class: AvoClass, wedge: [Point2; 4], corner: Option<Point2>) -> Self {
        let mut vertices = [Point2::origin(); MAX_REGION_VERTICES];
        vertices[..4].copy_from_slice(&wedge);
        let len = match corner {
            Some(c) => {
                vertices[4] = c;
                5
            }
            None => 4,
        };
        Self {
            class,
            vertices,
            len,
        }
    }

    #[must_use]
    pub fn class(&self) -> AvoClass {
        self.class
    }

    /// The polygon vertices, in counter-clockwise order.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices[..self.len]
    }

    /// Returns whether the point lies in the region's wedge: on the inner
    /// side of both boundary rays and outside the chord between the two
    /// inner points.
    ///
    /// The wedge is open toward the bounds, so points beyond the plot extent
    /// still belong to the region their rays point at. The closing edges are
    /// only used for drawing and area.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        left_of_path(point, &self.vertices[..4])
    }

    /// Polygon area (positive for counter-clockwise regions).
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(self.vertices())
    }
}
