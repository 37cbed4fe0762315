use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};
use crate::regions::BoundarySet;

/// One of the four edges of a [`Bounds`] box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxEdge {
    Left,
    Right,
    Bottom,
    Top,
}

/// Axis-aligned crossplot bounds `[xmin, xmax] x [ymin, ymax]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Bounds {
    /// Creates new bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is not finite or a range is empty.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        if ![xmin, xmax, ymin, ymax].iter().all(|v| v.is_finite()) || xmin >= xmax || ymin >= ymax
        {
            return Err(GeometryError::Degenerate(format!(
                "invalid bounds [{xmin}, {xmax}] x [{ymin}, {ymax}]"
            ))
            .into());
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Square bounds `[-half, half]` on both axes. `half` must be positive.
    pub(crate) fn centered_square(half: f64) -> Self {
        Self {
            xmin: -half,
            xmax: half,
            ymin: -half,
            ymax: half,
        }
    }

    /// Returns the smallest bounds enclosing every outer boundary point.
    ///
    /// Used to recover the crossplot extent after loading saved boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the outer points are not finite or span no area.
    pub fn enclosing_outer_points(boundaries: &BoundarySet) -> Result<Self> {
        if !boundaries.is_finite() {
            return Err(GeometryError::Degenerate("region boundaries are not all set".into()).into());
        }
        let mut xmin = f64::MAX;
        let mut xmax = -f64::MAX;
        let mut ymin = f64::MAX;
        let mut ymax = -f64::MAX;
        for (_, ray) in boundaries.iter() {
            xmin = xmin.min(ray.outer.x);
            xmax = xmax.max(ray.outer.x);
            ymin = ymin.min(ray.outer.y);
            ymax = ymax.max(ray.outer.y);
        }
        Self::new(xmin, xmax, ymin, ymax)
    }

    #[must_use]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[must_use]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[must_use]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[must_use]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Half of the horizontal extent.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.xmax - self.xmin) / 2.0
    }

    /// Returns whether the point lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }

    /// Returns whether the point lies on the given edge line, within a
    /// tolerance scaled to the magnitude of the limits.
    #[must_use]
    pub fn on_edge(&self, point: &Point2, edge: BoxEdge) -> bool {
        let (value, limit) = match edge {
            BoxEdge::Left => (point.x, self.xmin),
            BoxEdge::Right => (point.x, self.xmax),
            BoxEdge::Bottom => (point.y, self.ymin),
            BoxEdge::Top => (point.y, self.ymax),
        };
        (value - limit).abs() <= self.edge_tolerance()
    }

    fn edge_tolerance(&self) -> f64 {
        let scale = [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .fold(1.0_f64, |scale, v| scale.max(v.abs()));
        TOLERANCE * scale
    }

    /// Returns the corner where two perpendicular edges meet.
    ///
    /// Returns `None` for parallel edges.
    #[must_use]
    pub fn corner(&self, a: BoxEdge, b: BoxEdge) -> Option<Point2> {
        use BoxEdge::{Bottom, Left, Right, Top};
        let (x, y) = match (a, b) {
            (Left, Bottom) | (Bottom, Left) => (self.xmin, self.ymin),
            (Left, Top) | (Top, Left) => (self.xmin, self.ymax),
            (Right, Bottom) | (Bottom, Right) => (self.xmax, self.ymin),
            (Right, Top) | (Top, Right) => (self.xmax, self.ymax),
            _ => return None,
        };
        Some(Point2::new(x, y))
    }
}
