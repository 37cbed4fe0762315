use thiserror::Error;

use crate::regions::{AvoClass, RegionBoundary};

/// Top-level error type for the AVO region classification engine.
#[derive(Debug, Error)]
pub enum AbavoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is invalid")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while building region boundaries and class regions.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("the background ({background}) and maximum ({maximum}) ellipse slopes do not match")]
    SlopeMismatch { background: f64, maximum: f64 },

    #[error("the {0} boundary probe does not intersect the background ellipse")]
    MissedIntersection(RegionBoundary),

    #[error("closure of region {class} failed: make sure region boundaries do not cross")]
    RegionsCross { class: AvoClass },

    #[error("region {class} is not convex: make sure region boundaries do not cross")]
    NotConvex { class: AvoClass },
}

/// Errors related to operation inputs.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid property {key} = {value:?}")]
    InvalidProperty { key: String, value: String },
}

/// Errors related to ellipse outline sampling.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`AbavoError`].
pub type Result<T> = std::result::Result<T, AbavoError>;
