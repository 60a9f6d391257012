//! Error types

use crate::float_types::Real;
use nalgebra::Point3;

/// Issues found while validating a single boundary ring.
///
/// These never abort a polygon: the polygon reports them as warnings and
/// degrades to less (or no) geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewPoints) A ring has fewer than 3 distinct points
    #[error("(TooFewPoints) ring {ring} has {count} distinct points, at least 3 are required")]
    TooFewPoints { ring: String, count: usize },
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) ring {ring} contains a NaN or infinite coordinate ({point})")]
    InvalidCoordinate { ring: String, point: Point3<Real> },
    /// (ZeroArea) The ring does not span a plane
    #[error("(ZeroArea) ring {ring} has zero area and does not define a normal")]
    ZeroArea { ring: String },
}

/// Rejections of operations that are illegal in the polygon's current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolygonError {
    /// The polygon was already finished; its geometry is frozen.
    #[error("polygon {id} is already finished")]
    AlreadyFinished { id: String },
    /// The handle does not belong to the factory it was used with.
    #[error("unknown polygon handle {0}")]
    UnknownHandle(usize),
}

/// Failures reported by a [`Triangulator`](crate::triangulator::Triangulator).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangulationError {
    /// The input has no usable exterior contour.
    #[error("exterior contour has {0} points, at least 3 are required")]
    DegenerateInput(usize),
    /// The plane hint is zero or not finite.
    #[error("normal hint ({0}) cannot define a projection plane")]
    InvalidNormal(nalgebra::Vector3<Real>),
    /// The back-end rejected the projected polygon.
    #[error("triangulation back-end failed: {0}")]
    Backend(String),
}
