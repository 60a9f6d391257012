//! Struct and functions for working with the boundary rings a `Polygon` is built from.

use crate::errors::ValidationError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Whether a ring bounds the polygon or cuts a hole into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingKind {
    Exterior,
    Interior,
}

/// A closed loop of 3D points. The last point implicitly connects to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    id: String,
    kind: RingKind,
    vertices: Vec<Point3<Real>>,
}

/// What [`LinearRing::remove_duplicate_vertices`] did to a ring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RingCleanup {
    /// Original indices of the points that survived, in order.
    pub kept: Vec<usize>,
    /// Points dropped because they coincided with a neighbour.
    pub duplicates: usize,
    /// Points dropped because a coordinate was NaN or infinite.
    pub non_finite: usize,
}

impl RingCleanup {
    pub const fn removed(&self) -> usize {
        self.duplicates + self.non_finite
    }
}

impl LinearRing {
    pub fn new(id: impl Into<String>, kind: RingKind) -> Self {
        LinearRing {
            id: id.into(),
            kind,
            vertices: Vec::new(),
        }
    }

    /// Build a ring from a point list in one go.
    pub fn with_vertices(
        id: impl Into<String>,
        kind: RingKind,
        vertices: impl IntoIterator<Item = Point3<Real>>,
    ) -> Self {
        LinearRing {
            id: id.into(),
            kind,
            vertices: vertices.into_iter().collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn kind(&self) -> RingKind {
        self.kind
    }

    pub const fn is_exterior(&self) -> bool {
        matches!(self.kind, RingKind::Exterior)
    }

    pub fn add_vertex(&mut self, point: Point3<Real>) {
        self.vertices.push(point);
    }

    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Remove points that coincide with their predecessor (within `tolerance`),
    /// treating the ring as cyclic, and points with non-finite coordinates.
    ///
    /// GML rings usually repeat their first point at the end; that closing point
    /// is removed here like any other duplicate.
    ///
    /// The returned [`RingCleanup::kept`] lists the original index of every
    /// surviving point so per-vertex data (texture coordinates) can follow.
    pub fn remove_duplicate_vertices(&mut self, tolerance: Real) -> RingCleanup {
        let tolerance_sq = tolerance * tolerance;
        let mut cleanup = RingCleanup::default();
        let mut kept_points: Vec<Point3<Real>> = Vec::with_capacity(self.vertices.len());

        for (index, point) in self.vertices.iter().enumerate() {
            if !point.coords.iter().all(|c| c.is_finite()) {
                cleanup.non_finite += 1;
                continue;
            }
            if let Some(previous) = kept_points.last() {
                if (point - previous).norm_squared() <= tolerance_sq {
                    cleanup.duplicates += 1;
                    continue;
                }
            }
            kept_points.push(*point);
            cleanup.kept.push(index);
        }

        // wrap-around: trailing points that close onto the first one
        while kept_points.len() > 1 {
            let (first, last) = (kept_points[0], kept_points[kept_points.len() - 1]);
            if (last - first).norm_squared() > tolerance_sq {
                break;
            }
            kept_points.pop();
            cleanup.kept.pop();
            cleanup.duplicates += 1;
        }

        self.vertices = kept_points;
        cleanup
    }

    /// A ring is usable for geometry when it keeps at least 3 points.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(point) = self
            .vertices
            .iter()
            .find(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(ValidationError::InvalidCoordinate {
                ring: self.id.clone(),
                point: *point,
            });
        }
        if self.vertices.len() < 3 {
            return Err(ValidationError::TooFewPoints {
                ring: self.id.clone(),
                count: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// **Mathematical Foundation: Newell's method**
    ///
    /// Accumulates the cross products of successive vertices:
    /// ```text
    /// N = Σ (pᵢ - c) × (pᵢ₊₁ - c)
    /// ```
    /// with `c` the first vertex (keeps the sums well conditioned far from
    /// the origin). The result is not normalized; its length is twice the
    /// area enclosed by the ring, and it points along the side from which the
    /// ring appears counter-clockwise. Works for concave and slightly
    /// non-planar rings, unlike a normal taken from the first three points.
    pub fn newell_normal(&self) -> Vector3<Real> {
        let n = self.vertices.len();
        if n < 3 {
            return Vector3::zeros();
        }

        let origin = self.vertices[0];
        let mut normal = Vector3::zeros();
        for i in 0..n {
            let current = self.vertices[i] - origin;
            let next = self.vertices[(i + 1) % n] - origin;
            normal += current.cross(&next);
        }
        normal
    }

    /// Area enclosed by the ring, measured in its own plane.
    pub fn area(&self) -> Real {
        self.newell_normal().norm() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> LinearRing {
        LinearRing::with_vertices(
            "sq",
            RingKind::Exterior,
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
        )
    }

    #[test]
    fn closing_point_is_removed() {
        let mut ring = square();
        ring.add_vertex(Point3::new(0.0, 0.0, 0.0));

        let cleanup = ring.remove_duplicate_vertices(1e-6);
        assert_eq!(ring.len(), 4);
        assert_eq!(cleanup.kept, vec![0, 1, 2, 3]);
        assert_eq!(cleanup.duplicates, 1);
    }

    #[test]
    fn adjacent_duplicates_within_tolerance_are_removed() {
        let mut ring = LinearRing::with_vertices(
            "r",
            RingKind::Interior,
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1e-9),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        );

        let cleanup = ring.remove_duplicate_vertices(1e-6);
        assert_eq!(cleanup.kept, vec![0, 2, 4]);
        assert_eq!(cleanup.removed(), 2);
        assert!(ring.validate().is_ok());
    }

    #[test]
    fn non_finite_points_are_dropped() {
        let mut ring = square();
        ring.add_vertex(Point3::new(Real::NAN, 0.0, 0.0));
        assert!(matches!(
            ring.validate(),
            Err(ValidationError::InvalidCoordinate { .. })
        ));

        let cleanup = ring.remove_duplicate_vertices(1e-6);
        assert_eq!(cleanup.non_finite, 1);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn collapsed_ring_fails_validation() {
        let mut ring = LinearRing::with_vertices(
            "flat",
            RingKind::Interior,
            [Point3::new(1.0, 1.0, 1.0); 5],
        );
        ring.remove_duplicate_vertices(1e-6);
        assert_eq!(ring.len(), 1);
        assert_eq!(
            ring.validate(),
            Err(ValidationError::TooFewPoints {
                ring: "flat".to_string(),
                count: 1
            })
        );
    }

    #[test]
    fn newell_normal_of_concave_ring() {
        // L-shape, counter-clockwise seen from +Z; first three points are collinear
        let ring = LinearRing::with_vertices(
            "L",
            RingKind::Exterior,
            [
                Point3::new(0.0, 0.0, 5.0),
                Point3::new(1.0, 0.0, 5.0),
                Point3::new(2.0, 0.0, 5.0),
                Point3::new(2.0, 1.0, 5.0),
                Point3::new(1.0, 1.0, 5.0),
                Point3::new(1.0, 2.0, 5.0),
                Point3::new(0.0, 2.0, 5.0),
            ],
        );
        let normal = ring.newell_normal().normalize();
        assert_relative_eq!(normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(ring.area(), 3.0, epsilon = 1e-12);
    }
}
