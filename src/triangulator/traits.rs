use crate::errors::TriangulationError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// The contours of one planar polygon, handed to a [`Triangulator`].
///
/// Input vertices are numbered exterior first, then each interior contour in
/// order, preserving the order within each contour.
#[derive(Debug, Clone)]
pub struct TessellationInput<'a> {
    pub exterior: &'a [Point3<Real>],
    pub interiors: Vec<&'a [Point3<Real>]>,
    /// Plane hint. Need not be unit length, must not be zero.
    pub normal: Vector3<Real>,
}

impl<'a> TessellationInput<'a> {
    pub const fn new(exterior: &'a [Point3<Real>], normal: Vector3<Real>) -> Self {
        TessellationInput {
            exterior,
            interiors: Vec::new(),
            normal,
        }
    }

    pub fn with_interior(mut self, interior: &'a [Point3<Real>]) -> Self {
        self.interiors.push(interior);
        self
    }

    /// Total number of input vertices.
    pub fn len(&self) -> usize {
        self.exterior.len() + self.interiors.iter().map(|c| c.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contours in vertex-numbering order, each with the index of its first vertex.
    pub fn contours(&self) -> impl Iterator<Item = (usize, &'a [Point3<Real>])> + '_ {
        let mut offset = 0;
        std::iter::once(self.exterior)
            .chain(self.interiors.iter().copied())
            .map(move |contour| {
                let start = offset;
                offset += contour.len();
                (start, contour)
            })
    }

    /// Input vertex by global index.
    pub fn vertex(&self, index: usize) -> Option<Point3<Real>> {
        self.contours()
            .find(|(start, contour)| index < start + contour.len())
            .and_then(|(start, contour)| contour.get(index - start).copied())
    }
}

/// A point the triangulator had to create (e.g. where constraint edges cross).
///
/// `sources` are convex weights over input vertices; per-vertex attributes of
/// the new point are the weighted sum of those of its sources.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedVertex {
    pub position: Point3<Real>,
    pub sources: Vec<(u32, Real)>,
}

/// Result of a triangulation.
///
/// Indices come in triples. An index below the input vertex count refers to an
/// input vertex; larger indices refer to `inserted[index - input_len]`.
/// Triangles are wound counter-clockwise seen from the tip of the normal hint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    pub indices: Vec<u32>,
    pub inserted: Vec<InsertedVertex>,
}

impl Tessellation {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Decomposes a planar polygon with holes into triangles.
///
/// Implementations are not expected to be re-entrant; use one instance per
/// concurrently running tessellation.
pub trait Triangulator {
    fn triangulate(
        &mut self,
        input: &TessellationInput<'_>,
    ) -> Result<Tessellation, TriangulationError>;
}
