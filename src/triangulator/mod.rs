//! Triangulation of planar polygons with holes.
//!
//! The polygon is projected onto its own plane, triangulated in 2D by one of
//! the `geo` back-ends, and the 2D triangles are mapped back onto the input
//! vertices. Points a back-end creates on its own become
//! [`InsertedVertex`]es located on the nearest input edge.

use crate::errors::TriangulationError;
use crate::float_types::{Real, tolerance};
use geo::{Coord, LineString, Polygon as GeoPolygon};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

mod traits;
pub use traits::*;

#[cfg(feature = "earcut")]
mod earcut;
#[cfg(feature = "earcut")]
pub use earcut::EarcutTriangulator;

#[cfg(feature = "delaunay")]
mod delaunay;
#[cfg(feature = "delaunay")]
pub use delaunay::SpadeTriangulator;

/// The triangulator used when the caller does not care which back-end runs.
#[cfg(feature = "earcut")]
pub type DefaultTriangulator = EarcutTriangulator;
/// The triangulator used when the caller does not care which back-end runs.
#[cfg(all(feature = "delaunay", not(feature = "earcut")))]
pub type DefaultTriangulator = SpadeTriangulator;

/// Build orthonormal basis for 2D projection.
///
/// `(u, v, n)` is right-handed, so a contour that is counter-clockwise about
/// `n` in 3D stays counter-clockwise in `(u, v)` coordinates.
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}

/// Bit-exact key of a projected coordinate. `-0.0` and `0.0` share a key.
fn coord_key(c: Coord<Real>) -> (u64, u64) {
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

/// Twice the signed area of a 2D triangle, positive when counter-clockwise.
fn signed_area_2d(a: Coord<Real>, b: Coord<Real>, c: Coord<Real>) -> Real {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Input contours projected onto their plane, plus the bookkeeping to turn 2D
/// triangles back into input (or inserted) vertex indices.
pub(crate) struct ProjectedContours {
    origin: Point3<Real>,
    u: Vector3<Real>,
    v: Vector3<Real>,
    points: Vec<Point3<Real>>,
    projected: Vec<Coord<Real>>,
    /// `(start, len)` of every contour, exterior first
    contours: Vec<(usize, usize)>,
    lookup: HashMap<(u64, u64), u32>,
    inserted_lookup: HashMap<(u64, u64), u32>,
    tessellation: Tessellation,
}

impl ProjectedContours {
    pub(crate) fn new(input: &TessellationInput<'_>) -> Result<Self, TriangulationError> {
        if input.exterior.len() < 3 {
            return Err(TriangulationError::DegenerateInput(input.exterior.len()));
        }
        let normal = input.normal;
        if !normal.iter().all(|c| c.is_finite()) || normal.norm_squared() == 0.0 {
            return Err(TriangulationError::InvalidNormal(normal));
        }

        let (u, v) = build_orthonormal_basis(normal);
        let origin = input.exterior[0];

        let mut points = Vec::with_capacity(input.len());
        let mut contours = Vec::with_capacity(1 + input.interiors.len());
        for (start, contour) in input.contours() {
            contours.push((start, contour.len()));
            points.extend_from_slice(contour);
        }

        let projected: Vec<Coord<Real>> = points
            .iter()
            .map(|p| {
                let offset = p - origin;
                Coord {
                    x: offset.dot(&u),
                    y: offset.dot(&v),
                }
            })
            .collect();

        let mut lookup = HashMap::with_capacity(projected.len());
        for (index, c) in projected.iter().enumerate() {
            // coincident points keep the first index
            lookup.entry(coord_key(*c)).or_insert(index as u32);
        }

        Ok(ProjectedContours {
            origin,
            u,
            v,
            points,
            projected,
            contours,
            lookup,
            inserted_lookup: HashMap::new(),
            tessellation: Tessellation::default(),
        })
    }

    /// The projected contours as a `geo` polygon (exterior + holes).
    pub(crate) fn to_geo_polygon(&self) -> GeoPolygon<Real> {
        let mut rings = self.contours.iter().map(|&(start, len)| {
            LineString::new(self.projected[start..start + len].to_vec())
        });
        let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
        GeoPolygon::new(exterior, rings.collect())
    }

    /// Record one 2D triangle, wound counter-clockwise.
    /// Triangles that collapse onto fewer than three vertices are skipped.
    pub(crate) fn push_triangle(&mut self, corners: [Coord<Real>; 3]) {
        let [a, b, c] = corners;
        let ia = self.resolve(a);
        let ib = self.resolve(b);
        let ic = self.resolve(c);
        if ia == ib || ib == ic || ia == ic {
            return;
        }

        if signed_area_2d(a, b, c) < 0.0 {
            self.tessellation.indices.extend_from_slice(&[ia, ic, ib]);
        } else {
            self.tessellation.indices.extend_from_slice(&[ia, ib, ic]);
        }
    }

    /// Map a 2D coordinate back to a vertex index: exact match first, then the
    /// nearest input vertex within tolerance, otherwise a new inserted vertex.
    fn resolve(&mut self, c: Coord<Real>) -> u32 {
        let key = coord_key(c);
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        if let Some(&index) = self.inserted_lookup.get(&key) {
            return index;
        }

        let tolerance_sq = tolerance() * tolerance();
        let nearest = self
            .projected
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (p.x - c.x).powi(2) + (p.y - c.y).powi(2)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((i, distance_sq)) = nearest {
            if distance_sq <= tolerance_sq {
                return i as u32;
            }
        }

        let vertex = self.locate_on_edge(c);
        let index = (self.points.len() + self.tessellation.inserted.len()) as u32;
        self.tessellation.inserted.push(vertex);
        self.inserted_lookup.insert(key, index);
        index
    }

    /// Place a back-end generated point on its nearest input edge.
    fn locate_on_edge(&self, c: Coord<Real>) -> InsertedVertex {
        let mut best: Option<(Real, usize, usize, Real)> = None;
        for &(start, len) in &self.contours {
            for k in 0..len {
                let a = start + k;
                let b = start + (k + 1) % len;
                let (pa, pb) = (self.projected[a], self.projected[b]);
                let (dx, dy) = (pb.x - pa.x, pb.y - pa.y);
                let length_sq = dx * dx + dy * dy;
                let t = if length_sq > 0.0 {
                    (((c.x - pa.x) * dx + (c.y - pa.y) * dy) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (pa.x + t * dx, pa.y + t * dy);
                let distance_sq = (c.x - qx).powi(2) + (c.y - qy).powi(2);
                if best.is_none_or(|(d, ..)| distance_sq < d) {
                    best = Some((distance_sq, a, b, t));
                }
            }
        }

        match best {
            Some((_, a, b, t)) => InsertedVertex {
                position: self.points[a] + (self.points[b] - self.points[a]) * t,
                sources: vec![(a as u32, 1.0 - t), (b as u32, t)],
            },
            // no edges at all; put the point on the plane without sources
            None => InsertedVertex {
                position: self.origin + self.u * c.x + self.v * c.y,
                sources: Vec::new(),
            },
        }
    }

    pub(crate) fn into_tessellation(self) -> Tessellation {
        self.tessellation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn basis_is_right_handed() {
        for n in [
            Vector3::z(),
            -Vector3::z(),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.3, 0.0, 0.1),
        ] {
            let (u, v) = build_orthonormal_basis(n);
            assert_relative_eq!(u.cross(&v), n.normalize(), epsilon = 1e-12);
            assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn unknown_coordinates_become_inserted_vertices() {
        let square = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        let input = TessellationInput::new(&square, Vector3::z());
        let mut contours = ProjectedContours::new(&input).expect("valid input");

        let projected_corner = contours.projected[1];
        assert_eq!(contours.resolve(projected_corner), 1);

        // midpoint of the first edge, in projected coordinates
        let (p0, p1) = (contours.projected[0], contours.projected[1]);
        let midpoint = Coord {
            x: (p0.x + p1.x) * 0.5,
            y: (p0.y + p1.y) * 0.5,
        };
        let index = contours.resolve(midpoint);
        assert_eq!(index, 4);
        assert_eq!(contours.resolve(midpoint), 4, "inserted points are reused");

        let tessellation = contours.into_tessellation();
        let inserted = &tessellation.inserted[0];
        assert_relative_eq!(inserted.position, Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(inserted.sources.len(), 2);
        assert_relative_eq!(inserted.sources[0].1, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_degenerate_input() {
        let line = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let input = TessellationInput::new(&line, Vector3::z());
        assert!(matches!(
            ProjectedContours::new(&input),
            Err(TriangulationError::DegenerateInput(2))
        ));

        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let input = TessellationInput::new(&tri, Vector3::zeros());
        assert!(matches!(
            ProjectedContours::new(&input),
            Err(TriangulationError::InvalidNormal(_))
        ));
    }
}
