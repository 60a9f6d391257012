use super::{FinishedGeometry, Polygon};
use crate::float_types::Real;
use crate::ring::LinearRing;
use crate::triangulator::{TessellationInput, Triangulator};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

impl Polygon {
    /// Fill the vertex buffer and build the matching triangle list.
    ///
    /// Uses a fan when `tesselate` is off and the polygon has no holes, or
    /// when the exterior is already a triangle; every other case goes through
    /// the triangulator.
    pub(super) fn compute_indices(
        &self,
        tesselate: bool,
        triangulator: &mut dyn Triangulator,
        normal: Vector3<Real>,
        kept: &[Vec<usize>],
    ) -> FinishedGeometry {
        let Some(exterior) = &self.exterior else {
            return FinishedGeometry::empty(Some(normal));
        };

        let rings: Vec<(&LinearRing, &[usize])> = std::iter::once(exterior)
            .chain(self.interiors.iter())
            .zip(kept.iter().map(Vec::as_slice))
            .collect();

        let bare_triangle = self.interiors.is_empty() && exterior.len() == 3;
        if bare_triangle || (!tesselate && self.interiors.is_empty()) {
            self.create_simple_indices(exterior, normal, &rings)
        } else {
            self.create_indices_with_tessellation(triangulator, normal, &rings)
        }
    }

    /// Triangle fan around the first exterior vertex. Only valid for convex rings.
    fn create_simple_indices(
        &self,
        exterior: &LinearRing,
        normal: Vector3<Real>,
        rings: &[(&LinearRing, &[usize])],
    ) -> FinishedGeometry {
        let vertices = exterior.vertices().to_vec();
        let n = vertices.len() as u32;

        let mut indices = Vec::with_capacity(3 * (vertices.len().saturating_sub(2)));
        for i in 0..n.saturating_sub(2) {
            indices.extend_from_slice(&[0, i + 1, i + 2]);
        }

        FinishedGeometry {
            vertices,
            indices,
            normal: Some(normal),
            tex_channels: self.gather_tex_channels(&rings[..1]),
        }
    }

    fn create_indices_with_tessellation(
        &self,
        triangulator: &mut dyn Triangulator,
        normal: Vector3<Real>,
        rings: &[(&LinearRing, &[usize])],
    ) -> FinishedGeometry {
        let Some(&(exterior, _)) = rings.first() else {
            return FinishedGeometry::empty(Some(normal));
        };
        let mut input = TessellationInput::new(exterior.vertices(), normal);
        for (ring, _) in &rings[1..] {
            input = input.with_interior(ring.vertices());
        }

        let tessellation = match triangulator.triangulate(&input) {
            Ok(tessellation) => tessellation,
            Err(err) => {
                self.warn(format!("triangulation failed, no geometry generated: {err}"));
                return FinishedGeometry::empty(Some(normal));
            },
        };
        if tessellation.indices.is_empty() {
            self.warn("triangulator produced no triangles");
            return FinishedGeometry::empty(Some(normal));
        }

        let input_len = input.len();
        let vertex_count = input_len + tessellation.inserted.len();
        let out_of_range = tessellation
            .indices
            .iter()
            .find(|&&i| i as usize >= vertex_count);
        if tessellation.indices.len() % 3 != 0 || out_of_range.is_some() {
            self.warn(format!(
                "triangulator returned an invalid triangle list ({} indices, {} vertices)",
                tessellation.indices.len(),
                vertex_count
            ));
            return FinishedGeometry::empty(Some(normal));
        }

        let mut vertices = Vec::with_capacity(vertex_count);
        for (ring, _) in rings {
            vertices.extend_from_slice(ring.vertices());
        }
        let mut tex_channels = self.gather_tex_channels(rings);
        for inserted in &tessellation.inserted {
            vertices.push(inserted.position);
            for channel in &mut tex_channels {
                channel.push_interpolated(&inserted.sources);
            }
        }

        FinishedGeometry {
            vertices,
            indices: tessellation.indices,
            normal: Some(normal),
            tex_channels,
        }
    }
}

/// Grid cell of a position, for merging vertices that agree within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QuantizedPoint(i64, i64, i64);

fn quantize_point(p: &Point3<Real>, factor: Real) -> QuantizedPoint {
    QuantizedPoint(
        (p.x * factor).round() as i64,
        (p.y * factor).round() as i64,
        (p.z * factor).round() as i64,
    )
}

impl FinishedGeometry {
    /// Merge vertices that share a tolerance cell and carry bit-identical
    /// texture coordinates in every channel, compacting all buffers. Triangles
    /// that collapse are removed. Returns the number of vertices merged away.
    pub(super) fn optimize(&mut self, tolerance: Real) -> usize {
        let factor = 1.0 / tolerance;
        let mut cells: HashMap<(QuantizedPoint, Vec<(u32, u32)>), u32> =
            HashMap::with_capacity(self.vertices.len());
        let mut remap = Vec::with_capacity(self.vertices.len());
        let mut vertices = Vec::with_capacity(self.vertices.len());
        let mut channels: Vec<Vec<_>> = self
            .tex_channels
            .iter()
            .map(|c| Vec::with_capacity(c.coords.len()))
            .collect();

        for (index, position) in self.vertices.iter().enumerate() {
            let uvs: Vec<(u32, u32)> = self
                .tex_channels
                .iter()
                .map(|c| (c.coords[index].x.to_bits(), c.coords[index].y.to_bits()))
                .collect();
            let key = (quantize_point(position, factor), uvs);

            let next = vertices.len() as u32;
            let target = *cells.entry(key).or_insert(next);
            if target == next {
                vertices.push(*position);
                for (out, channel) in channels.iter_mut().zip(&self.tex_channels) {
                    out.push(channel.coords[index]);
                }
            }
            remap.push(target);
        }

        let merged = self.vertices.len() - vertices.len();

        let mut indices = Vec::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            ];
            if a != b && b != c && a != c {
                indices.extend_from_slice(&[a, b, c]);
            }
        }

        self.vertices = vertices;
        self.indices = indices;
        for (channel, coords) in self.tex_channels.iter_mut().zip(channels) {
            channel.coords = coords;
        }
        merged
    }

    /// Negate the normal and reverse the winding of every triangle.
    pub(super) fn flip(&mut self) {
        self.normal = self.normal.map(|n| -n);
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Side;
    use crate::polygon::texcoords::TexChannel;
    use nalgebra::Point2;

    fn quad_with_duplicate_corner() -> FinishedGeometry {
        FinishedGeometry {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 4, 3],
            normal: Some(Vector3::z()),
            tex_channels: Vec::new(),
        }
    }

    #[test]
    fn optimize_merges_coincident_vertices() {
        let mut geometry = quad_with_duplicate_corner();
        assert_eq!(geometry.optimize(1e-6), 1);
        assert_eq!(geometry.vertices.len(), 4);
        assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn optimize_keeps_vertices_with_different_uvs() {
        let mut geometry = quad_with_duplicate_corner();
        geometry.tex_channels.push(TexChannel {
            theme: "rgb".to_string(),
            side: Side::Front,
            coords: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
                Point2::new(0.5, 0.5),
            ],
        });
        assert_eq!(geometry.optimize(1e-6), 0);
        assert_eq!(geometry.vertices.len(), 5);
        assert_eq!(geometry.tex_channels[0].coords.len(), 5);
    }

    #[test]
    fn optimize_drops_collapsed_triangles() {
        let mut geometry = FinishedGeometry {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            normal: Some(Vector3::z()),
            tex_channels: Vec::new(),
        };
        assert_eq!(geometry.optimize(1e-6), 1);
        assert_eq!(geometry.indices, vec![0, 1, 2]);
    }

    #[test]
    fn flip_swaps_last_two_indices() {
        let mut geometry = quad_with_duplicate_corner();
        geometry.flip();
        assert_eq!(geometry.indices, vec![0, 2, 1, 0, 3, 4]);
        assert_eq!(geometry.normal, Some(-Vector3::z()));
    }
}
