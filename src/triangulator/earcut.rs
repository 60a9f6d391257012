use super::{ProjectedContours, Tessellation, TessellationInput, Triangulator};
use crate::errors::TriangulationError;
use geo::{Coord, TriangulateEarcut};

/// Ear-clipping triangulation through `geo`'s `earcutr` back-end.
///
/// Earcut never creates vertices, so its tessellations have no inserted points.
#[derive(Debug, Default, Clone, Copy)]
pub struct EarcutTriangulator;

impl EarcutTriangulator {
    pub const fn new() -> Self {
        EarcutTriangulator
    }
}

impl Triangulator for EarcutTriangulator {
    fn triangulate(
        &mut self,
        input: &TessellationInput<'_>,
    ) -> Result<Tessellation, TriangulationError> {
        let mut contours = ProjectedContours::new(input)?;

        let triangulation = contours.to_geo_polygon().earcut_triangles_raw();
        let vertices = triangulation.vertices;
        let corner = |i: usize| Coord {
            x: vertices[2 * i],
            y: vertices[2 * i + 1],
        };

        for tri in triangulation.triangle_indices.chunks_exact(3) {
            if tri.iter().any(|&i| 2 * i + 1 >= vertices.len()) {
                return Err(TriangulationError::Backend(format!(
                    "earcut referenced vertex {} of {}",
                    tri.iter().max().copied().unwrap_or_default(),
                    vertices.len() / 2
                )));
            }
            contours.push_triangle([corner(tri[0]), corner(tri[1]), corner(tri[2])]);
        }

        Ok(contours.into_tessellation())
    }
}
