use super::{ProjectedContours, Tessellation, TessellationInput, Triangulator};
use crate::errors::TriangulationError;
use geo::TriangulateSpade;
use geo::algorithm::triangulate_spade::SpadeTriangulationConfig;

/// Constrained Delaunay triangulation through `geo`'s `spade` back-end.
///
/// Spade splits constraint edges where contours cross or touch; those split
/// points come back as inserted vertices.
#[derive(Debug, Clone, Copy)]
pub struct SpadeTriangulator {
    /// Points closer than this are snapped together by the back-end.
    pub snap_radius: f64,
}

impl SpadeTriangulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SpadeTriangulator {
    fn default() -> Self {
        SpadeTriangulator {
            snap_radius: SpadeTriangulationConfig::<f64>::default().snap_radius,
        }
    }
}

impl Triangulator for SpadeTriangulator {
    fn triangulate(
        &mut self,
        input: &TessellationInput<'_>,
    ) -> Result<Tessellation, TriangulationError> {
        let mut contours = ProjectedContours::new(input)?;

        let config = SpadeTriangulationConfig {
            snap_radius: self.snap_radius,
        };
        let Ok(triangles) = contours.to_geo_polygon().constrained_triangulation(config) else {
            return Err(TriangulationError::Backend(
                "constrained triangulation failed".to_string(),
            ));
        };

        for triangle in triangles {
            contours.push_triangle([triangle.0, triangle.1, triangle.2]);
        }

        Ok(contours.into_tessellation())
    }
}
