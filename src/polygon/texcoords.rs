use super::Polygon;
use crate::appearance::Side;
use crate::float_types::{Real, TexCoord};
use crate::ring::LinearRing;
use nalgebra::Point2;

/// Texture coordinates of one (theme, side) binding, aligned with the vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TexChannel {
    pub(crate) theme: String,
    pub(crate) side: Side,
    pub(crate) coords: Vec<TexCoord>,
}

impl TexChannel {
    /// Weighted sum of existing coordinates, for a vertex created by the triangulator.
    pub(crate) fn push_interpolated(&mut self, sources: &[(u32, Real)]) {
        let mut uv = Point2::origin();
        for &(index, weight) in sources {
            if let Some(source) = self.coords.get(index as usize) {
                uv += source.coords * weight as f32;
            }
        }
        self.coords.push(uv);
    }
}

impl Polygon {
    /// Collect the texture coordinates of every bound texture for `rings`, in
    /// order. `kept` holds, per ring, the original indices of its surviving points.
    ///
    /// Rings without matching coordinates get `(0, 0)` so every channel stays
    /// aligned with the vertex buffer.
    pub(super) fn gather_tex_channels(
        &self,
        rings: &[(&LinearRing, &[usize])],
    ) -> Vec<TexChannel> {
        let mut channels = Vec::new();

        for (theme, side, binding) in self.appearance.texture_bindings() {
            let mut coords = Vec::with_capacity(rings.iter().map(|(_, k)| k.len()).sum());

            for &(ring, kept) in rings {
                let raw = binding.ring_coordinates(ring.id());
                match raw {
                    Some(raw) if kept.iter().all(|&k| k < raw.len()) => {
                        coords.extend(kept.iter().map(|&k| raw[k]));
                    },
                    Some(raw) => {
                        self.warn(format!(
                            "ring {} has {} texture coordinates for theme {theme}, which do not cover its vertices; using (0, 0)",
                            ring.id(),
                            raw.len(),
                        ));
                        coords.extend(std::iter::repeat_n(Point2::origin(), kept.len()));
                    },
                    None => {
                        self.warn(format!(
                            "ring {} has no texture coordinates for theme {theme}; using (0, 0)",
                            ring.id(),
                        ));
                        coords.extend(std::iter::repeat_n(Point2::origin(), kept.len()));
                    },
                }
            }

            channels.push(TexChannel {
                theme: theme.to_string(),
                side,
                coords,
            });
        }

        channels
    }
}
