use crate::float_types::TexCoord;
use hashbrown::HashMap;
use nalgebra::Vector4;
use std::sync::Arc;

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    None,
    Wrap,
    Mirror,
    Clamp,
    Border,
}

/// An image referenced by URL. Shared (via `Arc`) by every surface that uses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    id: String,
    url: String,
    pub repeat: bool,
    pub wrap_mode: WrapMode,
    pub border_color: Vector4<f32>,
}

impl Texture {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Texture {
            id: id.into(),
            url: url.into(),
            repeat: false,
            wrap_mode: WrapMode::default(),
            border_color: Vector4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self.repeat = matches!(wrap_mode, WrapMode::Wrap | WrapMode::Mirror);
        self
    }
}

/// A texture bound to one side of a surface, together with the texture
/// coordinates of each ring of that surface.
///
/// Coordinates are keyed by ring id and are expected to have one entry per
/// raw ring point (before duplicate removal).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    texture: Arc<Texture>,
    ring_coordinates: HashMap<String, Vec<TexCoord>>,
}

impl TextureBinding {
    pub fn new(texture: Arc<Texture>) -> Self {
        TextureBinding {
            texture,
            ring_coordinates: HashMap::new(),
        }
    }

    /// Attach the coordinates for `ring_id`, replacing earlier ones.
    pub fn with_ring_coordinates(
        mut self,
        ring_id: impl Into<String>,
        coordinates: Vec<TexCoord>,
    ) -> Self {
        self.set_ring_coordinates(ring_id, coordinates);
        self
    }

    pub fn set_ring_coordinates(&mut self, ring_id: impl Into<String>, coordinates: Vec<TexCoord>) {
        self.ring_coordinates.insert(ring_id.into(), coordinates);
    }

    pub const fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn ring_coordinates(&self, ring_id: &str) -> Option<&[TexCoord]> {
        self.ring_coordinates.get(ring_id).map(Vec::as_slice)
    }
}
