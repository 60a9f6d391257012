//! Theme- and side-aware appearance lookup.
//!
//! An [`AppearanceTarget`] records which [`Material`] and [`Texture`] a surface
//! carries under each named theme, independently for its front and back side.
//! Geometry types compose one rather than inheriting lookup behaviour, and
//! expose the same queries by delegation.

use hashbrown::HashMap;
use std::sync::Arc;

mod material;
mod texture;

pub use material::Material;
pub use texture::{Texture, TextureBinding, WrapMode};

/// Which face of a surface an appearance applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub const fn from_front(front: bool) -> Self {
        if front { Side::Front } else { Side::Back }
    }

    pub const fn is_front(self) -> bool {
        matches!(self, Side::Front)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SideAppearance {
    material: Option<Arc<Material>>,
    texture: Option<TextureBinding>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ThemeAppearance {
    front: SideAppearance,
    back: SideAppearance,
}

impl ThemeAppearance {
    const fn side(&self, side: Side) -> &SideAppearance {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    const fn side_mut(&mut self, side: Side) -> &mut SideAppearance {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
        }
    }
}

/// Per-theme, per-side material and texture bindings of one surface.
///
/// A missing binding is a normal outcome and is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppearanceTarget {
    themes: HashMap<String, ThemeAppearance>,
}

impl AppearanceTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `material` to `side` under `theme`, returning the material it replaces.
    pub fn bind_material(
        &mut self,
        theme: impl Into<String>,
        side: Side,
        material: Arc<Material>,
    ) -> Option<Arc<Material>> {
        self.themes
            .entry(theme.into())
            .or_default()
            .side_mut(side)
            .material
            .replace(material)
    }

    /// Bind a texture (with its ring coordinates) to `side` under `theme`,
    /// returning the binding it replaces.
    pub fn bind_texture(
        &mut self,
        theme: impl Into<String>,
        side: Side,
        binding: TextureBinding,
    ) -> Option<TextureBinding> {
        self.themes
            .entry(theme.into())
            .or_default()
            .side_mut(side)
            .texture
            .replace(binding)
    }

    fn side(&self, theme: &str, side: Side) -> Option<&SideAppearance> {
        self.themes.get(theme).map(|t| t.side(side))
    }

    /// Exact lookup of the material for `theme` and `side`.
    pub fn material_for_side(&self, theme: &str, side: Side) -> Option<&Arc<Material>> {
        self.side(theme, side)?.material.as_ref()
    }

    /// The material for `theme`, preferring the front side over the back side.
    pub fn material_for(&self, theme: &str) -> Option<&Arc<Material>> {
        self.material_for_side(theme, Side::Front)
            .or_else(|| self.material_for_side(theme, Side::Back))
    }

    pub fn texture_binding(&self, theme: &str, side: Side) -> Option<&TextureBinding> {
        self.side(theme, side)?.texture.as_ref()
    }

    /// Exact lookup of the texture for `theme` and `side`.
    pub fn texture_for_side(&self, theme: &str, side: Side) -> Option<&Arc<Texture>> {
        self.texture_binding(theme, side).map(TextureBinding::texture)
    }

    /// The texture for `theme`, preferring the front side over the back side.
    pub fn texture_for(&self, theme: &str) -> Option<&Arc<Texture>> {
        self.texture_for_side(theme, Side::Front)
            .or_else(|| self.texture_for_side(theme, Side::Back))
    }

    /// All theme names with at least one binding, sorted.
    pub fn themes(&self) -> Vec<&str> {
        let mut themes: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        themes.sort_unstable();
        themes
    }

    /// Every texture binding as `(theme, side, binding)`, sorted by theme with
    /// the front side first.
    pub fn texture_bindings(&self) -> Vec<(&str, Side, &TextureBinding)> {
        let mut bindings = Vec::new();
        for theme in self.themes() {
            for side in [Side::Front, Side::Back] {
                if let Some(binding) = self.texture_binding(theme, side) {
                    bindings.push((theme, side, binding));
                }
            }
        }
        bindings
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
