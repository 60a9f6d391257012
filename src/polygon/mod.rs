//! `Polygon`: boundary rings in, render buffers out.
//!
//! A polygon collects one exterior ring and any number of interior rings
//! (holes) while it is being built. [`Polygon::finish`] then runs the
//! pipeline once:
//!
//! 1. duplicate-vertex removal in every ring (collapsed holes are dropped),
//! 2. face normal from the exterior ring (Newell),
//! 3. vertex/index buffers, either by a triangle fan or by a [`Triangulator`],
//! 4. optional vertex merging,
//! 5. orientation flip when the polygon is marked with a negated normal.
//!
//! Nothing in the pipeline is fatal. Degenerate input is reported through the
//! polygon's [`Logger`](crate::logger::Logger) and yields empty buffers.

use crate::appearance::{AppearanceTarget, Material, Side, Texture};
use crate::errors::PolygonError;
use crate::float_types::{EPSILON, Real, TexCoord, tolerance};
use crate::logger::SharedLogger;
use crate::ring::LinearRing;
use crate::triangulator::Triangulator;
use log::Level;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

mod indices;
mod texcoords;

use texcoords::TexChannel;

/// Parameters of [`Polygon::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishOptions {
    /// Run the triangulator on concave input. Polygons with holes are always
    /// triangulated, whatever this says.
    pub tesselate: bool,
    /// Merge identical vertices after triangulation.
    pub optimize: bool,
}

impl Default for FinishOptions {
    fn default() -> Self {
        FinishOptions {
            tesselate: true,
            optimize: false,
        }
    }
}

impl FinishOptions {
    pub const fn new() -> Self {
        FinishOptions {
            tesselate: true,
            optimize: false,
        }
    }

    pub const fn tesselate(mut self, tesselate: bool) -> Self {
        self.tesselate = tesselate;
        self
    }

    pub const fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }
}

/// Render data produced by [`Polygon::finish`].
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FinishedGeometry {
    vertices: Vec<Point3<Real>>,
    indices: Vec<u32>,
    normal: Option<Vector3<Real>>,
    tex_channels: Vec<TexChannel>,
}

impl FinishedGeometry {
    const fn empty(normal: Option<Vector3<Real>>) -> Self {
        FinishedGeometry {
            vertices: Vec::new(),
            indices: Vec::new(),
            normal,
            tex_channels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PolygonState {
    Building,
    Finished(FinishedGeometry),
}

/// A planar surface bounded by one exterior ring, with optional holes.
///
/// Created by a [`GeometryFactory`](crate::factory::GeometryFactory).
#[derive(Debug, Clone)]
pub struct Polygon {
    id: String,
    exterior: Option<LinearRing>,
    interiors: Vec<LinearRing>,
    appearance: AppearanceTarget,
    neg_normal: bool,
    state: PolygonState,
    logger: SharedLogger,
}

impl Polygon {
    pub(crate) fn new(id: impl Into<String>, logger: SharedLogger) -> Self {
        Polygon {
            id: id.into(),
            exterior: None,
            interiors: Vec::new(),
            appearance: AppearanceTarget::new(),
            neg_normal: false,
            state: PolygonState::Building,
            logger,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self.state, PolygonState::Finished(_))
    }

    fn log(&self, level: Level, message: impl AsRef<str>) {
        if self.logger.is_enabled(level) {
            self.logger
                .log(level, &format!("Polygon {}: {}", self.id, message.as_ref()));
        }
    }

    fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warn, message);
    }

    fn reject_if_finished(&self, operation: &str) -> Result<(), PolygonError> {
        if self.is_finished() {
            self.warn(format!("{operation} called after finish, ignored"));
            return Err(PolygonError::AlreadyFinished {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Attach a ring. Exterior rings fill the single exterior slot, interior
    /// rings are appended to the holes in order.
    pub fn add_ring(&mut self, ring: LinearRing) -> Result<(), PolygonError> {
        self.reject_if_finished("add_ring")?;

        if ring.is_exterior() {
            if let Some(previous) = &self.exterior {
                self.warn(format!(
                    "exterior ring {} replaced by {}",
                    previous.id(),
                    ring.id()
                ));
            }
            self.exterior = Some(ring);
        } else {
            self.interiors.push(ring);
        }
        Ok(())
    }

    pub fn exterior_ring(&self) -> Option<&LinearRing> {
        self.exterior.as_ref()
    }

    pub fn interior_rings(&self) -> &[LinearRing] {
        &self.interiors
    }

    pub const fn neg_normal(&self) -> bool {
        self.neg_normal
    }

    /// Mark the polygon as facing the opposite way of its exterior ring's winding.
    pub fn set_neg_normal(&mut self, neg_normal: bool) -> Result<(), PolygonError> {
        self.reject_if_finished("set_neg_normal")?;
        self.neg_normal = neg_normal;
        Ok(())
    }

    pub const fn appearance(&self) -> &AppearanceTarget {
        &self.appearance
    }

    /// Appearances may be bound at any time; texture coordinates are taken
    /// from the bindings present when [`finish`](Self::finish) runs.
    pub const fn appearance_mut(&mut self) -> &mut AppearanceTarget {
        &mut self.appearance
    }

    /// Materialize vertex, index and texture coordinate buffers.
    ///
    /// May be called once. The triangulator is only invoked when the polygon
    /// needs it (concave input with `tesselate`, or holes).
    pub fn finish(
        &mut self,
        options: FinishOptions,
        triangulator: &mut dyn Triangulator,
    ) -> Result<(), PolygonError> {
        self.reject_if_finished("finish")?;

        let kept = self.remove_duplicate_vertices_in_rings(tolerance());
        let geometry = self.compute_geometry(options, triangulator, &kept);
        self.state = PolygonState::Finished(geometry);
        Ok(())
    }

    /// Clean every ring in place. Returns, for the exterior (if any) followed
    /// by every surviving interior ring, the original indices of kept points.
    fn remove_duplicate_vertices_in_rings(&mut self, tolerance: Real) -> Vec<Vec<usize>> {
        let mut kept = Vec::with_capacity(1 + self.interiors.len());

        if let Some(mut exterior) = self.exterior.take() {
            let cleanup = exterior.remove_duplicate_vertices(tolerance);
            if cleanup.removed() > 0 {
                self.warn(format!(
                    "removed {} duplicate and {} invalid vertices from exterior ring {}",
                    cleanup.duplicates,
                    cleanup.non_finite,
                    exterior.id()
                ));
            }
            kept.push(cleanup.kept);
            self.exterior = Some(exterior);
        }

        let mut interiors = Vec::with_capacity(self.interiors.len());
        for mut ring in std::mem::take(&mut self.interiors) {
            let cleanup = ring.remove_duplicate_vertices(tolerance);
            if cleanup.removed() > 0 {
                self.warn(format!(
                    "removed {} duplicate and {} invalid vertices from interior ring {}",
                    cleanup.duplicates,
                    cleanup.non_finite,
                    ring.id()
                ));
            }
            if let Err(err) = ring.validate() {
                self.warn(format!("interior ring dropped: {err}"));
                continue;
            }
            kept.push(cleanup.kept);
            interiors.push(ring);
        }
        self.interiors = interiors;

        kept
    }

    /// Area-weighted face normal of the exterior ring, or `None` when the ring
    /// encloses no area.
    fn compute_normal(&self) -> Option<Vector3<Real>> {
        self.exterior
            .as_ref()?
            .newell_normal()
            .try_normalize(EPSILON)
    }

    fn compute_geometry(
        &self,
        options: FinishOptions,
        triangulator: &mut dyn Triangulator,
        kept: &[Vec<usize>],
    ) -> FinishedGeometry {
        let Some(exterior) = &self.exterior else {
            self.warn("has no exterior ring, no geometry generated");
            return FinishedGeometry::empty(None);
        };
        if let Err(err) = exterior.validate() {
            self.warn(format!("exterior ring unusable, no geometry generated: {err}"));
            return FinishedGeometry::empty(None);
        }
        let Some(normal) = self.compute_normal() else {
            self.warn(format!(
                "exterior ring {} encloses no area, no geometry generated",
                exterior.id()
            ));
            return FinishedGeometry::empty(None);
        };

        let mut geometry = self.compute_indices(options.tesselate, triangulator, normal, kept);
        if geometry.indices.is_empty() {
            return geometry;
        }

        if options.optimize {
            let merged = geometry.optimize(tolerance());
            if merged > 0 {
                self.log(Level::Debug, format!("merged {merged} vertices"));
            }
        }

        if self.neg_normal {
            geometry.flip();
        }
        geometry
    }

    /// Vertex buffer of the finished polygon: exterior points, then the points
    /// of every surviving hole, then any triangulator-inserted points.
    /// Empty until finished.
    pub fn vertices(&self) -> &[Point3<Real>] {
        match &self.state {
            PolygonState::Finished(geometry) => &geometry.vertices,
            PolygonState::Building => &[],
        }
    }

    /// Mutable access to the finished positions, e.g. for reprojection.
    pub fn vertices_mut(&mut self) -> &mut [Point3<Real>] {
        match &mut self.state {
            PolygonState::Finished(geometry) => &mut geometry.vertices,
            PolygonState::Building => &mut [],
        }
    }

    /// Triangle list, three indices per triangle. Empty until finished.
    pub fn indices(&self) -> &[u32] {
        match &self.state {
            PolygonState::Finished(geometry) => &geometry.indices,
            PolygonState::Building => &[],
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices().len() / 3
    }

    /// Unit face normal, already negated for polygons marked with
    /// [`set_neg_normal`](Self::set_neg_normal). `None` before finishing or for
    /// polygons without area.
    pub fn normal(&self) -> Option<Vector3<Real>> {
        match &self.state {
            PolygonState::Finished(geometry) => geometry.normal,
            PolygonState::Building => None,
        }
    }

    /// Material bound to `side` under `theme`.
    pub fn material_for_side(&self, theme: &str, side: Side) -> Option<&Arc<Material>> {
        self.appearance.material_for_side(theme, side)
    }

    /// Material under `theme`, front side preferred.
    pub fn material_for(&self, theme: &str) -> Option<&Arc<Material>> {
        self.appearance.material_for(theme)
    }

    /// Texture bound to `side` under `theme`.
    pub fn texture_for_side(&self, theme: &str, side: Side) -> Option<&Arc<Texture>> {
        self.appearance.texture_for_side(theme, side)
    }

    /// Texture under `theme`, front side preferred.
    pub fn texture_for(&self, theme: &str) -> Option<&Arc<Texture>> {
        self.appearance.texture_for(theme)
    }

    /// Texture coordinates for `theme` and `side`, one per entry of
    /// [`vertices`](Self::vertices), or empty when no texture was bound there
    /// at finish time.
    pub fn tex_coords_for_theme(&self, theme: &str, side: Side) -> &[TexCoord] {
        let PolygonState::Finished(geometry) = &self.state else {
            return &[];
        };
        geometry
            .tex_channels
            .iter()
            .find(|channel| channel.theme == theme && channel.side == side)
            .map(|channel| channel.coords.as_slice())
            .unwrap_or(&[])
    }
}
