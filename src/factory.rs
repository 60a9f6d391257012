//! The factory that owns every polygon of a document.

use crate::errors::PolygonError;
use crate::logger::SharedLogger;
use crate::polygon::{FinishOptions, Polygon};
use crate::triangulator::Triangulator;
use hashbrown::HashMap;
use log::Level;

/// Opaque reference to a polygon owned by a [`GeometryFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonHandle(usize);

/// Creates polygons and keeps them alive for as long as the document lives.
///
/// Every polygon receives the factory's logger, so there is exactly one place
/// to configure where warnings go.
#[derive(Debug)]
pub struct GeometryFactory {
    logger: SharedLogger,
    polygons: Vec<Polygon>,
    ids: HashMap<String, PolygonHandle>,
}

impl GeometryFactory {
    pub fn new(logger: SharedLogger) -> Self {
        GeometryFactory {
            logger,
            polygons: Vec::new(),
            ids: HashMap::new(),
        }
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Create an empty polygon in the building state.
    ///
    /// Ids are expected to be unique; for a repeated id a warning is logged and
    /// [`find_polygon`](Self::find_polygon) keeps returning the first polygon.
    pub fn create_polygon(&mut self, id: impl Into<String>) -> PolygonHandle {
        let id = id.into();
        let handle = PolygonHandle(self.polygons.len());

        if self.ids.contains_key(&id) {
            self.logger
                .log(Level::Warn, &format!("Duplicate polygon id {id}"));
        } else {
            self.ids.insert(id.clone(), handle);
        }

        self.polygons.push(Polygon::new(id, self.logger.clone()));
        handle
    }

    pub fn polygon(&self, handle: PolygonHandle) -> Option<&Polygon> {
        self.polygons.get(handle.0)
    }

    pub fn polygon_mut(&mut self, handle: PolygonHandle) -> Option<&mut Polygon> {
        self.polygons.get_mut(handle.0)
    }

    pub fn find_polygon(&self, id: &str) -> Option<PolygonHandle> {
        self.ids.get(id).copied()
    }

    /// Finish a single polygon.
    pub fn finish(
        &mut self,
        handle: PolygonHandle,
        options: FinishOptions,
        triangulator: &mut dyn Triangulator,
    ) -> Result<(), PolygonError> {
        self.polygons
            .get_mut(handle.0)
            .ok_or(PolygonError::UnknownHandle(handle.0))?
            .finish(options, triangulator)
    }

    /// Finish every polygon that is still being built, in creation order.
    /// Returns how many were finished.
    pub fn finish_all(
        &mut self,
        options: FinishOptions,
        triangulator: &mut dyn Triangulator,
    ) -> usize {
        let mut finished = 0;
        for polygon in self.polygons.iter_mut().filter(|p| !p.is_finished()) {
            if polygon.finish(options, triangulator).is_ok() {
                finished += 1;
            }
        }
        finished
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PolygonHandle, &Polygon)> {
        self.polygons
            .iter()
            .enumerate()
            .map(|(index, polygon)| (PolygonHandle(index), polygon))
    }
}
