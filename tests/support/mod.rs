//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use citymesh::{
    factory::{GeometryFactory, PolygonHandle},
    float_types::Real,
    logger::Logger,
    polygon::Polygon,
    ring::{LinearRing, RingKind},
};
use log::Level;
use nalgebra::{Point3, Vector3};
use std::sync::{Arc, Mutex};

/// Captures every message so tests can assert on warnings.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn warnings(&self) -> Vec<String> {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(level, _)| *level <= Level::Warn)
                    .map(|(_, message)| message.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}

/// A factory whose polygons log into a [`RecordingLogger`].
pub fn recording_factory() -> (GeometryFactory, Arc<RecordingLogger>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let logger = Arc::new(RecordingLogger::default());
    (GeometryFactory::new(logger.clone()), logger)
}

pub fn ring(id: &str, kind: RingKind, points: &[[Real; 3]]) -> LinearRing {
    LinearRing::with_vertices(
        id,
        kind,
        points.iter().map(|p| Point3::new(p[0], p[1], p[2])),
    )
}

/// Create a polygon from an exterior and any number of holes.
pub fn make_polygon(
    factory: &mut GeometryFactory,
    id: &str,
    exterior: &[[Real; 3]],
    holes: &[&[[Real; 3]]],
) -> PolygonHandle {
    let handle = factory.create_polygon(id);
    let polygon = factory.polygon_mut(handle).expect("fresh handle");
    polygon
        .add_ring(ring(&format!("{id}_ext"), RingKind::Exterior, exterior))
        .expect("building");
    for (i, hole) in holes.iter().enumerate() {
        polygon
            .add_ring(ring(&format!("{id}_int{i}"), RingKind::Interior, hole))
            .expect("building");
    }
    handle
}

/// Sum of triangle areas, each signed by how it faces `normal`.
pub fn signed_area(polygon: &Polygon, normal: Vector3<Real>) -> Real {
    let vertices = polygon.vertices();
    polygon
        .indices()
        .chunks_exact(3)
        .map(|tri| {
            let a = vertices[tri[0] as usize];
            let b = vertices[tri[1] as usize];
            let c = vertices[tri[2] as usize];
            (b - a).cross(&(c - a)).dot(&normal) * 0.5
        })
        .sum()
}

/// 4x4 square in the XY plane, counter-clockwise seen from +Z.
pub const SQUARE: [[Real; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0],
    [4.0, 4.0, 0.0],
    [0.0, 4.0, 0.0],
];

/// 2x2 hole in the middle of [`SQUARE`], wound the opposite way.
pub const HOLE: [[Real; 3]; 4] = [
    [1.0, 1.0, 0.0],
    [1.0, 3.0, 0.0],
    [3.0, 3.0, 0.0],
    [3.0, 1.0, 0.0],
];
