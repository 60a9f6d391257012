//! Turns planar, possibly concave, possibly holed **city-model polygons** into
//! render-ready triangle meshes, and resolves which material or texture each
//! side of a surface carries under a given appearance theme.
//!
//! ```
//! use citymesh::{
//!     factory::GeometryFactory,
//!     logger::default_logger,
//!     polygon::FinishOptions,
//!     ring::{LinearRing, RingKind},
//!     triangulator::DefaultTriangulator,
//! };
//! use nalgebra::Point3;
//!
//! let mut factory = GeometryFactory::new(default_logger());
//! let handle = factory.create_polygon("wall");
//! let polygon = factory.polygon_mut(handle).unwrap();
//! polygon
//!     .add_ring(LinearRing::with_vertices(
//!         "wall_exterior",
//!         RingKind::Exterior,
//!         [
//!             Point3::new(0.0, 0.0, 0.0),
//!             Point3::new(4.0, 0.0, 0.0),
//!             Point3::new(4.0, 0.0, 3.0),
//!             Point3::new(0.0, 0.0, 3.0),
//!             Point3::new(0.0, 0.0, 0.0),
//!         ],
//!     ))
//!     .unwrap();
//! polygon
//!     .finish(FinishOptions::default(), &mut DefaultTriangulator::default())
//!     .unwrap();
//!
//! assert_eq!(polygon.vertices().len(), 4);
//! assert_eq!(polygon.triangle_count(), 2);
//! ```
//!
//! # Features
//! #### Default
//! - **earcut**: use `geo`s `earcutr` feature for triangulation
//!
//! #### Optional
//! - **delaunay**: use `geo`s `spade` feature for constrained Delaunay triangulation

#![forbid(unsafe_code)]
#![warn(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod appearance;
pub mod errors;
pub mod factory;
pub mod float_types;
pub mod logger;
pub mod polygon;
pub mod ring;
pub mod triangulator;

#[cfg(not(any(feature = "delaunay", feature = "earcut")))]
compile_error!("Either the 'delaunay' or the 'earcut' feature must be enabled");

pub use factory::{GeometryFactory, PolygonHandle};
pub use polygon::{FinishOptions, Polygon};
