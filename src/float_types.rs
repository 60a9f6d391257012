use core::str::FromStr;
use nalgebra::Point2;
use std::sync::OnceLock;

// Our Real scalar type. Polygon coordinates are always double precision.
pub type Real = f64;

/// A texture coordinate. Single precision, as consumed by renderers.
pub type TexCoord = Point2<f32>;

/// A small epsilon for comparisons that don't depend on model scale.
pub const EPSILON: Real = 1e-8;

/// Lazily-initialized tolerance used across the crate.
/// Governs duplicate-vertex removal and vertex merging. Can be overridden:
///  1) **Build-time**: set env var `CITYMESH_TOLERANCE` (e.g. `CITYMESH_TOLERANCE=1e-4 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before finishing any polygon
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-6
}

/// Returns the current tolerance.
/// If not set yet, it tries `CITYMESH_TOLERANCE` (parsed as `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("CITYMESH_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `citymesh::float_types::set_tolerance(1e-4);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}
