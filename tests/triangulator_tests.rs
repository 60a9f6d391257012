use approx::assert_relative_eq;
use citymesh::{
    errors::TriangulationError,
    float_types::Real,
    polygon::FinishOptions,
    triangulator::{DefaultTriangulator, TessellationInput, Triangulator},
};
use nalgebra::{Point3, Rotation3, Vector3};

mod support;

use crate::support::{HOLE, SQUARE, make_polygon, recording_factory, signed_area};

fn tilt(points: &[[Real; 3]], rotation: &Rotation3<Real>) -> Vec<[Real; 3]> {
    points
        .iter()
        .map(|p| {
            let q = rotation * Point3::new(p[0], p[1], p[2]) + Vector3::new(100.0, -50.0, 7.0);
            [q.x, q.y, q.z]
        })
        .collect()
}

#[test]
fn tilted_polygon_with_hole() {
    let rotation = Rotation3::from_euler_angles(0.4, -1.1, 2.3);
    let exterior = tilt(&SQUARE, &rotation);
    let hole = tilt(&HOLE, &rotation);

    let (mut factory, logger) = recording_factory();
    let handle = make_polygon(&mut factory, "tilted", &exterior, &[&hole]);
    factory
        .finish(handle, FinishOptions::new(), &mut DefaultTriangulator::default())
        .unwrap();

    let polygon = factory.polygon(handle).unwrap();
    let normal = polygon.normal().unwrap();
    assert_relative_eq!(normal, rotation * Vector3::z(), epsilon = 1e-9);
    assert_relative_eq!(signed_area(polygon, normal), 12.0, epsilon = 1e-9);
    assert!(logger.warnings().is_empty());
}

#[test]
fn clockwise_exterior_gets_opposite_normal() {
    let mut reversed = SQUARE;
    reversed.reverse();

    let (mut factory, _) = recording_factory();
    let handle = make_polygon(&mut factory, "cw", &reversed, &[]);
    factory
        .finish(handle, FinishOptions::new(), &mut DefaultTriangulator::default())
        .unwrap();

    let polygon = factory.polygon(handle).unwrap();
    assert_relative_eq!(polygon.normal().unwrap(), -Vector3::z(), epsilon = 1e-12);
    // triangles always face along the normal
    assert_relative_eq!(signed_area(polygon, -Vector3::z()), 16.0, epsilon = 1e-9);
}

#[test]
fn triangulator_rejects_degenerate_contours() {
    let exterior = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
    let input = TessellationInput::new(&exterior, Vector3::z());
    assert_eq!(
        DefaultTriangulator::default().triangulate(&input),
        Err(TriangulationError::DegenerateInput(2))
    );
}

#[test]
fn input_vertices_are_numbered_exterior_first() {
    let exterior: Vec<Point3<Real>> = SQUARE
        .iter()
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();
    let hole: Vec<Point3<Real>> = HOLE.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect();
    let input = TessellationInput::new(&exterior, Vector3::z()).with_interior(&hole);

    assert_eq!(input.len(), 8);
    assert_eq!(input.vertex(3), Some(exterior[3]));
    assert_eq!(input.vertex(4), Some(hole[0]));
    assert_eq!(input.vertex(8), None);
}

#[cfg(feature = "delaunay")]
#[test]
fn spade_and_earcut_agree_on_area() {
    use citymesh::triangulator::SpadeTriangulator;

    let (mut factory, _) = recording_factory();
    let handle = make_polygon(&mut factory, "cdt", &SQUARE, &[&HOLE]);
    factory
        .finish(handle, FinishOptions::new(), &mut SpadeTriangulator::new())
        .unwrap();

    let polygon = factory.polygon(handle).unwrap();
    assert_relative_eq!(signed_area(polygon, Vector3::z()), 12.0, epsilon = 1e-9);
}
