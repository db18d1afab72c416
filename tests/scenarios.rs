#![allow(clippy::unwrap_used)]

use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use spatium::geometry::Vertex;
use spatium::{
    Circle, Distance, ErrorKind, Line, LineSegment, Plane, Point, Points, Tolerance, Triangle,
    Vector,
};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn p(c: &[f64]) -> Point {
    Point::new(c).unwrap()
}

fn v(c: &[f64]) -> Vector {
    Vector::new(c).unwrap()
}

#[test]
fn perpendicular_unit_vectors() {
    let angle = v(&[1.0, 0.0]).angle_between(&v(&[0.0, 1.0])).unwrap();
    assert_relative_eq!(angle, FRAC_PI_2);
}

#[test]
fn project_point_onto_diagonal_line() {
    let line = Line::new(p(&[0.0, 0.0, 0.0]), v(&[1.0, 1.0, 0.0])).unwrap();
    let projected = line.project_point(&p(&[5.0, 6.0, 7.0])).unwrap();
    assert!(projected.is_close(&p(&[5.5, 5.5, 0.0]), Tolerance::default()).unwrap());
}

#[test]
fn intersect_perpendicular_planes() {
    let tol = Tolerance::default();
    let floor = Plane::new(p(&[0.0, 0.0, 0.0]), v(&[0.0, 0.0, 1.0])).unwrap();
    let wall = Plane::new(p(&[5.0, 16.0, -94.0]), v(&[1.0, 0.0, 0.0])).unwrap();
    let line = floor.intersect_plane(&wall, tol).unwrap();
    assert!(line.contains_point(&p(&[5.0, 0.0, 0.0]), tol).unwrap());
    assert!(line.direction().is_parallel(&v(&[0.0, 1.0, 0.0]), tol).unwrap());
}

#[test]
fn best_fit_plane_of_unit_square() {
    init_tracing();
    let tol = Tolerance::default();
    let points = Points::new([
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ])
    .unwrap();
    let plane = Plane::best_fit(&points, tol).unwrap();
    assert!(plane.point().is_close(&p(&[0.5, 0.5, 0.0]), tol).unwrap());
    assert!(plane.normal().is_parallel(&v(&[0.0, 0.0, 1.0]), tol).unwrap());
}

#[test]
fn best_fit_line_through_scattered_points() {
    init_tracing();
    let tol = Tolerance::default();
    let points = Points::new([[0.0, 0.0], [1.0, 2.0], [2.0, 1.0], [2.0, 3.0], [3.0, 2.0]]).unwrap();
    let line = Line::best_fit(&points, tol).unwrap();
    assert!(line.point().is_close(&p(&[1.6, 1.6]), tol).unwrap());
    assert!(line.direction().is_parallel(&v(&[1.0, 1.0]), tol).unwrap());
}

#[test]
fn segment_containment() {
    let tol = Tolerance::default();
    let segment = LineSegment::new(p(&[0.0, 0.0]), p(&[1.0, 0.0])).unwrap();
    assert!(segment.contains_point(&p(&[0.5, 0.0]), tol).unwrap());
    assert!(!segment.contains_point(&p(&[2.0, 0.0]), tol).unwrap());
}

#[test]
fn unit_vectors_have_unit_norm() {
    for c in [[3.0, 4.0, 0.0], [-1e-3, 2e-3, 5e-4], [1e6, -2e6, 3e6]] {
        assert_relative_eq!(v(&c).unit().unwrap().norm(), 1.0, epsilon = 1e-12);
    }
    assert_eq!(v(&[0.0, 0.0]).unit().unwrap_err().kind(), ErrorKind::Degenerate);
}

#[test]
fn angles_are_symmetric() {
    let pairs = [
        ([1.0, 2.0, 3.0], [-4.0, 0.5, 2.0]),
        ([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]),
        ([0.3, 0.3, 0.3], [0.3, 0.3, 0.3]),
    ];
    for (a, b) in pairs {
        let (a, b) = (v(&a), v(&b));
        assert_relative_eq!(a.angle_between(&b).unwrap(), b.angle_between(&a).unwrap());
        assert_relative_eq!(a.angle_between(&a).unwrap(), 0.0);
    }
}

#[test]
fn distances_are_symmetric() {
    let a = p(&[1.0, -2.0, 5.0]);
    let b = p(&[-3.0, 0.5, 2.0]);
    assert_relative_eq!(a.distance_point(&b).unwrap(), b.distance_point(&a).unwrap());
    assert_relative_eq!(a.distance_point(&a).unwrap(), 0.0);
}

#[test]
fn projection_is_idempotent() {
    let tol = Tolerance::default();
    let line = Line::new(p(&[1.0, 2.0, 3.0]), v(&[2.0, -1.0, 0.5])).unwrap();
    let once = line.project_point(&p(&[7.0, 7.0, 7.0])).unwrap();
    let twice = line.project_point(&once).unwrap();
    assert!(once.is_close(&twice, tol).unwrap());
}

#[test]
fn mean_center_round_trip() {
    let tol = Tolerance::default();
    let points = Points::new([[1.0, 2.0, 3.0], [-4.0, 0.0, 2.5], [7.0, 1.0, -1.0]]).unwrap();
    let (centered, centroid) = points.mean_center();
    let offset = Point::origin(3).unwrap().vector_to(&centroid).unwrap();
    for (original, moved) in points.iter().zip(centered.iter()) {
        assert!(moved.translate(&offset).unwrap().is_close(original, tol).unwrap());
    }
}

#[test]
fn parallel_and_skew_lines_do_not_intersect() {
    let tol = Tolerance::default();
    let a = Line::new(p(&[0.0, 0.0, 0.0]), v(&[1.0, 0.0, 0.0])).unwrap();
    let parallel = Line::new(p(&[0.0, 1.0, 0.0]), v(&[-2.0, 0.0, 0.0])).unwrap();
    let skew = Line::new(p(&[0.0, 0.0, 1.0]), v(&[0.0, 1.0, 0.0])).unwrap();

    let err = a.intersect_line(&parallel, tol).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parallel);
    assert_eq!(err.to_string(), "the lines must not be parallel");
    assert_eq!(a.intersect_line(&skew, tol).unwrap_err().kind(), ErrorKind::NotCoplanar);
}

#[test]
fn results_do_not_depend_on_scale_or_offset() {
    let tol = Tolerance::default();
    let a = Line::new(p(&[1e6, 0.0, 0.0]), v(&[1.0, 0.0, 0.0])).unwrap();
    let b = Line::new(p(&[0.0, 0.0, 0.1]), v(&[0.0, 1.0, 0.0])).unwrap();
    assert_relative_eq!(a.distance_line(&b, tol).unwrap(), 0.1, max_relative = 1e-9);
    assert_eq!(a.intersect_line(&b, tol).unwrap_err().kind(), ErrorKind::NotCoplanar);

    let circle =
        Circle::from_points(&p(&[0.0, 0.0]), &p(&[1e-6, 0.0]), &p(&[0.0, 1e-6]), tol).unwrap();
    let square = Points::new([[0.0, 0.0], [1e-6, 0.0], [0.0, 1e-6], [1e-6, 1e-6]]).unwrap();
    let fitted = Circle::best_fit(&square, tol).unwrap();
    assert_relative_eq!(circle.radius(), fitted.radius(), max_relative = 1e-9);
    assert_relative_eq!(v(&[1e-11, 0.0]).unit().unwrap().norm(), 1.0);
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let plane = Plane::new(p(&[0.0, 0.0, 0.0]), v(&[0.0, 0.0, 1.0])).unwrap();
    let err = plane.distance_point(&p(&[1.0, 1.0])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn triangle_labels_out_of_range() {
    let triangle = Triangle::new(p(&[0.0, 0.0]), p(&[3.0, 0.0]), p(&[0.0, 4.0])).unwrap();
    let vertex: Vertex = "C".parse().unwrap();
    assert!(triangle.point(vertex).is_close(&p(&[0.0, 4.0]), Tolerance::default()).unwrap());
    let err = "D".parse::<Vertex>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(triangle.is_right(Tolerance::default()));
}

#[test]
fn primitives_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Point>();
    assert_send_sync::<Points>();
    assert_send_sync::<Line>();
    assert_send_sync::<Plane>();
    assert_send_sync::<spatium::Cylinder>();
    assert_send_sync::<spatium::SpatiumError>();
}
