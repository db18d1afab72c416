use nalgebra::{Rotation3, Unit};

use crate::error::{check_dimension, require_dimension, GeometryError, Result};
use crate::geometry::{Plane, Point, Points, Vector};

use super::{Matrix, Matrix3, Tolerance, TOLERANCE};

/// Coordinates of `points` in the frame given by `origin` and `basis`.
///
/// Row `i`, column `j` of the result is `(points[i] - origin) . basis[j]`.
/// The basis vectors are used as given, so they should be orthonormal for
/// the result to be a true change of coordinates.
///
/// # Errors
///
/// Returns an error if any dimension differs from the points' dimension.
pub fn transform_coordinates(points: &Points, origin: &Point, basis: &[Vector]) -> Result<Matrix> {
    let dimension = points.dimension();
    check_dimension(dimension, origin.dimension())?;
    for vector in basis {
        check_dimension(dimension, vector.dimension())?;
    }

    Ok(Matrix::from_fn(points.len(), basis.len(), |i, j| {
        (points[i].coords() - origin.coords()).dot(basis[j].coords())
    }))
}

/// Counterclockwise rotation by `theta` radians about `axis`.
///
/// # Errors
///
/// Returns an error if `axis` is not 3D or is zero-length.
pub fn rotation_matrix_from_axis_angle(axis: &Vector, theta: f64) -> Result<Matrix3> {
    require_dimension("rotation", axis.dimension(), &[3])?;
    let axis = unit3(axis)?;
    Ok(Rotation3::from_axis_angle(&axis, theta).into_inner())
}

/// The rotation that turns the direction of `from` into the direction of
/// `to`.
///
/// Opposite directions are handled with a half turn about an axis
/// perpendicular to `from`.
///
/// # Errors
///
/// Returns an error if either vector is not 3D or is zero-length.
pub fn rotation_matrix_from_vectors(from: &Vector, to: &Vector) -> Result<Matrix3> {
    require_dimension("rotation", from.dimension(), &[3])?;
    require_dimension("rotation", to.dimension(), &[3])?;
    let a = unit3(from)?;
    let b = unit3(to)?;

    if let Some(rotation) = Rotation3::rotation_between(&a, &b) {
        return Ok(rotation.into_inner());
    }
    let seed = from.different_direction(Tolerance::default())?;
    let axis = unit3(&from.cross(&seed)?)?;
    Ok(Rotation3::from_axis_angle(&axis, std::f64::consts::PI).into_inner())
}

/// Reflection of `point` across `plane`.
///
/// # Errors
///
/// Returns an error if the point and plane dimensions differ.
pub fn mirror_point(point: &Point, plane: &Plane) -> Result<Point> {
    let distance = plane.distance_point_signed(point)?;
    Ok(point - &(plane.normal() * (2.0 * distance)))
}

fn unit3(vector: &Vector) -> Result<Unit<nalgebra::Vector3<f64>>> {
    let c = vector.as_slice();
    let v = nalgebra::Vector3::new(c[0], c[1], c[2]);
    if v.norm() < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(Unit::new_normalize(v))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn v(c: &[f64]) -> Vector {
        Vector::new(c).unwrap()
    }

    fn p(c: &[f64]) -> Point {
        Point::new(c).unwrap()
    }

    #[test]
    fn coordinates_in_basis() {
        let points = Points::new([[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let origin = p(&[1.0, 0.0]);
        let basis = [v(&[0.0, 1.0]), v(&[1.0, 0.0])];
        let coords = transform_coordinates(&points, &origin, &basis).unwrap();
        assert_eq!(coords.shape(), (2, 2));
        assert_relative_eq!(coords[(0, 0)], 2.0);
        assert_relative_eq!(coords[(0, 1)], 0.0);
        assert_relative_eq!(coords[(1, 0)], 4.0);
        assert_relative_eq!(coords[(1, 1)], 2.0);

        assert!(transform_coordinates(&points, &p(&[0.0, 0.0, 0.0]), &basis).is_err());
    }

    #[test]
    fn axis_angle_rotates_counterclockwise() {
        let r = rotation_matrix_from_axis_angle(&v(&[0.0, 0.0, 2.0]), FRAC_PI_2).unwrap();
        let x = nalgebra::Vector3::new(1.0, 0.0, 0.0);
        let rotated = r * x;
        assert_relative_eq!(rotated, nalgebra::Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert!(rotation_matrix_from_axis_angle(&v(&[0.0, 0.0, 0.0]), 1.0).is_err());
        assert!(rotation_matrix_from_axis_angle(&v(&[0.0, 1.0]), 1.0).is_err());
    }

    #[test]
    fn rotation_between_vectors() {
        let pairs = [
            ([1.0, 0.0, 0.0], [0.0, 3.0, 0.0]),
            ([1.0, 2.0, 3.0], [-2.0, 0.5, 1.0]),
            ([0.0, 0.0, 1.0], [0.0, 0.0, -4.0]),
            ([1.0, 1.0, 0.0], [2.0, 2.0, 0.0]),
        ];
        for (from, to) in pairs {
            let r = rotation_matrix_from_vectors(&v(&from), &v(&to)).unwrap();
            let a = nalgebra::Vector3::from(from).normalize();
            let b = nalgebra::Vector3::from(to).normalize();
            assert_relative_eq!(r * a, b, epsilon = 1e-12);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn mirror_across_plane() {
        let plane = Plane::new(p(&[0.0, 0.0, 1.0]), v(&[0.0, 0.0, 1.0])).unwrap();
        let mirrored = mirror_point(&p(&[2.0, 3.0, 4.0]), &plane).unwrap();
        assert!(mirrored.is_close(&p(&[2.0, 3.0, -2.0]), Tolerance::default()).unwrap());
    }
}
