use crate::error::{require_dimension, FitError, Result};
use crate::geometry::{Point, Points, Triangle};

/// Area of the triangle with vertices `a`, `b`, `c`, in any dimension.
///
/// # Errors
///
/// Returns an error if the dimensions differ.
pub fn area_triangle(a: &Point, b: &Point, c: &Point) -> Result<f64> {
    Ok(Triangle::new(a.clone(), b.clone(), c.clone())?.area())
}

/// Volume of the tetrahedron with vertices `a`, `b`, `c`, `d`.
///
/// `|AB . (AC x AD)| / 6`. Points of dimension 2 are treated as lying in
/// the `z = 0` plane, giving zero volume.
///
/// # Errors
///
/// Returns an error if the dimensions differ or are not 2D or 3D.
pub fn volume_tetrahedron(a: &Point, b: &Point, c: &Point, d: &Point) -> Result<f64> {
    let ab = a.vector_to(b)?;
    let ac = a.vector_to(c)?;
    let ad = a.vector_to(d)?;
    let cross = ac.cross(&ad)?;
    Ok(ab.set_dimension(3)?.dot(&cross)?.abs() / 6.0)
}

/// Signed area of a simple 2D polygon by the shoelace formula.
///
/// Positive when the vertices run counterclockwise.
///
/// # Errors
///
/// Returns an error if the points are not 2D or there are fewer than three.
pub fn area_signed(points: &Points) -> Result<f64> {
    require_dimension("signed area", points.dimension(), &[2])?;
    if points.len() < 3 {
        return Err(FitError::InsufficientData {
            required: 3,
            found: points.len(),
        }
        .into());
    }

    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let prev = &points[(i + n - 1) % n];
            let here = &points[i];
            prev[0] * here[1] - here[0] * prev[1]
        })
        .sum();
    Ok(0.5 * twice)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(c: &[f64]) -> Point {
        Point::new(c).unwrap()
    }

    #[test]
    fn triangle_area() {
        assert_relative_eq!(
            area_triangle(&p(&[0.0, 0.0]), &p(&[0.0, 1.0]), &p(&[1.0, 0.0])).unwrap(),
            0.5
        );
        assert_relative_eq!(
            area_triangle(&p(&[0.0, 0.0]), &p(&[0.0, 2.0]), &p(&[1.0, 1.0])).unwrap(),
            1.0
        );
        assert_relative_eq!(
            area_triangle(&p(&[3.0, -5.0, 1.0]), &p(&[5.0, 2.0, 1.0]), &p(&[9.0, 4.0, 2.0]))
                .unwrap(),
            12.54,
            epsilon = 5e-3
        );
    }

    #[test]
    fn tetrahedron_volume() {
        let o = p(&[0.0, 0.0, 0.0]);
        let x = p(&[1.0, 0.0, 0.0]);
        let y = p(&[0.0, 1.0, 0.0]);
        let volume = |d: &[f64]| volume_tetrahedron(&o, &x, &y, &p(d));
        assert_relative_eq!(volume(&[1.0, 1.0, 0.0]).unwrap(), 0.0);
        assert_relative_eq!(volume(&[0.0, 0.0, 2.0]).unwrap(), 1.0 / 3.0);
        assert_relative_eq!(volume(&[0.0, 0.0, 1.0]).unwrap(), 1.0 / 6.0);
        assert!(volume_tetrahedron(&o, &x, &y, &p(&[0.0, 0.0])).is_err());
    }

    #[test]
    fn shoelace_orientation() {
        let ccw = Points::new([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_relative_eq!(area_signed(&ccw).unwrap(), 0.5);
        let cw = Points::new([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]).unwrap();
        assert_relative_eq!(area_signed(&cw).unwrap(), -0.5);
        let square = Points::new([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]).unwrap();
        assert_relative_eq!(area_signed(&square).unwrap(), -1.0);
        assert!(area_signed(&Points::new([[0.0, 0.0], [1.0, 1.0]]).unwrap()).is_err());
        assert!(area_signed(&Points::new([[0.0, 0.0, 0.0]; 3]).unwrap()).is_err());
    }
}
