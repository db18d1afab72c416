use std::fmt;

use crate::error::{
    check_dimension, require_dimension, GeometryError, IntersectionError, Result,
};
use crate::geometry::vector::{sign, to_vector3};
use crate::geometry::{Distance, Line, Point, Vector};
use crate::math::linalg::solve_2x2;
use crate::math::{Coords, Tolerance};

use super::{Surface, SurfaceDomain};

/// A hyperplane: every `x` with `normal . (x - point) = 0`.
///
/// In 3D this is an ordinary plane; in 2D it is a line with an explicit
/// normal. The normal is normalized at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point,
    normal: Vector,
}

impl Plane {
    /// Creates a plane from a point and a normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ, the dimension is below 2,
    /// or the normal is zero-length.
    pub fn new(point: Point, normal: Vector) -> Result<Self> {
        check_dimension(point.dimension(), normal.dimension())?;
        if point.dimension() < 2 {
            return Err(GeometryError::UnsupportedDimension {
                operation: "plane",
                dimension: point.dimension(),
            }
            .into());
        }
        let normal = normal.unit()?;
        Ok(Self { point, normal })
    }

    /// Creates the plane through `point` spanned by two vectors.
    ///
    /// The normal is `a x b`. Inputs of dimension 2 are padded to 3D.
    ///
    /// # Errors
    ///
    /// Returns an error if an input is not 2D or 3D, the dimensions differ,
    /// or the vectors are parallel.
    pub fn from_vectors(point: &Point, a: &Vector, b: &Vector, tol: Tolerance) -> Result<Self> {
        check_dimension(point.dimension(), a.dimension())?;
        check_dimension(point.dimension(), b.dimension())?;
        if a.is_parallel(b, tol)? {
            return Err(GeometryError::Degenerate("the vectors must not be parallel".into()).into());
        }
        let normal = a.cross(b)?;
        Self::new(point.set_dimension(3)?, normal)
    }

    /// Creates the plane through three points.
    ///
    /// The normal is `(b - a) x (c - a)`, so swapping two points flips it.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 2D or 3D, the dimensions
    /// differ, or the points are collinear.
    pub fn from_points(a: &Point, b: &Point, c: &Point, tol: Tolerance) -> Result<Self> {
        if a.is_collinear(b, c, tol)? {
            return Err(GeometryError::Degenerate("the points must not be collinear".into()).into());
        }
        Self::from_vectors(a, &a.vector_to(b)?, &a.vector_to(c)?, tol)
    }

    /// Returns the point the plane was built from.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.point.dimension()
    }

    /// Coefficients `(a, b, c, d)` of `a x + b y + c z + d = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plane has more than three dimensions.
    pub fn cartesian(&self) -> Result<(f64, f64, f64, f64)> {
        require_dimension("cartesian form", self.dimension(), &[2, 3])?;
        let n = to_vector3(self.normal.coords());
        let p = to_vector3(self.point.coords());
        Ok((n.x, n.y, n.z, -n.dot(&p)))
    }

    /// Orthogonal projection of `point` onto the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn project_point(&self, point: &Point) -> Result<Point> {
        let distance = self.distance_point_signed(point)?;
        Ok(point - &(&self.normal * distance))
    }

    /// Removes the normal component of `vector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn project_vector(&self, vector: &Vector) -> Result<Vector> {
        let along = self.normal.dot(vector)?;
        Ok(vector - &(&self.normal * along))
    }

    /// Projects a line onto the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or the line is
    /// perpendicular to the plane (its projection is a single point).
    pub fn project_line(&self, line: &Line, tol: Tolerance) -> Result<Line> {
        if line.direction().is_parallel(&self.normal, tol)? {
            return Err(GeometryError::Degenerate(
                "the line must not be perpendicular to the plane".into(),
            )
            .into());
        }
        let point = self.project_point(line.point())?;
        let direction = self.project_vector(line.direction())?;
        Line::new(point, direction)
    }

    /// Signed distance, positive on the side the normal points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn distance_point_signed(&self, point: &Point) -> Result<f64> {
        self.normal.dot(&self.point.vector_to(point)?)
    }

    /// Which side of the plane `point` lies on: `1` in front of the normal,
    /// `-1` behind and `0` on the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn side_point(&self, point: &Point, tol: Tolerance) -> Result<i8> {
        Ok(sign(self.distance_point_signed(point)?, tol))
    }

    /// Checks whether the planes describe the same set of points.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_close(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        Ok(self.contains_point(&other.point, tol)? && self.normal.is_parallel(&other.normal, tol)?)
    }

    /// Point where `line` crosses the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ, or
    /// [`IntersectionError::Parallel`] if the line is parallel to the plane
    /// (including when it lies in the plane).
    pub fn intersect_line(&self, line: &Line, tol: Tolerance) -> Result<Point> {
        check_dimension(self.dimension(), line.dimension())?;
        let denom = self.normal.dot(line.direction())?;
        if tol.is_zero(denom) {
            return Err(IntersectionError::Parallel("line and plane").into());
        }
        let t = self.normal.dot(&line.point().vector_to(&self.point)?)? / denom;
        Ok(line.to_point(t))
    }

    /// Line where two 3D planes cross.
    ///
    /// The direction is `n1 x n2`. A point on the line is found by fixing the
    /// coordinate along which the direction is largest to zero and solving
    /// the two plane equations for the remaining coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if a plane is not 3D, or
    /// [`IntersectionError::Parallel`] if the normals are parallel.
    pub fn intersect_plane(&self, other: &Self, tol: Tolerance) -> Result<Line> {
        require_dimension("plane-plane intersection", self.dimension(), &[3])?;
        require_dimension("plane-plane intersection", other.dimension(), &[3])?;
        if self.normal.is_parallel(&other.normal, tol)? {
            return Err(IntersectionError::Parallel("planes").into());
        }

        let n1 = to_vector3(self.normal.coords());
        let n2 = to_vector3(other.normal.coords());
        let direction = n1.cross(&n2);
        let d1 = n1.dot(&to_vector3(self.point.coords()));
        let d2 = n2.dot(&to_vector3(other.point.coords()));

        let k = direction.iamax();
        let (i, j) = ((k + 1) % 3, (k + 2) % 3);
        let (xi, xj) = solve_2x2(n1[i], n1[j], n2[i], n2[j], d1, d2)
            .ok_or(IntersectionError::Parallel("planes"))?;

        let mut point = Coords::zeros(3);
        point[i] = xi;
        point[j] = xj;
        Line::new(
            Point::from_coords(point),
            Vector::from_coords(Coords::from_column_slice(direction.as_slice())),
        )
    }

    /// Three non-collinear points on a 3D plane: the plane point and one
    /// unit step along each of two in-plane directions.
    ///
    /// # Errors
    ///
    /// Returns an error if the plane is not 3D.
    pub fn to_points(&self) -> Result<[Point; 3]> {
        let (u, v) = self.basis()?;
        Ok([self.point.clone(), &self.point + &u, &self.point + &v])
    }

    /// Orthonormal in-plane directions `(u, v)` with `u x v = normal`.
    fn basis(&self) -> Result<(Vector, Vector)> {
        require_dimension("plane basis", self.dimension(), &[3])?;
        let seed = self.normal.different_direction(Tolerance::default())?;
        let u = self.normal.cross(&seed)?.unit()?;
        let v = self.normal.cross(&u)?;
        Ok((u, v))
    }
}

impl Distance for Plane {
    fn distance_point(&self, point: &Point) -> Result<f64> {
        Ok(self.distance_point_signed(point)?.abs())
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point> {
        let (du, dv) = self.basis()?;
        Ok(&(&self.point + &(&du * u)) + &(&dv * v))
    }

    fn normal_at(&self, _u: f64, _v: f64) -> Result<Vector> {
        Ok(self.normal.clone())
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plane(point={}, normal={})", self.point, self.normal)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn p(c: &[f64]) -> Point {
        Point::new(c).unwrap()
    }

    fn v(c: &[f64]) -> Vector {
        Vector::new(c).unwrap()
    }

    fn plane(point: &[f64], normal: &[f64]) -> Plane {
        Plane::new(p(point), v(normal)).unwrap()
    }

    #[test]
    fn construction() {
        assert!(Plane::new(p(&[0.0, 0.0, 0.0]), v(&[0.0, 0.0, 0.0])).is_err());
        assert!(Plane::new(p(&[0.0]), v(&[1.0])).is_err());
        assert_eq!(plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 5.0]).normal(), &v(&[0.0, 0.0, 1.0]));
    }

    #[test]
    fn from_points_follows_point_order() {
        let tol = Tolerance::default();
        let a = p(&[0.0, 0.0, 0.0]);
        let b = p(&[1.0, 0.0, 0.0]);
        let c = p(&[0.0, 1.0, 0.0]);
        let up = Plane::from_points(&a, &b, &c, tol).unwrap();
        let down = Plane::from_points(&a, &c, &b, tol).unwrap();
        assert_eq!(up.normal(), &v(&[0.0, 0.0, 1.0]));
        assert_eq!(down.normal(), &v(&[0.0, 0.0, -1.0]));

        let (fa, fb, fc) = (p(&[0.0, 0.0]), p(&[1.0, 0.0]), p(&[0.0, 1.0]));
        let flat = Plane::from_points(&fa, &fb, &fc, tol).unwrap();
        assert_eq!(flat.dimension(), 3);

        let err = Plane::from_points(&a, &b, &p(&[2.0, 0.0, 0.0]), tol).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Degenerate);
    }

    #[test]
    fn from_parallel_vectors_fails() {
        let tol = Tolerance::default();
        let o = p(&[0.0, 0.0, 0.0]);
        assert!(Plane::from_vectors(&o, &v(&[1.0, 0.0, 0.0]), &v(&[-2.0, 0.0, 0.0]), tol).is_err());
        let pl = Plane::from_vectors(&o, &v(&[1.0, 0.0, 0.0]), &v(&[1.0, 1.0, 0.0]), tol).unwrap();
        assert_eq!(pl.normal(), &v(&[0.0, 0.0, 1.0]));
    }

    #[test]
    fn cartesian_form() {
        let (a, b, c, d) = plane(&[1.0, 2.0, 3.0], &[0.0, 0.0, 1.0]).cartesian().unwrap();
        assert_eq!((a, b, c, d), (0.0, 0.0, 1.0, -3.0));
        assert!(plane(&[0.0; 4], &[0.0, 0.0, 0.0, 1.0]).cartesian().is_err());
    }

    #[test]
    fn projections_and_distance() {
        let pl = plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        assert_eq!(pl.project_point(&p(&[3.0, -2.0, 7.0])).unwrap(), p(&[3.0, -2.0, 0.0]));
        assert_eq!(pl.project_vector(&v(&[1.0, 1.0, 1.0])).unwrap(), v(&[1.0, 1.0, 0.0]));
        assert_relative_eq!(pl.distance_point_signed(&p(&[5.0, 2.0, -4.0])).unwrap(), -4.0);
        assert_relative_eq!(pl.distance_point(&p(&[5.0, 2.0, -4.0])).unwrap(), 4.0);

        let tol = Tolerance::default();
        assert_eq!(pl.side_point(&p(&[0.0, 0.0, 2.0]), tol).unwrap(), 1);
        assert_eq!(pl.side_point(&p(&[9.0, 9.0, 0.0]), tol).unwrap(), 0);
        assert_eq!(pl.side_point(&p(&[0.0, 0.0, -1.0]), tol).unwrap(), -1);
    }

    #[test]
    fn plane_in_higher_dimension() {
        let pl = plane(&[0.0, 0.0, 0.0, 1.0], &[0.0, 0.0, 0.0, 2.0]);
        assert_relative_eq!(pl.distance_point(&p(&[4.0, 5.0, 6.0, 3.0])).unwrap(), 2.0);
        let line = Line::new(p(&[1.0, 1.0, 1.0, 5.0]), v(&[0.0, 0.0, 0.0, -1.0])).unwrap();
        let x = pl.intersect_line(&line, Tolerance::default()).unwrap();
        assert!(x.is_close(&p(&[1.0, 1.0, 1.0, 1.0]), Tolerance::default()).unwrap());
    }

    #[test]
    fn project_line_onto_plane() {
        let tol = Tolerance::default();
        let pl = plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        let line = Line::new(p(&[0.0, 0.0, 5.0]), v(&[1.0, 0.0, 1.0])).unwrap();
        let projected = pl.project_line(&line, tol).unwrap();
        assert_eq!(projected.point(), &p(&[0.0, 0.0, 0.0]));
        assert!(projected.direction().is_close(&v(&[1.0, 0.0, 0.0]), tol).unwrap());

        let vertical = Line::new(p(&[0.0, 0.0, 5.0]), v(&[0.0, 0.0, 1.0])).unwrap();
        assert!(pl.project_line(&vertical, tol).is_err());
    }

    #[test]
    fn intersect_line_cases() {
        let tol = Tolerance::default();
        let pl = plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        let line = Line::new(p(&[0.0, 0.0, 0.0]), v(&[0.0, 0.0, 1.0])).unwrap();
        assert_eq!(pl.intersect_line(&line, tol).unwrap(), p(&[0.0, 0.0, 0.0]));

        let line = Line::new(p(&[2.0, -1.0, 3.0]), v(&[1.0, 1.0, -1.0])).unwrap();
        let x = pl.intersect_line(&line, tol).unwrap();
        assert!(x.is_close(&p(&[5.0, 2.0, 0.0]), tol).unwrap());

        for start in [[0.0, 0.0, 1.0], [0.0, 0.0, 0.0]] {
            let line = Line::new(p(&start), v(&[1.0, 0.0, 0.0])).unwrap();
            let err = pl.intersect_line(&line, tol).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parallel);
            assert_eq!(err.to_string(), "the line and plane must not be parallel");
        }
    }

    #[test]
    fn intersect_plane_scenario() {
        let tol = Tolerance::default();
        let a = plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        let b = plane(&[5.0, 16.0, -94.0], &[1.0, 0.0, 0.0]);
        let line = a.intersect_plane(&b, tol).unwrap();
        assert!(line.point().is_close(&p(&[5.0, 0.0, 0.0]), tol).unwrap());
        assert!(line.direction().is_parallel(&v(&[0.0, 1.0, 0.0]), tol).unwrap());
        assert!(a.contains_point(line.point(), tol).unwrap());
        assert!(b.contains_point(line.point(), tol).unwrap());
    }

    #[test]
    fn intersect_oblique_planes() {
        let tol = Tolerance::default();
        let a = plane(&[1.0, 2.0, 3.0], &[1.0, 1.0, 0.0]);
        let b = plane(&[-4.0, 0.5, 2.0], &[0.0, 1.0, 1.0]);
        let line = a.intersect_plane(&b, tol).unwrap();
        for t in [-3.0, 0.0, 2.5] {
            let q = line.to_point(t);
            assert!(a.contains_point(&q, tol).unwrap());
            assert!(b.contains_point(&q, tol).unwrap());
        }
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let tol = Tolerance::default();
        let a = plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        let b = plane(&[0.0, 0.0, 3.0], &[0.0, 0.0, -2.0]);
        assert_eq!(a.intersect_plane(&b, tol).unwrap_err().kind(), ErrorKind::Parallel);
        let flat = plane(&[0.0, 0.0], &[0.0, 1.0]);
        assert!(flat.intersect_plane(&flat, tol).is_err());
    }

    #[test]
    fn close_planes() {
        let tol = Tolerance::default();
        let a = plane(&[0.0, 0.0, 0.0], &[0.0, 0.0, 5.0]);
        assert!(a.is_close(&plane(&[23.0, 45.0, 0.0], &[0.0, 0.0, -20.0]), tol).unwrap());
        assert!(!a.is_close(&plane(&[0.0, 0.0, 1.0], &[0.0, 0.0, 1.0]), tol).unwrap());
    }

    #[test]
    fn to_points_span_the_plane() {
        let tol = Tolerance::default();
        let pl = plane(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]);
        let [a, b, c] = pl.to_points().unwrap();
        assert!(!a.is_collinear(&b, &c, tol).unwrap());
        for q in [&a, &b, &c] {
            assert!(pl.contains_point(q, tol).unwrap());
        }
        let rebuilt = Plane::from_points(&a, &b, &c, tol).unwrap();
        assert!(rebuilt.is_close(&pl, tol).unwrap());
        assert!(rebuilt.normal().is_close(pl.normal(), tol).unwrap());
    }

    #[test]
    fn surface_parametrization() {
        let tol = Tolerance::default();
        let pl = plane(&[1.0, 2.0, 3.0], &[0.0, 2.0, 2.0]);
        assert_eq!(pl.evaluate(0.0, 0.0).unwrap(), *pl.point());
        for (u, w) in [(1.0, 0.0), (0.0, -2.0), (3.0, 4.0)] {
            let q = pl.evaluate(u, w).unwrap();
            assert!(pl.contains_point(&q, tol).unwrap());
            let distance = q.distance_point(pl.point()).unwrap();
            assert_relative_eq!(distance, f64::hypot(u, w), epsilon = 1e-12);
        }
        assert_eq!(&pl.normal_at(5.0, -1.0).unwrap(), pl.normal());
        let domain = pl.domain();
        assert!(domain.u_min.is_infinite() && domain.v_max.is_infinite());

        let wide = plane(&[0.0, 0.0, 0.0, 0.0], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(wide.evaluate(1.0, 1.0).unwrap_err().kind(), ErrorKind::DimensionMismatch);
    }
}
