use std::fmt;

use crate::error::{
    check_dimension, require_dimension, GeometryError, IntersectionError, Result,
};
use crate::geometry::{Distance, Point, Points, Vector};
use crate::math::linalg::solve_2x2;
use crate::math::transform::transform_coordinates;
use crate::math::Tolerance;

use super::{Curve, CurveDomain};

/// An infinite line through `point` along `direction`.
///
/// The parametric form is `P(t) = point + t * direction`. The direction is
/// normalized at construction, so `t` is the signed distance from `point`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    point: Point,
    direction: Vector,
}

impl Line {
    /// Creates a line from a point and a direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or the direction is
    /// zero-length.
    pub fn new(point: Point, direction: Vector) -> Result<Self> {
        check_dimension(point.dimension(), direction.dimension())?;
        let direction = direction.unit()?;
        Ok(Self { point, direction })
    }

    /// Creates the line through `a` pointing towards `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or the points coincide.
    pub fn from_points(a: &Point, b: &Point) -> Result<Self> {
        let direction = a.vector_to(b)?;
        if direction.norm() == 0.0 {
            return Err(GeometryError::Degenerate("the points must be distinct".into()).into());
        }
        Self::new(a.clone(), direction)
    }

    /// Creates the 2D line `y = slope * x + y_intercept`.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not finite.
    pub fn from_slope(slope: f64, y_intercept: f64) -> Result<Self> {
        let point = Point::new([0.0, y_intercept])?;
        let direction = Vector::new([1.0, slope])?;
        Self::new(point, direction)
    }

    /// Returns the point the line was built from.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Returns the unit direction of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector {
        &self.direction
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.point.dimension()
    }

    /// The point at parameter `t`.
    #[must_use]
    pub fn to_point(&self, t: f64) -> Point {
        &self.point + &(&self.direction * t)
    }

    /// Orthogonal projection of `point` onto the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn project_point(&self, point: &Point) -> Result<Point> {
        let t = self.direction.dot(&self.point.vector_to(point)?)?;
        Ok(self.to_point(t))
    }

    /// Projects `vector` onto the direction of the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn project_vector(&self, vector: &Vector) -> Result<Vector> {
        let t = self.direction.dot(vector)?;
        Ok(&self.direction * t)
    }

    /// Which side of the 2D line `point` lies on.
    ///
    /// Returns `1` to the right of the direction, `-1` to the left and `0`
    /// on the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line or the point is not 2D.
    pub fn side_point(&self, point: &Point, tol: Tolerance) -> Result<i8> {
        require_dimension("side of line", self.dimension(), &[2])?;
        let to_point = self.point.vector_to(point)?;
        self.direction.side_vector(&to_point, tol)
    }

    /// Checks whether the direction vectors are parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_parallel(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        self.direction.is_parallel(&other.direction, tol)
    }

    /// Checks whether the two lines lie in a common plane.
    ///
    /// Parallel lines are always coplanar. Other lines are coplanar when
    /// their closest points are within `tol.abs` of each other, which does
    /// not depend on how far the lines are from the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_coplanar(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        check_dimension(self.dimension(), other.dimension())?;
        if self.is_parallel(other, tol)? {
            return Ok(true);
        }
        Ok(tol.is_zero(self.closest_approach(other)?))
    }

    /// Checks whether the lines describe the same set of points.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_close(&self, other: &Self, tol: Tolerance) -> Result<bool> {
        Ok(self.contains_point(&other.point, tol)? && self.is_parallel(other, tol)?)
    }

    /// Shortest distance between the lines.
    ///
    /// Parallel lines are measured point-to-line. Other lines are measured
    /// between their closest points, which is zero when they intersect.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn distance_line(&self, other: &Self, tol: Tolerance) -> Result<f64> {
        check_dimension(self.dimension(), other.dimension())?;
        if self.is_parallel(other, tol)? {
            return self.distance_point(&other.point);
        }
        self.closest_approach(other)
    }

    /// Intersection point of two coplanar, non-parallel lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ,
    /// [`IntersectionError::Parallel`] if the lines are parallel and
    /// [`IntersectionError::NotCoplanar`] if they are skew.
    pub fn intersect_line(&self, other: &Self, tol: Tolerance) -> Result<Point> {
        check_dimension(self.dimension(), other.dimension())?;
        if self.is_parallel(other, tol)? {
            return Err(IntersectionError::Parallel("lines").into());
        }
        let (t, s) = self.closest_parameters(other)?;
        let here = self.to_point(t);
        if !tol.is_zero(here.distance_point(&other.to_point(s))?) {
            return Err(IntersectionError::NotCoplanar.into());
        }
        Ok(here)
    }

    /// Distance between the closest points of two non-parallel lines.
    fn closest_approach(&self, other: &Self) -> Result<f64> {
        let (t, s) = self.closest_parameters(other)?;
        self.to_point(t).distance_point(&other.to_point(s))
    }

    /// Parameters `(t, s)` of the closest points `self(t)` and `other(s)`.
    ///
    /// Minimizes `|p1 + t d1 - p2 - s d2|`. With unit directions and
    /// `c = d1 . d2` the normal equations are
    /// `t - c s = d1 . w` and `c t - s = d2 . w` where `w = p2 - p1`.
    fn closest_parameters(&self, other: &Self) -> Result<(f64, f64)> {
        let w = self.point.vector_to(&other.point)?;
        let c = self.direction.dot(&other.direction)?;
        let e = self.direction.dot(&w)?;
        let f = other.direction.dot(&w)?;
        solve_2x2(1.0, -c, c, -1.0, e, f)
            .ok_or_else(|| IntersectionError::Parallel("lines").into())
    }

    /// One-dimensional coordinates of `points` along the line.
    ///
    /// The line point is the origin and the direction is the positive axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn transform_points(&self, points: &Points) -> Result<Vec<f64>> {
        let basis = std::slice::from_ref(&self.direction);
        let coords = transform_coordinates(points, &self.point, basis)?;
        Ok(coords.column(0).iter().copied().collect())
    }
}

impl Distance for Line {
    fn distance_point(&self, point: &Point) -> Result<f64> {
        self.project_point(point)?.distance_point(point)
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point> {
        Ok(self.to_point(t))
    }

    fn tangent(&self, _t: f64) -> Result<Vector> {
        Ok(self.direction.clone())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line(point={}, direction={})", self.point, self.direction)
    }
}
