use std::fmt;

use crate::error::{check_dimension, GeometryError, IntersectionError, Result};
use crate::geometry::{Point, Vector};
use crate::math::Tolerance;

use super::{Curve, CurveDomain, Line};

/// The closed segment between two points.
///
/// `P(t) = a + t * (b - a)` for `t` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    a: Point,
    b: Point,
}

impl LineSegment {
    /// Creates a segment from its endpoints.
    ///
    /// Coincident endpoints are allowed; such a segment contains only that
    /// point and cannot be turned into a [`Line`].
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints have different dimensions.
    pub fn new(a: Point, b: Point) -> Result<Self> {
        check_dimension(a.dimension(), b.dimension())?;
        Ok(Self { a, b })
    }

    #[must_use]
    pub fn point_a(&self) -> &Point {
        &self.a
    }

    #[must_use]
    pub fn point_b(&self) -> &Point {
        &self.b
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.a.dimension()
    }

    /// The vector from `a` to `b`.
    #[must_use]
    pub fn vector(&self) -> Vector {
        &self.b - &self.a
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        &self.a + &(&self.vector() * 0.5)
    }

    /// The infinite line through both endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide.
    pub fn to_line(&self) -> Result<Line> {
        Line::from_points(&self.a, &self.b)
    }

    /// Checks whether `point` lies on the segment.
    ///
    /// The point must be within `tol.abs` of the supporting line and its
    /// parameter along the segment must fall in `[0, 1]`, widened by
    /// `tol.abs` in length units at each end.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn contains_point(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        let to_point = self.a.vector_to(point)?;
        let vector = self.vector();
        let length = vector.norm();
        if length == 0.0 {
            return Ok(tol.is_zero(to_point.norm()));
        }

        let along = vector.dot(&to_point)? / length;
        let foot = &self.a + &(&vector * (along / length));
        let offset = foot.distance_point(point)?;

        Ok(tol.is_zero(offset) && along >= -tol.abs && along <= length + tol.abs)
    }

    /// Intersection point of two segments.
    ///
    /// # Errors
    ///
    /// Returns an error if either segment is degenerate, the supporting
    /// lines are parallel or skew, or the crossing point lies outside one of
    /// the segments ([`IntersectionError::NoIntersection`]).
    pub fn intersect_line_segment(&self, other: &Self, tol: Tolerance) -> Result<Point> {
        let point = self.to_line()?.intersect_line(&other.to_line()?, tol)?;
        if self.contains_point(&point, tol)? && other.contains_point(&point, tol)? {
            Ok(point)
        } else {
            Err(IntersectionError::NoIntersection("line segments").into())
        }
    }
}

impl Curve for LineSegment {
    fn evaluate(&self, t: f64) -> Result<Point> {
        if !self.domain().contains(t) {
            return Err(GeometryError::OutOfRange {
                parameter: "t",
                expected: "[0, 1]",
                value: t.to_string(),
            }
            .into());
        }
        Ok(&self.a + &(&self.vector() * t))
    }

    fn tangent(&self, _t: f64) -> Result<Vector> {
        Ok(self.vector())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineSegment(point_a={}, point_b={})", self.a, self.b)
    }
}
