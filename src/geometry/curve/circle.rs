use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::error::{require_dimension, GeometryError, IntersectionError, Result};
use crate::geometry::round::Round;
use crate::geometry::{Distance, Point, Vector};
use crate::math::Tolerance;

use super::{Curve, CurveDomain, Line};

/// A circle in the plane.
///
/// `P(t) = center + radius * (cos t, sin t)` for `t` in `[0, 2*pi]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    round: Round,
}

impl Circle {
    /// Creates a circle from a 2D center and a radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the center is not 2D or the radius is not a
    /// positive finite number.
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        require_dimension("circle", center.dimension(), &[2])?;
        Ok(Self {
            round: Round::new(center, radius, 2)?,
        })
    }

    /// The circle passing through three 2D points.
    ///
    /// # Errors
    ///
    /// Returns an error if a point is not 2D or the points are collinear.
    pub fn from_points(a: &Point, b: &Point, c: &Point, tol: Tolerance) -> Result<Self> {
        for point in [a, b, c] {
            require_dimension("circle", point.dimension(), &[2])?;
        }
        let (ax, ay) = (a[0], a[1]);
        let (bx, by) = (b[0], b[1]);
        let (cx, cy) = (c[0], c[1]);
        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d == 0.0 || a.is_collinear(b, c, tol)? {
            let reason = "the points must not be collinear".to_string();
            return Err(GeometryError::Degenerate(reason).into());
        }

        let sa = ax * ax + ay * ay;
        let sb = bx * bx + by * by;
        let sc = cx * cx + cy * cy;
        let ux = (sa * (by - cy) + sb * (cy - ay) + sc * (ay - by)) / d;
        let uy = (sa * (cx - bx) + sb * (ax - cx) + sc * (bx - ax)) / d;

        let center = Point::new([ux, uy])?;
        let radius = center.distance_point(a)?;
        Self::new(center, radius)
    }

    #[must_use]
    pub fn center(&self) -> &Point {
        &self.round.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.round.radius
    }

    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU * self.round.radius
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.round.radius.powi(2)
    }

    /// Closest point on the circle to `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not 2D or is the center.
    pub fn project_point(&self, point: &Point) -> Result<Point> {
        self.round.project_point(point)
    }

    /// Checks whether `point` is inside the circle or on its boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not 2D.
    pub fn is_point_within(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        self.round.is_point_within(point, tol)
    }

    /// Points where a 2D line crosses the circle.
    ///
    /// Returns no points if the line misses, one if it is tangent and two
    /// (ordered along the line direction) if it is a secant.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not 2D.
    pub fn intersect_line(&self, line: &Line, tol: Tolerance) -> Result<Vec<Point>> {
        require_dimension("circle-line intersection", line.dimension(), &[2])?;
        self.round.intersect_line(line, tol)
    }

    /// Points where two circles cross, using the radical-line construction.
    ///
    /// Tangent circles meet in a single point.
    ///
    /// # Errors
    ///
    /// Returns [`IntersectionError::Coincident`] if the centers coincide, and
    /// [`IntersectionError::NoIntersection`] if the circles are separate or
    /// one lies inside the other.
    pub fn intersect_circle(&self, other: &Self, tol: Tolerance) -> Result<Vec<Point>> {
        let (r1, r2) = (self.radius(), other.radius());
        let (c1, c2) = (self.center(), other.center());
        let d = c1.distance_point(c2)?;

        if tol.is_zero(d) {
            return Err(IntersectionError::Coincident("circle centers").into());
        }
        let outer = tol.is_close(d, r1 + r2);
        let inner = tol.is_close(d, (r1 - r2).abs());
        if (d > r1 + r2 && !outer) || (d < (r1 - r2).abs() && !inner) {
            return Err(IntersectionError::NoIntersection("circles").into());
        }

        let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
        let toward = c1.vector_to(c2)?;
        let middle = c1 + &(&toward * (a / d));
        if outer || inner {
            return Ok(vec![middle]);
        }

        let h = (r1 * r1 - a * a).max(0.0).sqrt();
        let offset = Vector::new([h * (c1[1] - c2[1]) / d, -h * (c1[0] - c2[0]) / d])?;
        Ok(vec![&middle + &offset, &middle - &offset])
    }
}

impl Distance for Circle {
    fn distance_point(&self, point: &Point) -> Result<f64> {
        self.round.distance_point(point)
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point> {
        let r = self.radius();
        let c = self.center();
        Point::new([c[0] + r * t.cos(), c[1] + r * t.sin()])
    }

    fn tangent(&self, t: f64) -> Result<Vector> {
        let r = self.radius();
        Vector::new([-r * t.sin(), r * t.cos()])
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle(point={}, radius={})", self.center(), self.radius())
    }
}
