use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::error::{require_dimension, Result};
use crate::geometry::round::Round;
use crate::geometry::{Distance, Line, Point, Vector};
use crate::math::Tolerance;

use super::{Surface, SurfaceDomain};

/// A sphere in 3D space.
///
/// Parametrized by azimuth `u` in `[0, 2*pi]` and inclination `v` in
/// `[0, pi]`: `P(u, v) = center + radius * (cos u sin v, sin u sin v, cos v)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    round: Round,
}

impl Sphere {
    /// Creates a sphere from a 3D center and a radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the center is not 3D or the radius is not a
    /// positive finite number.
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        require_dimension("sphere", center.dimension(), &[3])?;
        Ok(Self {
            round: Round::new(center, radius, 3)?,
        })
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
    pub fn surface_area(&self) -> f64 {
        4.0 * PI * self.round.radius.powi(2)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.round.radius.powi(3)
    }

    /// Closest point on the sphere to `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not 3D or is the center.
    pub fn project_point(&self, point: &Point) -> Result<Point> {
        self.round.project_point(point)
    }

    /// Checks whether `point` is inside the sphere or on its surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not 3D.
    pub fn is_point_within(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        self.round.is_point_within(point, tol)
    }

    /// Points where a 3D line crosses the sphere: none, one (tangent) or
    /// two ordered along the line direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not 3D.
    pub fn intersect_line(&self, line: &Line, tol: Tolerance) -> Result<Vec<Point>> {
        require_dimension("sphere-line intersection", line.dimension(), &[3])?;
        self.round.intersect_line(line, tol)
    }
}

impl Distance for Sphere {
    fn distance_point(&self, point: &Point) -> Result<f64> {
        self.round.distance_point(point)
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point> {
        let offset = &self.normal_at(u, v)? * self.radius();
        self.center().translate(&offset)
    }

    fn normal_at(&self, u: f64, v: f64) -> Result<Vector> {
        Vector::new([u.cos() * v.sin(), u.sin() * v.sin(), v.cos()])
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, 0.0, PI)
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sphere(point={}, radius={})", self.center(), self.radius())
    }
}
