use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::error::{require_dimension, GeometryError, IntersectionError, Result};
use crate::geometry::{Distance, Line, Point, Vector};
use crate::math::linalg::solve_quadratic;
use crate::math::Tolerance;

use super::{Plane, Surface, SurfaceDomain};

/// Whether a cylinder is treated as bounded by its end caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extent {
    /// The lateral surface extends forever along the axis; no caps.
    #[default]
    Infinite,
    /// The solid between the two cap planes, caps included.
    Finite,
}

/// A right circular cylinder in 3D space.
///
/// The axis runs from `point` (center of the base cap) to `point + vector`
/// (center of the top cap), so `|vector|` is the length.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    point: Point,
    vector: Vector,
    radius: f64,
}

impl Cylinder {
    /// Creates a cylinder from its base center, axis vector and radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or vector is not 3D, the vector is
    /// zero, or the radius is not a positive finite number.
    pub fn new(point: Point, vector: Vector, radius: f64) -> Result<Self> {
        require_dimension("cylinder", point.dimension(), &[3])?;
        require_dimension("cylinder", vector.dimension(), &[3])?;
        if vector.norm() == 0.0 {
            return Err(GeometryError::ZeroVector.into());
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius).into());
        }
        Ok(Self {
            point,
            vector,
            radius,
        })
    }

    /// Creates the cylinder whose cap centers are `a` and `b`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cylinder::new`].
    pub fn from_points(a: &Point, b: &Point, radius: f64) -> Result<Self> {
        Self::new(a.clone(), a.vector_to(b)?, radius)
    }

    /// Center of the base cap.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Axis vector from the base cap to the top cap.
    #[must_use]
    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector.norm()
    }

    #[must_use]
    pub fn lateral_surface_area(&self) -> f64 {
        TAU * self.radius * self.length()
    }

    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.lateral_surface_area() + TAU * self.radius.powi(2)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        PI * self.radius.powi(2) * self.length()
    }

    /// The infinite line along the axis.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed cylinder; the `Result` comes from
    /// [`Line::new`].
    pub fn axis(&self) -> Result<Line> {
        Line::new(self.point.clone(), self.vector.clone())
    }

    /// Checks whether `point` is inside the cylinder or on its surface.
    ///
    /// Both the radial distance and the position along the axis are
    /// compared with `tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not 3D.
    pub fn is_point_within(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        let distance = self.axis()?.distance_point(point)?;
        let within_radius = distance <= self.radius || tol.is_close(distance, self.radius);
        Ok(within_radius && self.between_caps(point, tol)?)
    }

    /// Points where a 3D line crosses the cylinder, ordered along the line.
    ///
    /// With [`Extent::Infinite`] only the lateral surface is considered.
    /// With [`Extent::Finite`] a line crossing both caps returns the cap
    /// points, and a lateral crossing beyond a cap is replaced by the point
    /// where the line crosses that cap. A tangent line returns the same
    /// point twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not 3D, or
    /// [`IntersectionError::NoIntersection`] if the line misses.
    pub fn intersect_line(
        &self,
        line: &Line,
        extent: Extent,
        tol: Tolerance,
    ) -> Result<(Point, Point)> {
        require_dimension("cylinder-line intersection", line.dimension(), &[3])?;
        match extent {
            Extent::Infinite => self.intersect_lateral(line, tol),
            Extent::Finite => self.intersect_finite(line, tol),
        }
    }

    /// Solves `|(p + t d - c) - ((p + t d - c) . a) a|^2 = r^2` for `t`,
    /// where `a` is the unit axis.
    fn intersect_lateral(&self, line: &Line, tol: Tolerance) -> Result<(Point, Point)> {
        let axis = self.vector.unit()?;
        let direction = line.direction();
        let delta = self.point.vector_to(line.point())?;

        let d_perp = direction - &(&axis * axis.dot(direction)?);
        let delta_perp = &delta - &(&axis * axis.dot(&delta)?);

        let a = d_perp.dot(&d_perp)?;
        let b = 2.0 * d_perp.dot(&delta_perp)?;
        let c = delta_perp.dot(&delta_perp)? - self.radius.powi(2);

        let (t1, t2) = solve_quadratic(a, b, c, tol)
            .ok_or(IntersectionError::NoIntersection("line and cylinder"))?;
        Ok((line.to_point(t1), line.to_point(t2)))
    }

    fn intersect_finite(&self, line: &Line, tol: Tolerance) -> Result<(Point, Point)> {
        let base = Plane::new(self.point.clone(), self.vector.clone())?;
        let top = Plane::new(&self.point + &self.vector, self.vector.clone())?;
        let base_hit = self.intersect_cap(&base, line, tol)?;
        let top_hit = self.intersect_cap(&top, line, tol)?;

        if let (Some(b), Some(t)) = (&base_hit, &top_hit) {
            return Ok((b.clone(), t.clone()));
        }

        let cap_hit = base_hit.or(top_hit);
        let (a, b) = self.intersect_lateral(line, tol)?;
        let clip = |point: Point| -> Result<Point> {
            if self.between_caps(&point, tol)? {
                return Ok(point);
            }
            cap_hit
                .clone()
                .ok_or_else(|| IntersectionError::NoIntersection("line and cylinder").into())
        };
        Ok((clip(a)?, clip(b)?))
    }

    /// Point where `line` crosses the cap disc lying in `cap`, if any.
    fn intersect_cap(&self, cap: &Plane, line: &Line, tol: Tolerance) -> Result<Option<Point>> {
        let Ok(point) = cap.intersect_line(line, tol) else {
            return Ok(None);
        };
        let distance = point.distance_point(cap.point())?;
        let inside = distance <= self.radius || tol.is_close(distance, self.radius);
        Ok(inside.then_some(point))
    }

    fn between_caps(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        let along = self.vector.unit()?.dot(&self.point.vector_to(point)?)?;
        Ok(along >= -tol.abs && along <= self.length() + tol.abs)
    }

    /// Orthonormal directions `(e1, e2)` perpendicular to the axis.
    fn radial_basis(&self) -> Result<(Vector, Vector)> {
        let axis = self.vector.unit()?;
        let seed = axis.different_direction(Tolerance::default())?;
        let e1 = axis.cross(&seed)?.unit()?;
        let e2 = axis.cross(&e1)?;
        Ok((e1, e2))
    }
}

/// `u` is the angle around the axis, `v` runs from the base (0) to the top
/// cap (1).
impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point> {
        let radial = &self.normal_at(u, v)? * self.radius;
        let on_axis = &self.point + &(&self.vector * v);
        Ok(&on_axis + &radial)
    }

    fn normal_at(&self, u: f64, _v: f64) -> Result<Vector> {
        let (e1, e2) = self.radial_basis()?;
        Ok(&(&e1 * u.cos()) + &(&e2 * u.sin()))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, 0.0, 1.0)
    }
}

impl fmt::Display for Cylinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cylinder(point={}, vector={}, radius={})",
            self.point, self.vector, self.radius
        )
    }
}
