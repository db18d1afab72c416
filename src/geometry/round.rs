use crate::error::{check_dimension, GeometryError, Result};
use crate::math::linalg::solve_quadratic;
use crate::math::Tolerance;

use super::{Line, Point};

/// Center and radius shared by circles and spheres.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Round {
    pub(crate) center: Point,
    pub(crate) radius: f64,
}

impl Round {
    pub(crate) fn new(center: Point, radius: f64, dimension: usize) -> Result<Self> {
        check_dimension(dimension, center.dimension())?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius).into());
        }
        Ok(Self { center, radius })
    }

    pub(crate) fn distance_point(&self, point: &Point) -> Result<f64> {
        Ok((self.center.distance_point(point)? - self.radius).abs())
    }

    pub(crate) fn project_point(&self, point: &Point) -> Result<Point> {
        let to_point = self.center.vector_to(point)?;
        if to_point.norm() == 0.0 {
            return Err(GeometryError::Degenerate(
                "the point must not be the center of the circle or sphere".into(),
            )
            .into());
        }
        Ok(&self.center + &(&to_point.unit()? * self.radius))
    }

    /// Inside or on the boundary.
    pub(crate) fn is_point_within(&self, point: &Point, tol: Tolerance) -> Result<bool> {
        let distance = self.center.distance_point(point)?;
        Ok(distance <= self.radius || tol.is_close(distance, self.radius))
    }

    /// Points where `line` crosses the boundary, ordered along the line.
    ///
    /// Substituting `p + t d` (with `|d| = 1`) into `|x - c|^2 = r^2` gives
    /// `t^2 + 2 (d . w) t + |w|^2 - r^2 = 0` with `w = p - c`. A line whose
    /// discriminant is within `tol.abs` of zero is tangent and yields a
    /// single point.
    pub(crate) fn intersect_line(&self, line: &Line, tol: Tolerance) -> Result<Vec<Point>> {
        let w = self.center.vector_to(line.point())?;
        let b = 2.0 * line.direction().dot(&w)?;
        let c = w.dot(&w)? - self.radius * self.radius;

        Ok(match solve_quadratic(1.0, b, c, tol) {
            None => Vec::new(),
            Some((t1, t2)) if t1 == t2 => vec![line.to_point(t1)],
            Some((t1, t2)) => vec![line.to_point(t1), line.to_point(t2)],
        })
    }
}
