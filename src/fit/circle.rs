use tracing::debug;

use crate::error::{require_dimension, FitError, Result};
use crate::geometry::{Circle, Distance, Point, Points};
use crate::math::linalg::lstsq;
use crate::math::{Coords, Matrix, Tolerance};

use super::{require_points, FitReport};

impl Circle {
    /// Circle of best fit for 2D points.
    ///
    /// See [`Circle::best_fit_with_error`].
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 2D, fewer than three, or
    /// collinear.
    pub fn best_fit(points: &Points, tol: Tolerance) -> Result<Self> {
        Self::best_fit_with_error(points, tol).map(FitReport::into_fitted)
    }

    /// Circle of best fit for 2D points, with its residual.
    ///
    /// Algebraic fit: solves `2 x cx + 2 y cy + c = x^2 + y^2` in the least
    /// squares sense, then `r^2 = c + cx^2 + cy^2`. This minimizes the
    /// algebraic residual, not the orthogonal distance.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 2D, fewer than three, or
    /// collinear.
    pub fn best_fit_with_error(points: &Points, tol: Tolerance) -> Result<FitReport<Self>> {
        require_dimension("circle fit", points.dimension(), &[2])?;
        require_points(points, 3)?;
        if points.are_collinear(tol) {
            return Err(FitError::Degenerate("the points must not be collinear".into()).into());
        }

        let (center, radius) = algebraic_fit(points)?;
        let circle = Self::new(center, radius)?;
        let error = circle.sum_squares(points)?;

        debug!(points = points.len(), radius, error, "fitted circle");
        Ok(FitReport { fitted: circle, error })
    }
}

/// Linearized sphere fit shared by circles and spheres.
///
/// Returns the center and radius.
pub(super) fn algebraic_fit(points: &Points) -> Result<(Point, f64)> {
    let n = points.len();
    let dimension = points.dimension();
    let a = Matrix::from_fn(n, dimension + 1, |i, j| {
        if j < dimension {
            2.0 * points[i][j]
        } else {
            1.0
        }
    });
    let b = Coords::from_fn(n, |i, _| points[i].coords().norm_squared());
    let solution = lstsq(a, &b)?;

    let center = solution.rows(0, dimension).into_owned();
    let radius = (solution[dimension] + center.norm_squared()).sqrt();
    Ok((Point::from_coords(center), radius))
}
