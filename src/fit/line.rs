use tracing::debug;

use crate::error::{FitError, Result};
use crate::geometry::{Distance, Line, Points, Vector};
use crate::math::linalg::RightSingular;
use crate::math::Tolerance;

use super::{require_points, FitReport};

impl Line {
    /// Line of best fit through `points`.
    ///
    /// See [`Line::best_fit_with_error`].
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two points or they all
    /// coincide.
    pub fn best_fit(points: &Points, tol: Tolerance) -> Result<Self> {
        Self::best_fit_with_error(points, tol).map(FitReport::into_fitted)
    }

    /// Line of best fit through `points`, with its residual.
    ///
    /// The line passes through the centroid along the right-singular vector
    /// with the largest singular value of the centered points.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two points or they all
    /// coincide.
    pub fn best_fit_with_error(points: &Points, tol: Tolerance) -> Result<FitReport<Self>> {
        require_points(points, 2)?;
        if points.are_concurrent(tol) {
            return Err(FitError::Degenerate("the points must not be concurrent".into()).into());
        }

        let (centered, centroid) = points.mean_center();
        let svd = RightSingular::of(&centered.to_matrix())?;
        let direction = Vector::from_coords(svd.vectors[0].clone());
        let line = Self::new(centroid, direction)?;
        let error = line.sum_squares(points)?;

        debug!(
            points = points.len(),
            dimension = points.dimension(),
            singular_values = ?svd.values,
            error,
            "fitted line"
        );
        Ok(FitReport { fitted: line, error })
    }
}
