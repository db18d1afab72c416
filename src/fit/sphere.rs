use tracing::debug;

use crate::error::{require_dimension, FitError, Result};
use crate::geometry::{Distance, Points, Sphere};
use crate::math::Tolerance;

use super::circle::algebraic_fit;
use super::{require_points, FitReport};

impl Sphere {
    /// Sphere of best fit for 3D points.
    ///
    /// See [`Sphere::best_fit_with_error`].
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 3D, fewer than four, or
    /// coplanar.
    pub fn best_fit(points: &Points, tol: Tolerance) -> Result<Self> {
        Self::best_fit_with_error(points, tol).map(FitReport::into_fitted)
    }

    /// Sphere of best fit for 3D points, with its residual.
    ///
    /// The same linearized algebraic fit as circles, in three dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 3D, fewer than four, or
    /// coplanar.
    pub fn best_fit_with_error(points: &Points, tol: Tolerance) -> Result<FitReport<Self>> {
        require_dimension("sphere fit", points.dimension(), &[3])?;
        require_points(points, 4)?;
        if points.are_coplanar(tol) {
            return Err(FitError::Degenerate("the points must not be coplanar".into()).into());
        }

        let (center, radius) = algebraic_fit(points)?;
        let sphere = Self::new(center, radius)?;
        let error = sphere.sum_squares(points)?;

        debug!(points = points.len(), radius, error, "fitted sphere");
        Ok(FitReport { fitted: sphere, error })
    }
}
