use tracing::debug;

use crate::error::{FitError, Result};
use crate::geometry::{Distance, Plane, Points, Vector};
use crate::math::linalg::RightSingular;
use crate::math::Tolerance;

use super::{require_points, FitReport};

impl Plane {
    /// Plane of best fit through `points`.
    ///
    /// See [`Plane::best_fit_with_error`].
    ///
    /// # Errors
    ///
    /// Returns an error if the points are fewer than three, lower than 3D, or
    /// collinear.
    pub fn best_fit(points: &Points, tol: Tolerance) -> Result<Self> {
        Self::best_fit_with_error(points, tol).map(FitReport::into_fitted)
    }

    /// Plane of best fit through `points`, with its residual.
    ///
    /// The plane passes through the centroid. Its normal is the
    /// right-singular vector with the smallest singular value of the centered
    /// points, the direction of least variance.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are fewer than three, lower than 3D, or
    /// collinear.
    pub fn best_fit_with_error(points: &Points, tol: Tolerance) -> Result<FitReport<Self>> {
        let dimension = points.dimension();
        if dimension < 3 {
            let reason = format!("a plane fit needs 3D points, got {dimension}D");
            return Err(FitError::Degenerate(reason).into());
        }
        require_points(points, 3)?;
        if points.are_collinear(tol) {
            return Err(FitError::Degenerate("the points must not be collinear".into()).into());
        }

        let (centered, centroid) = points.mean_center();
        let svd = RightSingular::of(&centered.to_matrix())?;
        let last = svd.vectors.last().ok_or(FitError::SvdFailed)?;
        let plane = Self::new(centroid, Vector::from_coords(last.clone()))?;
        let error = plane.sum_squares(points)?;

        debug!(
            points = points.len(),
            dimension,
            singular_values = ?svd.values,
            error,
            "fitted plane"
        );
        Ok(FitReport { fitted: plane, error })
    }
}
