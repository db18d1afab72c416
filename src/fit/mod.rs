//! Best-fit engine.
//!
//! Each fittable primitive gains `best_fit` and `best_fit_with_error`
//! constructors here. Lines and planes are fitted through the centroid with
//! a singular value decomposition, circles and spheres with the linearized
//! algebraic fit, and cylinders by minimizing Eberly's `G(direction)`.
//!
//! The reported error is always the sum of squared orthogonal distances from
//! the input points to the fitted primitive.

mod circle;
mod cylinder;
mod line;
mod plane;
mod sphere;

use crate::error::{FitError, Result};
use crate::geometry::Points;

/// A fitted primitive together with its residual.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport<T> {
    /// The primitive of best fit.
    pub fitted: T,
    /// Sum of squared distances from the points to `fitted`.
    pub error: f64,
}

impl<T> FitReport<T> {
    /// Discards the residual.
    #[must_use]
    pub fn into_fitted(self) -> T {
        self.fitted
    }
}

fn require_points(points: &Points, required: usize) -> Result<()> {
    if points.len() < required {
        return Err(FitError::InsufficientData {
            required,
            found: points.len(),
        }
        .into());
    }
    Ok(())
}
