use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use crate::error::{require_dimension, FitError, Result};
use crate::geometry::{Cylinder, Distance, Line, Points, Vector};
use crate::math::search::{minimize_direction, SearchOptions};
use crate::math::Tolerance;

use super::{require_points, FitReport};

impl Cylinder {
    /// Cylinder of best fit for 3D points lying near its lateral surface.
    ///
    /// See [`Cylinder::best_fit_with_error`].
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 3D, fewer than six, or
    /// coplanar.
    pub fn best_fit(points: &Points, tol: Tolerance) -> Result<Self> {
        Self::best_fit_with_error(points, tol).map(FitReport::into_fitted)
    }

    /// Cylinder of best fit for 3D points, with its residual.
    ///
    /// The axis direction minimizes Eberly's `G(direction)`, starting from
    /// the direction of the line of best fit. The center and radius follow in
    /// closed form for that direction. The cylinder spans the range of the
    /// points projected onto the axis. The result is a local optimum and is
    /// only meaningful for points sampled from a cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are not 3D, fewer than six, or
    /// coplanar.
    pub fn best_fit_with_error(points: &Points, tol: Tolerance) -> Result<FitReport<Self>> {
        require_dimension("cylinder fit", points.dimension(), &[3])?;
        require_points(points, 6)?;
        if points.are_coplanar(tol) {
            return Err(FitError::Degenerate("the points must not be coplanar".into()).into());
        }

        let (centered, centroid) = points.mean_center();
        let samples: Vec<Vector3<f64>> = centered.iter().map(|p| vector3(p.as_slice())).collect();

        let initial = Line::best_fit(&centered, tol)?;
        let initial = vector3(initial.direction().as_slice());
        let search = minimize_direction(
            |direction| ProjectedSamples::new(direction, &samples).g(),
            &initial,
            SearchOptions::default(),
        );

        let projected = ProjectedSamples::new(&search.direction, &samples);
        let center = projected
            .center()
            .ok_or_else(|| FitError::Degenerate("no cylinder fits the points".into()))?;
        let radius = projected.radius(&center);

        let axis = Line::new(
            centroid.translate(&Vector::new(center.as_slice())?)?,
            Vector::new(search.direction.as_slice())?,
        )?;
        let (t_min, t_max) = axis
            .transform_points(points)?
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            });
        let vector = axis.direction() * (t_max - t_min);
        let cylinder = Self::new(axis.to_point(t_min), vector, radius)?;

        let error = points.iter().try_fold(0.0, |acc, point| {
            axis.distance_point(point)
                .map(|distance| acc + (distance - radius).powi(2))
        })?;

        debug!(
            points = points.len(),
            iterations = search.iterations,
            g = search.value,
            radius,
            length = t_max - t_min,
            error,
            "fitted cylinder"
        );
        Ok(FitReport {
            fitted: cylinder,
            error,
        })
    }
}

/// Mean-centered samples projected onto the plane perpendicular to a
/// candidate axis, with the moment matrices of Eberly's formulation.
struct ProjectedSamples {
    samples: Vec<Vector3<f64>>,
    squared_norms: Vec<f64>,
    a: Matrix3<f64>,
    a_hat: Matrix3<f64>,
}

impl ProjectedSamples {
    fn new(direction: &Vector3<f64>, centered: &[Vector3<f64>]) -> Self {
        let w = direction.normalize();
        let projection = Matrix3::identity() - w * w.transpose();
        let samples: Vec<Vector3<f64>> = centered.iter().map(|x| projection * x).collect();
        let squared_norms = samples.iter().map(|x| x.norm_squared()).collect();
        let a = samples
            .iter()
            .fold(Matrix3::zeros(), |acc, x| acc + x * x.transpose());
        let skew = w.cross_matrix();
        let a_hat = skew * a * skew.transpose();
        Self {
            samples,
            squared_norms,
            a,
            a_hat,
        }
    }

    /// Center of the fitted circle in the projection plane, relative to the
    /// centroid. `None` when the projected samples are collinear.
    fn center(&self) -> Option<Vector3<f64>> {
        let trace = (self.a_hat * self.a).trace();
        if trace.abs() <= f64::EPSILON * self.a.trace().powi(2) {
            return None;
        }
        let weighted = self
            .samples
            .iter()
            .zip(&self.squared_norms)
            .fold(Vector3::zeros(), |acc, (x, &sq)| acc + x * sq);
        Some(self.a_hat * weighted / trace)
    }

    fn radius(&self, center: &Vector3<f64>) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.samples.len() as f64;
        let sum: f64 = self.samples.iter().map(|x| (center - x).norm_squared()).sum();
        (sum / n).sqrt()
    }

    /// Eberly's error function for this direction.
    fn g(&self) -> f64 {
        let Some(center) = self.center() else {
            return f64::INFINITY;
        };
        #[allow(clippy::cast_precision_loss)]
        let mean = self.squared_norms.iter().sum::<f64>() / self.samples.len() as f64;
        self.samples
            .iter()
            .zip(&self.squared_norms)
            .map(|(x, &sq)| (sq - mean - 2.0 * x.dot(&center)).powi(2))
            .sum()
    }
}

fn vector3(c: &[f64]) -> Vector3<f64> {
    Vector3::new(c[0], c[1], c[2])
}
