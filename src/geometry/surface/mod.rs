mod cylinder;
mod plane;
mod sphere;

pub use cylinder::{Cylinder, Extent};
pub use plane::Plane;
pub use sphere::Sphere;

use crate::error::Result;

use super::{Point, Vector};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }
}

/// Parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface has no 3D parametrization.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point>;

    /// Unit surface normal at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface has no 3D parametrization.
    fn normal_at(&self, u: f64, v: f64) -> Result<Vector>;

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;
}
