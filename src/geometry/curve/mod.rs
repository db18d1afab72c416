mod circle;
mod line;
mod line_segment;

pub use circle::Circle;
pub use line::Line;
pub use line_segment::LineSegment;

use crate::error::Result;

use super::{Point, Vector};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Checks whether `t` lies in the closed range `[t_min, t_max]`.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        (self.t_min..=self.t_max).contains(&t)
    }
}

/// Parametric curves.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn evaluate(&self, t: f64) -> Result<Point>;

    /// Tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn tangent(&self, t: f64) -> Result<Vector>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}
